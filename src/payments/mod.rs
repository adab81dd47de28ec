// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Payment Capture
//!
//! Third-party checkout behind the [`CheckoutGateway`] trait. Handlers only
//! talk to [`PaymentAdapter`], which reports `NotConfigured` when no gateway
//! credentials were supplied.
//!
//! Every call is a single attempt; provider failures are returned to the
//! caller unchanged.

pub mod paypal;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use rust_decimal::Decimal;

pub use paypal::{PayPalClient, PayPalConfig};

#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("PayPal integration not configured")]
    NotConfigured,

    #[error("Invalid PayPal order id: {0:?}")]
    InvalidRemoteId(String),

    #[error("PayPal error: {0}")]
    Provider(String),
}

/// Boxed future returned by gateway operations.
pub type GatewayFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, PaymentError>> + Send + 'a>>;

/// Remote checkout API.
pub trait CheckoutGateway: Send + Sync {
    /// Open a remote order for `total`, tagged with our order id. Returns the
    /// remote order id.
    fn create_remote_order<'a>(
        &'a self,
        reference_id: &'a str,
        total: Decimal,
    ) -> GatewayFuture<'a, String>;

    /// Capture an approved remote order. Returns the capture id.
    fn capture_remote_order<'a>(&'a self, remote_order_id: &'a str) -> GatewayFuture<'a, String>;
}

/// Optional gateway shared through the application state.
#[derive(Clone, Default)]
pub struct PaymentAdapter {
    gateway: Option<Arc<dyn CheckoutGateway>>,
}

impl std::fmt::Debug for PaymentAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentAdapter")
            .field("configured", &self.is_configured())
            .finish()
    }
}

impl PaymentAdapter {
    pub fn new(gateway: Arc<dyn CheckoutGateway>) -> Self {
        Self {
            gateway: Some(gateway),
        }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn is_configured(&self) -> bool {
        self.gateway.is_some()
    }

    /// Fails fast with `NotConfigured` before any other work is done.
    pub fn gateway(&self) -> Result<&dyn CheckoutGateway, PaymentError> {
        self.gateway.as_deref().ok_or(PaymentError::NotConfigured)
    }

    pub async fn create_remote_order(
        &self,
        reference_id: &str,
        total: Decimal,
    ) -> Result<String, PaymentError> {
        self.gateway()?.create_remote_order(reference_id, total).await
    }

    pub async fn capture_remote_order(&self, remote_order_id: &str) -> Result<String, PaymentError> {
        self.gateway()?.capture_remote_order(remote_order_id).await
    }
}
