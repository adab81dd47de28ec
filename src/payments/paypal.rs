// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! PayPal Orders v2 integration.
//!
//! Each operation fetches a client-credentials token and then performs one
//! REST call. Nothing is cached or retried.

use std::time::Duration;

use reqwest::Client;
use rust_decimal::{Decimal, RoundingStrategy};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use super::{CheckoutGateway, GatewayFuture, PaymentError};

pub const DEFAULT_API_BASE_URL: &str = "https://api-m.sandbox.paypal.com";
pub const DEFAULT_CURRENCY: &str = "USD";
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Credentials and endpoint for the PayPal REST API.
#[derive(Debug, Clone)]
pub struct PayPalConfig {
    pub client_id: String,
    pub client_secret: SecretString,
    pub api_base_url: String,
    pub currency: String,
}

#[derive(Debug, Clone)]
pub struct PayPalClient {
    api_base_url: String,
    client_id: String,
    client_secret: SecretString,
    currency: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct OAuthTokenResponse {
    access_token: String,
}

impl PayPalClient {
    pub fn new(config: PayPalConfig) -> Result<Self, PaymentError> {
        let http = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| PaymentError::Provider(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            client_id: config.client_id,
            client_secret: config.client_secret,
            currency: config.currency.to_ascii_uppercase(),
            http,
        })
    }

    pub async fn create_order(&self, reference_id: &str, total: Decimal) -> Result<String, PaymentError> {
        let payload = json!({
            "intent": "CAPTURE",
            "purchase_units": [{
                "reference_id": reference_id,
                "amount": {
                    "currency_code": self.currency,
                    "value": format_amount(total)
                }
            }]
        });

        let response = self.post_json("/v2/checkout/orders", &payload).await?;
        let remote_id = response
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| PaymentError::Provider("missing order id in response".to_string()))?
            .to_string();

        info!(reference_id, remote_order_id = %remote_id, "PayPal order created");
        Ok(remote_id)
    }

    pub async fn capture_order(&self, remote_order_id: &str) -> Result<String, PaymentError> {
        if !is_safe_remote_id(remote_order_id) {
            return Err(PaymentError::InvalidRemoteId(remote_order_id.to_string()));
        }

        let path = format!("/v2/checkout/orders/{remote_order_id}/capture");
        let response = self.post_json(&path, &json!({})).await?;

        let status = response.get("status").and_then(Value::as_str).unwrap_or("");
        if status != "COMPLETED" {
            return Err(PaymentError::Provider(format!(
                "capture of {remote_order_id} ended with status {status:?}"
            )));
        }

        let capture_id = response
            .pointer("/purchase_units/0/payments/captures/0/id")
            .and_then(Value::as_str)
            .unwrap_or(remote_order_id)
            .to_string();

        info!(remote_order_id, capture_id = %capture_id, "PayPal order captured");
        Ok(capture_id)
    }

    async fn access_token(&self) -> Result<String, PaymentError> {
        let response = self
            .http
            .post(format!("{}/v1/oauth2/token", self.api_base_url))
            .basic_auth(&self.client_id, Some(self.client_secret.expose_secret()))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| PaymentError::Provider(format!("token request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "PayPal token request rejected");
            return Err(PaymentError::Provider(format!(
                "token request returned {status}: {body}"
            )));
        }

        let token_response: OAuthTokenResponse = response
            .json()
            .await
            .map_err(|e| PaymentError::Provider(format!("invalid token response: {e}")))?;

        if token_response.access_token.trim().is_empty() {
            return Err(PaymentError::Provider(
                "token response did not include access_token".to_string(),
            ));
        }

        Ok(token_response.access_token)
    }

    async fn post_json(&self, path: &str, payload: &Value) -> Result<Value, PaymentError> {
        let token = self.access_token().await?;
        let response = self
            .http
            .post(format!("{}{}", self.api_base_url, path))
            .bearer_auth(token)
            .header("Prefer", "return=representation")
            .json(payload)
            .send()
            .await
            .map_err(|e| PaymentError::Provider(format!("POST {path} failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(path, %status, "PayPal request rejected");
            return Err(PaymentError::Provider(format!(
                "POST {path} returned {status}: {body}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| PaymentError::Provider(format!("POST {path} invalid JSON: {e}")))
    }
}

impl CheckoutGateway for PayPalClient {
    fn create_remote_order<'a>(
        &'a self,
        reference_id: &'a str,
        total: Decimal,
    ) -> GatewayFuture<'a, String> {
        Box::pin(self.create_order(reference_id, total))
    }

    fn capture_remote_order<'a>(&'a self, remote_order_id: &'a str) -> GatewayFuture<'a, String> {
        Box::pin(self.capture_order(remote_order_id))
    }
}

/// Two-decimal amount string as PayPal expects, e.g. `20.00`.
fn format_amount(total: Decimal) -> String {
    let rounded = total.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}

fn is_safe_remote_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= 64
        && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
