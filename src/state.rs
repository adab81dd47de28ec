// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::{AccessPolicy, AllowAllPolicy, SessionIssuer};
use crate::payments::PaymentAdapter;
use crate::storage::{DocumentStore, MemoryStore};

/// Shared handles passed to every request handler.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn DocumentStore>,
    sessions: Arc<SessionIssuer>,
    policy: Arc<dyn AccessPolicy>,
    payments: PaymentAdapter,
}

impl AppState {
    /// State with the allow-all policy and checkout disabled.
    pub fn new(store: Arc<dyn DocumentStore>, sessions: SessionIssuer) -> Self {
        Self {
            store,
            sessions: Arc::new(sessions),
            policy: Arc::new(AllowAllPolicy),
            payments: PaymentAdapter::disabled(),
        }
    }

    pub fn with_policy(mut self, policy: Arc<dyn AccessPolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_payments(mut self, payments: PaymentAdapter) -> Self {
        self.payments = payments;
        self
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }

    pub fn sessions(&self) -> &SessionIssuer {
        &self.sessions
    }

    pub fn policy(&self) -> &dyn AccessPolicy {
        self.policy.as_ref()
    }

    pub fn payments(&self) -> &PaymentAdapter {
        &self.payments
    }
}

impl Default for AppState {
    /// In-memory store with an ephemeral signing secret.
    fn default() -> Self {
        Self::new(Arc::new(MemoryStore::new()), SessionIssuer::ephemeral())
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("sessions", &self.sessions)
            .field("payments", &self.payments)
            .finish_non_exhaustive()
    }
}
