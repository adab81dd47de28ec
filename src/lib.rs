// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Toystore - E-commerce Backend Service
//!
//! Accounts, a product catalog, per-user carts and wishlists, orders, and
//! PayPal checkout capture, served as a JSON API over a document store.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Password accounts and bearer-token sessions
//! - `config` - Environment configuration
//! - `payments` - Checkout gateway abstraction and the PayPal client
//! - `storage` - Document store backends and repositories

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod payments;
pub mod state;
pub mod storage;
