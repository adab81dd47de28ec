// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Repository layer providing typed access to the document store.
//!
//! Each repository owns one collection and borrows the store for the
//! duration of a request. Domain failures are reported as [`ShopError`].
//!
//! [`ShopError`]: crate::error::ShopError

pub mod carts;
pub mod catalog;
pub mod orders;
pub mod users;
pub mod wishlists;

pub use carts::CartRepository;
pub use catalog::{CatalogRepository, SeedOutcome};
pub use orders::{total_from_client_prices, OrderRepository};
pub use users::UserRepository;
pub use wishlists::WishlistRepository;

/// Maximum number of documents returned by list operations.
pub const LIST_LIMIT: usize = 1000;
