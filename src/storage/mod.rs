// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Storage Module
//!
//! Persistence for every entity of the shop, expressed as JSON documents in a
//! small set of named collections.
//!
//! ## Backends
//!
//! - [`FileStore`]: one JSON file per document under `DATA_DIR`
//! - [`MemoryStore`]: process-local maps, used by tests and throwaway runs
//!
//! Both implement [`DocumentStore`], which handlers receive as an injected
//! `Arc<dyn DocumentStore>` through the application state.
//!
//! ## Storage Layout
//!
//! ```text
//! {DATA_DIR}/
//!   users/{user_id}.json
//!   products/{product_id}.json
//!   carts/{user_id}.json
//!   wishlists/{user_id}.json
//!   orders/{order_id}.json
//!   categories/{category_id}.json
//! ```
//!
//! ## Important Notes
//!
//! - Every cart, wishlist and order mutation is a single `update` call, so
//!   concurrent requests for the same user never lose each other's writes
//! - Repositories borrow the store; they hold no state of their own

pub mod document;
pub mod file_store;
pub mod memory;
pub mod paths;
pub mod repository;

pub use document::{
    Collection, Document, DocumentStore, DocumentStoreExt, StorageError, StorageResult, UpdateFn,
};
pub use file_store::FileStore;
pub use memory::MemoryStore;
pub use paths::StoragePaths;
pub use repository::{
    CartRepository, CatalogRepository, OrderRepository, SeedOutcome, UserRepository,
    WishlistRepository,
};
