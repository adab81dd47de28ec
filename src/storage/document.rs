// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Document store abstraction.
//!
//! Every entity is a JSON document keyed by an application-level string id
//! inside one of a fixed set of collections. Backends only have to provide
//! single-document atomicity: `update` runs its closure while holding the
//! store's write lock, so a read-modify-write of one document never loses a
//! concurrent write to the same document.

use std::io;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

/// A stored JSON document.
pub type Document = Value;

/// Collections persisted by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Users,
    Products,
    Carts,
    Wishlists,
    Orders,
    Categories,
}

impl Collection {
    pub const ALL: [Collection; 6] = [
        Collection::Users,
        Collection::Products,
        Collection::Carts,
        Collection::Wishlists,
        Collection::Orders,
        Collection::Categories,
    ];

    /// Collection name as used on disk and in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Products => "products",
            Collection::Carts => "carts",
            Collection::Wishlists => "wishlists",
            Collection::Orders => "orders",
            Collection::Categories => "categories",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Error type for document store operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Already exists: {collection}/{id}")]
    AlreadyExists { collection: Collection, id: String },

    #[error("Storage not initialized")]
    NotInitialized,

    #[error("Invalid document id: {0:?}")]
    InvalidId(String),

    #[error("Storage lock poisoned")]
    Poisoned,

    #[error("Integrity violation: {0}")]
    IntegrityViolation(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Closure applied by [`DocumentStore::update`].
///
/// Receives the current document (if any). Returning `Some` writes the new
/// document, returning `None` leaves the store untouched.
pub type UpdateFn<'a> = dyn FnMut(Option<Document>) -> StorageResult<Option<Document>> + 'a;

/// Storage client interface shared by all repositories.
pub trait DocumentStore: Send + Sync {
    /// Fetch a document by id.
    fn find(&self, collection: Collection, id: &str) -> StorageResult<Option<Document>>;

    /// Insert a new document. Fails with `AlreadyExists` if the id is taken.
    fn insert(&self, collection: Collection, id: &str, document: Document) -> StorageResult<()>;

    /// Atomically read, transform and write back a single document.
    ///
    /// Returns the document as stored once the call completes (the new
    /// document if the closure wrote one, otherwise the current one).
    fn update(
        &self,
        collection: Collection,
        id: &str,
        apply: &mut UpdateFn<'_>,
    ) -> StorageResult<Option<Document>>;

    /// All documents of a collection in ascending id order.
    fn scan(&self, collection: Collection) -> StorageResult<Vec<Document>>;

    /// Number of documents in a collection.
    fn count(&self, collection: Collection) -> StorageResult<usize>;

    /// Verify the backend is reachable and writable.
    fn health_check(&self) -> StorageResult<()>;
}

/// Typed helpers layered over any [`DocumentStore`].
pub trait DocumentStoreExt: DocumentStore {
    fn find_as<T: DeserializeOwned>(
        &self,
        collection: Collection,
        id: &str,
    ) -> StorageResult<Option<T>> {
        self.find(collection, id)?
            .map(serde_json::from_value)
            .transpose()
            .map_err(StorageError::from)
    }

    fn insert_as<T: Serialize>(
        &self,
        collection: Collection,
        id: &str,
        value: &T,
    ) -> StorageResult<()> {
        self.insert(collection, id, serde_json::to_value(value)?)
    }

    fn update_as<T, F>(&self, collection: Collection, id: &str, mut apply: F) -> StorageResult<Option<T>>
    where
        T: Serialize + DeserializeOwned,
        F: FnMut(Option<T>) -> Option<T>,
    {
        let mut typed = |current: Option<Document>| -> StorageResult<Option<Document>> {
            let current = current.map(serde_json::from_value::<T>).transpose()?;
            apply(current)
                .map(|next| serde_json::to_value(&next))
                .transpose()
                .map_err(StorageError::from)
        };

        self.update(collection, id, &mut typed)?
            .map(serde_json::from_value)
            .transpose()
            .map_err(StorageError::from)
    }

    fn scan_as<T: DeserializeOwned>(&self, collection: Collection) -> StorageResult<Vec<T>> {
        self.scan(collection)?
            .into_iter()
            .map(|doc| serde_json::from_value(doc).map_err(StorageError::from))
            .collect()
    }
}

impl<S: DocumentStore + ?Sized> DocumentStoreExt for S {}

/// Reject ids that could not be used as a plain file name.
pub(crate) fn validate_id(id: &str) -> StorageResult<()> {
    let valid = !id.is_empty()
        && id.len() <= 128
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidId(id.to_string()))
    }
}
