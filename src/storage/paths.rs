// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Path utilities for the on-disk document layout.

use std::path::{Path, PathBuf};

use super::Collection;

/// Default base directory for persistent storage.
pub const DATA_ROOT: &str = "./data";

/// Storage path utilities for the file-backed document store.
///
/// ```text
/// {root}/
///   users/{user_id}.json
///   products/{product_id}.json
///   carts/{user_id}.json
///   wishlists/{user_id}.json
///   orders/{order_id}.json
///   categories/{category_id}.json
/// ```
#[derive(Debug, Clone)]
pub struct StoragePaths {
    root: PathBuf,
}

impl Default for StoragePaths {
    fn default() -> Self {
        Self::new(DATA_ROOT)
    }
}

impl StoragePaths {
    /// Create a new StoragePaths with a custom root (useful for testing).
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory for all data.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding one collection.
    pub fn collection_dir(&self, collection: Collection) -> PathBuf {
        self.root.join(collection.name())
    }

    /// Path to a single document file.
    pub fn document(&self, collection: Collection, id: &str) -> PathBuf {
        self.collection_dir(collection).join(format!("{id}.json"))
    }

    /// Scratch file used by one health check. `token` keeps concurrent
    /// checks from sharing a file.
    pub fn health_probe(&self, token: &str) -> PathBuf {
        self.root.join(format!(".health_check-{token}"))
    }
}
