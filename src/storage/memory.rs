// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory document store.
//!
//! Used by tests and by `STORAGE_BACKEND=memory`. Nothing survives a restart.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use super::document::validate_id;
use super::{Collection, Document, DocumentStore, StorageError, StorageResult, UpdateFn};

#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, BTreeMap<String, Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryStore {
    fn find(&self, collection: Collection, id: &str) -> StorageResult<Option<Document>> {
        let collections = self.collections.read().map_err(|_| StorageError::Poisoned)?;
        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    fn insert(&self, collection: Collection, id: &str, document: Document) -> StorageResult<()> {
        validate_id(id)?;
        let mut collections = self.collections.write().map_err(|_| StorageError::Poisoned)?;
        let docs = collections.entry(collection).or_default();

        if docs.contains_key(id) {
            return Err(StorageError::AlreadyExists {
                collection,
                id: id.to_string(),
            });
        }
        docs.insert(id.to_string(), document);
        Ok(())
    }

    fn update(
        &self,
        collection: Collection,
        id: &str,
        apply: &mut UpdateFn<'_>,
    ) -> StorageResult<Option<Document>> {
        validate_id(id)?;
        let mut collections = self.collections.write().map_err(|_| StorageError::Poisoned)?;
        let docs = collections.entry(collection).or_default();
        let current = docs.get(id).cloned();

        match apply(current.clone())? {
            Some(next) => {
                docs.insert(id.to_string(), next.clone());
                Ok(Some(next))
            }
            None => Ok(current),
        }
    }

    fn scan(&self, collection: Collection) -> StorageResult<Vec<Document>> {
        let collections = self.collections.read().map_err(|_| StorageError::Poisoned)?;
        Ok(collections
            .get(&collection)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default())
    }

    fn count(&self, collection: Collection) -> StorageResult<usize> {
        let collections = self.collections.read().map_err(|_| StorageError::Poisoned)?;
        Ok(collections.get(&collection).map_or(0, BTreeMap::len))
    }

    fn health_check(&self) -> StorageResult<()> {
        self.collections
            .read()
            .map(|_| ())
            .map_err(|_| StorageError::Poisoned)
    }
}
