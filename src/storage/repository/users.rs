// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User repository.
//!
//! User documents are keyed by their generated id. Email lookups scan the
//! collection; there is no secondary index.

use crate::error::ShopError;
use crate::models::UserRecord;
use crate::storage::{Collection, DocumentStore, DocumentStoreExt, StorageError};

pub struct UserRepository<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> UserRepository<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    pub fn insert(&self, user: &UserRecord) -> Result<(), ShopError> {
        match self.store.insert_as(Collection::Users, &user.id, user) {
            Ok(()) => Ok(()),
            Err(StorageError::AlreadyExists { .. }) => Err(ShopError::EmailAlreadyRegistered),
            Err(e) => Err(e.into()),
        }
    }

    pub fn get(&self, user_id: &str) -> Result<Option<UserRecord>, ShopError> {
        Ok(self.store.find_as(Collection::Users, user_id)?)
    }

    /// Exact, case-sensitive email match.
    pub fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, ShopError> {
        let users: Vec<UserRecord> = self.store.scan_as(Collection::Users)?;
        Ok(users.into_iter().find(|user| user.email == email))
    }
}
