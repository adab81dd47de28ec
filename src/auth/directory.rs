// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User directory: registration, login and identity resolution.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use super::password::{hash_password, verify_password};
use crate::error::ShopError;
use crate::models::{User, UserRecord};
use crate::storage::{DocumentStore, UserRepository};

pub struct UserDirectory<'a> {
    users: UserRepository<'a>,
}

impl<'a> UserDirectory<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self {
            users: UserRepository::new(store),
        }
    }

    /// Create an account. Emails are compared exactly, without normalization.
    ///
    /// The uniqueness check and the insert are separate store calls, so two
    /// simultaneous registrations of one email can both succeed.
    pub fn register(&self, email: &str, name: &str, password: &str) -> Result<User, ShopError> {
        if !is_plausible_email(email) {
            return Err(ShopError::validation("Invalid email address"));
        }
        if name.trim().is_empty() {
            return Err(ShopError::validation("Name must not be empty"));
        }
        if password.is_empty() {
            return Err(ShopError::validation("Password must not be empty"));
        }

        if self.users.find_by_email(email)?.is_some() {
            return Err(ShopError::EmailAlreadyRegistered);
        }

        let record = UserRecord {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            name: name.to_string(),
            password_hash: hash_password(password)?,
            created_at: Utc::now(),
        };
        self.users.insert(&record)?;

        info!(user_id = %record.id, "User registered");
        Ok(record.into())
    }

    /// Check credentials. Unknown email and wrong password fail the same way.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<User, ShopError> {
        let record = self
            .users
            .find_by_email(email)?
            .ok_or(ShopError::InvalidCredentials)?;

        if !verify_password(password, &record.password_hash) {
            return Err(ShopError::InvalidCredentials);
        }
        Ok(record.into())
    }

    pub fn resolve(&self, user_id: &str) -> Result<User, ShopError> {
        self.users
            .get(user_id)?
            .map(User::from)
            .ok_or(ShopError::UserNotFound)
    }
}

fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
}
