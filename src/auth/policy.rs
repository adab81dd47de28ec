// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Capability checks for privileged operations.
//!
//! Handlers ask the configured [`AccessPolicy`] before performing a guarded
//! operation. The shipped policy allows every authenticated user; a role
//! system can replace it without touching call sites.

use super::AuthError;
use crate::models::User;

/// Operations that may be restricted to some users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Create catalog products.
    ManageCatalog,
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Capability::ManageCatalog => write!(f, "manage_catalog"),
        }
    }
}

pub trait AccessPolicy: Send + Sync {
    fn allows(&self, user: &User, capability: Capability) -> bool;

    /// `InsufficientPermissions` unless `user` holds `capability`.
    fn require(&self, user: &User, capability: Capability) -> Result<(), AuthError> {
        if self.allows(user, capability) {
            Ok(())
        } else {
            tracing::warn!(user_id = %user.id, %capability, "Capability denied");
            Err(AuthError::InsufficientPermissions)
        }
    }
}

/// Grants every capability to every authenticated user.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAllPolicy;

impl AccessPolicy for AllowAllPolicy {
    fn allows(&self, _user: &User, _capability: Capability) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    struct DenyAll;

    impl AccessPolicy for DenyAll {
        fn allows(&self, _user: &User, _capability: Capability) -> bool {
            false
        }
    }

    fn user() -> User {
        User {
            id: "u-1".into(),
            email: "a@example.com".into(),
            name: "Ada".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn allow_all_permits_catalog_management() {
        assert!(AllowAllPolicy.require(&user(), Capability::ManageCatalog).is_ok());
    }

    #[test]
    fn denial_maps_to_insufficient_permissions() {
        assert!(matches!(
            DenyAll.require(&user(), Capability::ManageCatalog),
            Err(AuthError::InsufficientPermissions)
        ));
    }
}
