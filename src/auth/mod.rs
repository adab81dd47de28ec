// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Account management and bearer-token sessions for the shop API.
//!
//! ## Auth Flow
//!
//! 1. Client registers or logs in via `/api/auth/*`
//! 2. Server returns a signed session token (`access_token`)
//! 3. Client sends `Authorization: Bearer <token>` on protected routes
//! 4. Server:
//!    - Verifies the token signature and expiry
//!    - Loads the user named by `sub`
//!    - Checks capabilities for privileged routes
//!
//! ## Security
//!
//! - Passwords are stored as salted Argon2id hashes
//! - Tokens are HS256 JWTs valid for 7 days, with no revocation
//! - Login failures never reveal whether the email exists

pub mod directory;
pub mod error;
pub mod extractor;
pub mod password;
pub mod policy;
pub mod session;

pub use directory::UserDirectory;
pub use error::AuthError;
pub use extractor::Auth;
pub use policy::{AccessPolicy, AllowAllPolicy, Capability};
pub use session::SessionIssuer;
