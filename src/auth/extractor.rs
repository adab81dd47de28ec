// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor for authenticated users.
//!
//! Use the `Auth` extractor in handlers to require authentication:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(user): Auth) -> impl IntoResponse {
//!     // user is the caller's public User record
//! }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use super::{AuthError, UserDirectory};
use crate::error::ShopError;
use crate::models::User;
use crate::state::AppState;

/// Extractor for authenticated users.
///
/// Validates the bearer token from the `Authorization` header with the
/// session issuer and loads the user it names.
///
/// # Example
///
/// ```rust,ignore
/// async fn get_cart(
///     Auth(user): Auth,
///     State(state): State<AppState>,
/// ) -> Result<Json<CartView>, ApiError> {
///     // user.id is the authenticated user's id
/// }
/// ```
pub struct Auth(pub User);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingAuthHeader)?
            .to_str()
            .map_err(|_| AuthError::InvalidAuthHeader)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::InvalidAuthHeader)?;

        let user_id = state.sessions().validate(token)?;

        let user = UserDirectory::new(state.store())
            .resolve(&user_id)
            .map_err(|e| match e {
                ShopError::UserNotFound => AuthError::UserNotFound,
                other => AuthError::InternalError(other.to_string()),
            })?;

        Ok(Auth(user))
    }
}
