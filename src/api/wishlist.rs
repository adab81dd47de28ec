// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{Path, State},
    Json,
};

use super::cart::MessageResponse;
use crate::{
    auth::Auth, error::ApiError, models::WishlistView, state::AppState,
    storage::WishlistRepository,
};

#[utoipa::path(
    get,
    path = "/api/wishlist",
    tag = "Wishlist",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Wishlist with product details", body = WishlistView),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_wishlist(
    Auth(user): Auth,
    State(state): State<AppState>,
) -> Result<Json<WishlistView>, ApiError> {
    Ok(Json(WishlistRepository::new(state.store()).view(&user.id)?))
}

#[utoipa::path(
    post,
    path = "/api/wishlist/{product_id}",
    tag = "Wishlist",
    security(("bearer_auth" = [])),
    params(
        ("product_id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Item added", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn add_to_wishlist(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    WishlistRepository::new(state.store()).add(&user.id, &product_id)?;
    Ok(Json(MessageResponse::new("Item added to wishlist")))
}

#[utoipa::path(
    delete,
    path = "/api/wishlist/{product_id}",
    tag = "Wishlist",
    security(("bearer_auth" = [])),
    params(
        ("product_id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Item removed", body = MessageResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn remove_from_wishlist(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    WishlistRepository::new(state.store()).remove(&user.id, &product_id)?;
    Ok(Json(MessageResponse::new("Item removed from wishlist")))
}
