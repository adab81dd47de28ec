// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Shopping cart endpoints. Every route acts on the caller's own cart.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    auth::Auth,
    error::{ApiError, ApiJson, ApiQuery},
    models::CartView,
    state::AppState,
    storage::CartRepository,
};

fn default_quantity() -> i64 {
    1
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AddToCartRequest {
    pub product_id: String,
    /// Defaults to 1. Must be at least 1.
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct QuantityQuery {
    pub quantity: i64,
}

/// Plain acknowledgement returned by mutations.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Get the caller's cart with product details, creating it if needed.
#[utoipa::path(
    get,
    path = "/api/cart",
    tag = "Cart",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Cart contents", body = CartView),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_cart(
    Auth(user): Auth,
    State(state): State<AppState>,
) -> Result<Json<CartView>, ApiError> {
    Ok(Json(CartRepository::new(state.store()).view(&user.id)?))
}

/// Add a product, merging with an existing line for the same product.
#[utoipa::path(
    post,
    path = "/api/cart",
    tag = "Cart",
    security(("bearer_auth" = [])),
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Item added", body = MessageResponse),
        (status = 400, description = "Quantity below 1"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn add_to_cart(
    Auth(user): Auth,
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AddToCartRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    if request.quantity < 1 {
        return Err(ApiError::bad_request("Quantity must be at least 1"));
    }

    CartRepository::new(state.store()).add_item(&user.id, &request.product_id, request.quantity)?;
    Ok(Json(MessageResponse::new("Item added to cart")))
}

/// Set the quantity of an existing line. Unknown lines are ignored.
#[utoipa::path(
    put,
    path = "/api/cart/{product_id}",
    tag = "Cart",
    security(("bearer_auth" = [])),
    params(
        ("product_id" = String, Path, description = "Product ID"),
        QuantityQuery
    ),
    responses(
        (status = 200, description = "Cart updated", body = MessageResponse),
        (status = 400, description = "Missing or malformed quantity"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn update_cart_item(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    ApiQuery(query): ApiQuery<QuantityQuery>,
) -> Result<Json<MessageResponse>, ApiError> {
    CartRepository::new(state.store()).set_quantity(&user.id, &product_id, query.quantity)?;
    Ok(Json(MessageResponse::new("Cart updated")))
}

#[utoipa::path(
    delete,
    path = "/api/cart/{product_id}",
    tag = "Cart",
    security(("bearer_auth" = [])),
    params(
        ("product_id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Item removed", body = MessageResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn remove_from_cart(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    CartRepository::new(state.store()).remove_item(&user.id, &product_id)?;
    Ok(Json(MessageResponse::new("Item removed from cart")))
}
