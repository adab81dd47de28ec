// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Order placement and history.

use axum::{extract::State, Json};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    auth::Auth,
    error::{ApiError, ApiJson},
    models::{Order, OrderItem, ShippingAddress},
    state::AppState,
    storage::OrderRepository,
};

/// Items are priced by the client; the total is computed from them as sent.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub items: Vec<OrderItem>,
    #[schema(value_type = Object)]
    pub shipping_address: ShippingAddress,
}

#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "Orders",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The caller's orders", body = [Order]),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_orders(
    Auth(user): Auth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Order>>, ApiError> {
    Ok(Json(OrderRepository::new(state.store()).list_for_user(&user.id)?))
}

/// Place a pending order and empty the caller's cart.
#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "Orders",
    security(("bearer_auth" = [])),
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "Order created", body = Order),
        (status = 400, description = "Invalid order"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_order(
    Auth(user): Auth,
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateOrderRequest>,
) -> Result<Json<Order>, ApiError> {
    let order = OrderRepository::new(state.store()).create(
        &user.id,
        request.items,
        request.shipping_address,
    )?;
    Ok(Json(order))
}
