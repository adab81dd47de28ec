// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! PayPal checkout endpoints.
//!
//! The client creates a remote order for one of its pending orders, has the
//! buyer approve it on PayPal, then asks us to capture it. A successful
//! capture marks the local order paid.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::{IntoParams, ToSchema};

use crate::{
    auth::Auth,
    error::{ApiError, ApiQuery},
    state::AppState,
    storage::OrderRepository,
};

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CreateRemoteOrderQuery {
    /// Local order to pay for.
    pub order_id: String,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CaptureQuery {
    /// Remote order id returned by `create-order`.
    pub paypal_order_id: String,
    pub order_id: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RemoteOrderResponse {
    /// PayPal order id.
    pub id: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CaptureResponse {
    /// Always `"success"`.
    pub status: String,
    /// Stored on the order; equals the PayPal order id.
    pub payment_id: String,
    pub capture_id: String,
}

#[utoipa::path(
    post,
    path = "/api/paypal/create-order",
    tag = "Payments",
    security(("bearer_auth" = [])),
    params(CreateRemoteOrderQuery),
    responses(
        (status = 200, description = "Remote order created", body = RemoteOrderResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "PayPal error"),
        (status = 503, description = "PayPal integration not configured")
    )
)]
pub async fn create_remote_order(
    Auth(user): Auth,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<CreateRemoteOrderQuery>,
) -> Result<Json<RemoteOrderResponse>, ApiError> {
    let gateway = state.payments().gateway()?;
    let order = OrderRepository::new(state.store()).get_for_user(&query.order_id, &user.id)?;

    let id = gateway.create_remote_order(&order.id, order.total).await?;
    Ok(Json(RemoteOrderResponse { id }))
}

#[utoipa::path(
    post,
    path = "/api/paypal/capture-order",
    tag = "Payments",
    security(("bearer_auth" = [])),
    params(CaptureQuery),
    responses(
        (status = 200, description = "Payment captured", body = CaptureResponse),
        (status = 400, description = "Malformed PayPal order id"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "PayPal error"),
        (status = 503, description = "PayPal integration not configured")
    )
)]
pub async fn capture_remote_order(
    Auth(user): Auth,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<CaptureQuery>,
) -> Result<Json<CaptureResponse>, ApiError> {
    let capture_id = state
        .payments()
        .capture_remote_order(&query.paypal_order_id)
        .await?;

    let updated = OrderRepository::new(state.store()).mark_paid(
        &query.order_id,
        &user.id,
        &query.paypal_order_id,
    )?;
    if !updated {
        warn!(
            order_id = %query.order_id,
            user_id = %user.id,
            paypal_order_id = %query.paypal_order_id,
            "Captured payment did not match a pending order"
        );
    }

    Ok(Json(CaptureResponse {
        status: "success".to_string(),
        payment_id: query.paypal_order_id,
        capture_id,
    }))
}
