// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::ApiError,
    state::AppState,
    storage::{CatalogRepository, SeedOutcome},
};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SeedResponse {
    pub message: String,
    /// Number of products inserted. Absent when nothing was seeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<usize>,
}

/// Load the demo catalog unless products already exist.
#[utoipa::path(
    post,
    path = "/api/seed",
    tag = "Catalog",
    responses(
        (status = 200, description = "Seeded, or already seeded", body = SeedResponse)
    )
)]
pub async fn seed(State(state): State<AppState>) -> Result<Json<SeedResponse>, ApiError> {
    let response = match CatalogRepository::new(state.store()).seed()? {
        SeedOutcome::AlreadySeeded => SeedResponse {
            message: "Database already seeded".to_string(),
            products: None,
            categories: None,
        },
        SeedOutcome::Seeded {
            products,
            categories,
        } => SeedResponse {
            message: "Database seeded successfully".to_string(),
            products: Some(products),
            categories: Some(categories),
        },
    };
    Ok(Json(response))
}
