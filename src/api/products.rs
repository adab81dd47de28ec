// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Catalog browsing and product creation.
//!
//! Reads are public. Creating a product requires a session and the
//! `ManageCatalog` capability.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    auth::{Auth, Capability},
    error::{ApiError, ApiJson, ApiQuery},
    models::{Category, NewProduct, Product, ProductFilter},
    state::AppState,
    storage::CatalogRepository,
};

/// List products, optionally filtered by category and featured flag.
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Catalog",
    params(ProductFilter),
    responses(
        (status = 200, description = "Matching products", body = [Product]),
        (status = 400, description = "Malformed query")
    )
)]
pub async fn list_products(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<ProductFilter>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = CatalogRepository::new(state.store()).list(&filter)?;
    Ok(Json(products))
}

#[utoipa::path(
    get,
    path = "/api/products/{product_id}",
    tag = "Catalog",
    params(
        ("product_id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product details", body = Product),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let product = CatalogRepository::new(state.store()).get(&product_id)?;
    Ok(Json(product))
}

#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    request_body = NewProduct,
    responses(
        (status = 200, description = "Product created", body = Product),
        (status = 400, description = "Invalid product"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not allowed to manage the catalog")
    )
)]
pub async fn create_product(
    Auth(user): Auth,
    State(state): State<AppState>,
    ApiJson(fields): ApiJson<NewProduct>,
) -> Result<Json<Product>, ApiError> {
    state.policy().require(&user, Capability::ManageCatalog)?;
    let product = CatalogRepository::new(state.store()).create(fields)?;
    Ok(Json(product))
}

#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "Catalog",
    responses(
        (status = 200, description = "All categories", body = [Category])
    )
)]
pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>, ApiError> {
    let categories = CatalogRepository::new(state.store()).list_categories()?;
    Ok(Json(categories))
}
