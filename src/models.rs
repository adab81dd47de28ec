// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Domain Models
//!
//! Documents persisted in the store and the shapes returned by the API. All
//! public types derive `Serialize`, `Deserialize`, and `ToSchema` for JSON
//! handling and OpenAPI documentation.
//!
//! ## Money
//!
//! Prices and totals are [`Decimal`] values serialized as JSON numbers, so
//! `10.00 * 2` is exactly `20.00`.
//!
//! ## Model Categories
//!
//! - **Users**: stored records (with password hash) and the public view
//! - **Catalog**: products and categories
//! - **Cart / Wishlist**: per-user documents keyed by user id
//! - **Orders**: immutable price snapshots with a status

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::{IntoParams, ToSchema};

// =============================================================================
// Users
// =============================================================================

/// User document as persisted. Never returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Public view of a user account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            email: record.email,
            name: record.name,
            created_at: record.created_at,
        }
    }
}

// =============================================================================
// Catalog
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub category: String,
    pub stock: u32,
    /// Image URI.
    pub image: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub age_range: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when creating a product.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub category: String,
    pub stock: u32,
    pub image: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub age_range: Option<String>,
}

impl NewProduct {
    pub fn into_product(self, id: String, created_at: DateTime<Utc>) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            stock: self.stock,
            image: self.image,
            featured: self.featured,
            age_range: self.age_range,
            created_at,
        }
    }
}

/// Query filter for product listings. Absent fields match everything.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductFilter {
    /// Exact category name. An empty value is ignored.
    pub category: Option<String>,
    pub featured: Option<bool>,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        let category_ok = match self.category.as_deref() {
            Some(category) if !category.is_empty() => product.category == category,
            _ => true,
        };
        let featured_ok = self.featured.is_none_or(|featured| product.featured == featured);
        category_ok && featured_ok
    }
}

/// Static catalog reference data.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub image: String,
}

// =============================================================================
// Cart
// =============================================================================

/// One cart line as stored.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct CartLine {
    pub product_id: String,
    pub quantity: i64,
}

/// Cart document, one per user, keyed by user id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    pub user_id: String,
    #[serde(default)]
    pub items: Vec<CartLine>,
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    pub fn empty(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            items: Vec::new(),
            updated_at: Utc::now(),
        }
    }
}

/// Cart line with live product details.
///
/// `product` is absent when the referenced product no longer exists.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CartItemView {
    pub product_id: String,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CartView {
    pub user_id: String,
    pub items: Vec<CartItemView>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Wishlist
// =============================================================================

/// Wishlist document, one per user, keyed by user id. `items` holds no
/// duplicate product ids.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Wishlist {
    pub user_id: String,
    #[serde(default)]
    pub items: Vec<String>,
}

impl Wishlist {
    pub fn empty(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            items: Vec::new(),
        }
    }
}

/// Wishlist with the product details of ids that still resolve.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct WishlistView {
    pub user_id: String,
    pub items: Vec<String>,
    pub products: Vec<Product>,
}

// =============================================================================
// Orders
// =============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Paid,
    Shipped,
    Delivered,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::Paid => write!(f, "paid"),
            OrderStatus::Shipped => write!(f, "shipped"),
            OrderStatus::Delivered => write!(f, "delivered"),
        }
    }
}

/// Name and price snapshot captured when the order is placed.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct OrderItem {
    pub product_id: String,
    pub name: String,
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub quantity: i64,
}

/// Free-form shipping address as supplied by the client.
pub type ShippingAddress = Map<String, Value>;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub items: Vec<OrderItem>,
    /// Frozen at creation time.
    #[schema(value_type = f64)]
    pub total: Decimal,
    pub status: OrderStatus,
    pub payment_id: Option<String>,
    #[schema(value_type = Object)]
    pub shipping_address: ShippingAddress,
    pub created_at: DateTime<Utc>,
}
