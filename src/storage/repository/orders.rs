// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Order repository.
//!
//! Orders are written once and afterwards only move from `pending` to `paid`.
//! Item names and prices are snapshots supplied by the caller.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use super::{CartRepository, LIST_LIMIT};
use crate::error::ShopError;
use crate::models::{Order, OrderItem, OrderStatus, ShippingAddress};
use crate::storage::{Collection, DocumentStore, DocumentStoreExt};

/// Sum of `price * quantity` over the items exactly as the client sent them.
///
/// Prices are not checked against the catalog. Swap this out to recompute
/// totals from live product prices.
pub fn total_from_client_prices(items: &[OrderItem]) -> Result<Decimal, ShopError> {
    items.iter().try_fold(Decimal::ZERO, |total, item| {
        item.price
            .checked_mul(Decimal::from(item.quantity))
            .and_then(|line| total.checked_add(line))
            .ok_or_else(|| ShopError::validation("Order total out of range"))
    })
}

pub struct OrderRepository<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> OrderRepository<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Persist a new pending order and empty the user's cart.
    ///
    /// The cart is cleared after the order is stored; a failure there is
    /// logged and does not fail the order.
    pub fn create(
        &self,
        user_id: &str,
        items: Vec<OrderItem>,
        shipping_address: ShippingAddress,
    ) -> Result<Order, ShopError> {
        let order = Order {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            total: total_from_client_prices(&items)?,
            items,
            status: OrderStatus::Pending,
            payment_id: None,
            shipping_address,
            created_at: Utc::now(),
        };
        self.store.insert_as(Collection::Orders, &order.id, &order)?;

        info!(order_id = %order.id, user_id, total = %order.total, "Order created");

        if let Err(e) = CartRepository::new(self.store).clear(user_id) {
            warn!(user_id, error = %e, "Failed to clear cart after order creation");
        }

        Ok(order)
    }

    pub fn list_for_user(&self, user_id: &str) -> Result<Vec<Order>, ShopError> {
        let orders: Vec<Order> = self.store.scan_as(Collection::Orders)?;
        Ok(orders
            .into_iter()
            .filter(|order| order.user_id == user_id)
            .take(LIST_LIMIT)
            .collect())
    }

    /// Fetch an order owned by `user_id`. Orders of other users are reported
    /// as missing.
    pub fn get_for_user(&self, order_id: &str, user_id: &str) -> Result<Order, ShopError> {
        self.store
            .find_as::<Order>(Collection::Orders, order_id)?
            .filter(|order| order.user_id == user_id)
            .ok_or(ShopError::OrderNotFound)
    }

    /// Move a pending order owned by `user_id` to `paid`.
    ///
    /// Returns `false` without touching anything when the order is missing,
    /// owned by someone else, or no longer pending.
    pub fn mark_paid(
        &self,
        order_id: &str,
        user_id: &str,
        payment_id: &str,
    ) -> Result<bool, ShopError> {
        let mut transitioned = false;
        self.store
            .update_as(Collection::Orders, order_id, |current: Option<Order>| {
                let mut order = current?;
                if order.user_id != user_id || order.status != OrderStatus::Pending {
                    return None;
                }
                order.status = OrderStatus::Paid;
                order.payment_id = Some(payment_id.to_string());
                transitioned = true;
                Some(order)
            })?;

        if transitioned {
            info!(order_id, user_id, payment_id, "Order marked paid");
        }
        Ok(transitioned)
    }
}
