// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Cart repository.
//!
//! One cart document per user, keyed by the user id and created on first
//! access. Each mutation is a single atomic `update` of that document.

use chrono::Utc;

use super::CatalogRepository;
use crate::error::ShopError;
use crate::models::{Cart, CartItemView, CartLine, CartView};
use crate::storage::{Collection, DocumentStore, DocumentStoreExt};

pub struct CartRepository<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> CartRepository<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Load the user's cart, creating an empty one if none exists.
    pub fn get_or_create(&self, user_id: &str) -> Result<Cart, ShopError> {
        if let Some(cart) = self.store.find_as::<Cart>(Collection::Carts, user_id)? {
            return Ok(cart);
        }

        let cart = self
            .store
            .update_as(Collection::Carts, user_id, |current: Option<Cart>| {
                match current {
                    Some(_) => None,
                    None => Some(Cart::empty(user_id)),
                }
            })?;
        Ok(cart.unwrap_or_else(|| Cart::empty(user_id)))
    }

    /// The user's cart with live product details attached to each line.
    ///
    /// Lines whose product no longer exists are returned without details.
    pub fn view(&self, user_id: &str) -> Result<CartView, ShopError> {
        let cart = self.get_or_create(user_id)?;
        let catalog = CatalogRepository::new(self.store);

        let items = cart
            .items
            .into_iter()
            .map(|line| {
                let product = catalog.find(&line.product_id)?;
                Ok(CartItemView {
                    product_id: line.product_id,
                    quantity: line.quantity,
                    product,
                })
            })
            .collect::<Result<Vec<_>, ShopError>>()?;

        Ok(CartView {
            user_id: cart.user_id,
            items,
            updated_at: cart.updated_at,
        })
    }

    /// Add `quantity` of a product, merging with an existing line.
    pub fn add_item(
        &self,
        user_id: &str,
        product_id: &str,
        quantity: i64,
    ) -> Result<Cart, ShopError> {
        CatalogRepository::new(self.store).get(product_id)?;

        let cart = self
            .store
            .update_as(Collection::Carts, user_id, |current: Option<Cart>| {
                let mut cart = current.unwrap_or_else(|| Cart::empty(user_id));
                match cart.items.iter_mut().find(|line| line.product_id == product_id) {
                    Some(line) => line.quantity = line.quantity.saturating_add(quantity),
                    None => cart.items.push(CartLine {
                        product_id: product_id.to_string(),
                        quantity,
                    }),
                }
                cart.updated_at = Utc::now();
                Some(cart)
            })?;
        Ok(cart.unwrap_or_else(|| Cart::empty(user_id)))
    }

    /// Replace the quantity of an existing line. Missing carts and lines are
    /// left untouched; the quantity is stored as given.
    pub fn set_quantity(
        &self,
        user_id: &str,
        product_id: &str,
        quantity: i64,
    ) -> Result<(), ShopError> {
        self.store
            .update_as(Collection::Carts, user_id, |current: Option<Cart>| {
                let mut cart = current?;
                if let Some(line) = cart.items.iter_mut().find(|line| line.product_id == product_id)
                {
                    line.quantity = quantity;
                }
                cart.updated_at = Utc::now();
                Some(cart)
            })?;
        Ok(())
    }

    /// Drop a line if present.
    pub fn remove_item(&self, user_id: &str, product_id: &str) -> Result<(), ShopError> {
        self.store
            .update_as(Collection::Carts, user_id, |current: Option<Cart>| {
                let mut cart = current?;
                cart.items.retain(|line| line.product_id != product_id);
                cart.updated_at = Utc::now();
                Some(cart)
            })?;
        Ok(())
    }

    /// Empty the cart, keeping the document.
    pub fn clear(&self, user_id: &str) -> Result<(), ShopError> {
        self.store
            .update_as(Collection::Carts, user_id, |current: Option<Cart>| {
                let mut cart = current?;
                cart.items.clear();
                cart.updated_at = Utc::now();
                Some(cart)
            })?;
        Ok(())
    }
}
