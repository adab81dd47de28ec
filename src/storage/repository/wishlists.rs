// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wishlist repository. One document per user holding a set of product ids.

use super::CatalogRepository;
use crate::error::ShopError;
use crate::models::{Wishlist, WishlistView};
use crate::storage::{Collection, DocumentStore, DocumentStoreExt};

pub struct WishlistRepository<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> WishlistRepository<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    pub fn get_or_create(&self, user_id: &str) -> Result<Wishlist, ShopError> {
        if let Some(wishlist) = self
            .store
            .find_as::<Wishlist>(Collection::Wishlists, user_id)?
        {
            return Ok(wishlist);
        }

        let wishlist = self.store.update_as(
            Collection::Wishlists,
            user_id,
            |current: Option<Wishlist>| match current {
                Some(_) => None,
                None => Some(Wishlist::empty(user_id)),
            },
        )?;
        Ok(wishlist.unwrap_or_else(|| Wishlist::empty(user_id)))
    }

    /// Stored ids plus details of the products that still exist.
    pub fn view(&self, user_id: &str) -> Result<WishlistView, ShopError> {
        let wishlist = self.get_or_create(user_id)?;
        let catalog = CatalogRepository::new(self.store);

        let mut products = Vec::with_capacity(wishlist.items.len());
        for product_id in &wishlist.items {
            if let Some(product) = catalog.find(product_id)? {
                products.push(product);
            }
        }

        Ok(WishlistView {
            user_id: wishlist.user_id,
            items: wishlist.items,
            products,
        })
    }

    /// Add a product id. Already present ids are left as they are.
    pub fn add(&self, user_id: &str, product_id: &str) -> Result<(), ShopError> {
        CatalogRepository::new(self.store).get(product_id)?;

        self.store.update_as(
            Collection::Wishlists,
            user_id,
            |current: Option<Wishlist>| {
                let mut wishlist = current.unwrap_or_else(|| Wishlist::empty(user_id));
                if wishlist.items.iter().any(|id| id == product_id) {
                    return None;
                }
                wishlist.items.push(product_id.to_string());
                Some(wishlist)
            },
        )?;
        Ok(())
    }

    pub fn remove(&self, user_id: &str, product_id: &str) -> Result<(), ShopError> {
        self.store.update_as(
            Collection::Wishlists,
            user_id,
            |current: Option<Wishlist>| {
                let mut wishlist = current?;
                let before = wishlist.items.len();
                wishlist.items.retain(|id| id != product_id);
                (wishlist.items.len() != before).then_some(wishlist)
            },
        )?;
        Ok(())
    }
}
