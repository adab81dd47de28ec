// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Catalog repository: products, categories and the demo seed data.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use super::LIST_LIMIT;
use crate::error::ShopError;
use crate::models::{Category, NewProduct, Product, ProductFilter};
use crate::storage::{Collection, DocumentStore, DocumentStoreExt};

/// Maximum number of categories returned by [`CatalogRepository::list_categories`].
pub const CATEGORY_LIMIT: usize = 100;

/// Result of [`CatalogRepository::seed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    AlreadySeeded,
    Seeded { products: usize, categories: usize },
}

pub struct CatalogRepository<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> CatalogRepository<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Products matching `filter`, in store order.
    pub fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, ShopError> {
        let products: Vec<Product> = self.store.scan_as(Collection::Products)?;
        Ok(products
            .into_iter()
            .filter(|product| filter.matches(product))
            .take(LIST_LIMIT)
            .collect())
    }

    /// Look up a product, `None` if it does not exist.
    pub fn find(&self, product_id: &str) -> Result<Option<Product>, ShopError> {
        Ok(self.store.find_as(Collection::Products, product_id)?)
    }

    pub fn get(&self, product_id: &str) -> Result<Product, ShopError> {
        self.find(product_id)?.ok_or(ShopError::ProductNotFound)
    }

    pub fn create(&self, fields: NewProduct) -> Result<Product, ShopError> {
        if fields.price < Decimal::ZERO {
            return Err(ShopError::validation("Price must not be negative"));
        }

        let product = fields.into_product(Uuid::new_v4().to_string(), Utc::now());
        self.store
            .insert_as(Collection::Products, &product.id, &product)?;

        info!(product_id = %product.id, name = %product.name, "Product created");
        Ok(product)
    }

    pub fn count_products(&self) -> Result<usize, ShopError> {
        Ok(self.store.count(Collection::Products)?)
    }

    pub fn list_categories(&self) -> Result<Vec<Category>, ShopError> {
        let mut categories: Vec<Category> = self.store.scan_as(Collection::Categories)?;
        categories.truncate(CATEGORY_LIMIT);
        Ok(categories)
    }

    /// Populate the demo catalog. A no-op once any product exists.
    pub fn seed(&self) -> Result<SeedOutcome, ShopError> {
        if self.count_products()? > 0 {
            return Ok(SeedOutcome::AlreadySeeded);
        }

        let categories = seed_categories();
        for category in &categories {
            self.store
                .insert_as(Collection::Categories, &category.id, category)?;
        }

        let now = Utc::now();
        let products = seed_products();
        for fields in &products {
            let product = fields.clone().into_product(Uuid::new_v4().to_string(), now);
            self.store
                .insert_as(Collection::Products, &product.id, &product)?;
        }

        info!(
            products = products.len(),
            categories = categories.len(),
            "Catalog seeded"
        );
        Ok(SeedOutcome::Seeded {
            products: products.len(),
            categories: categories.len(),
        })
    }
}

fn seed_categories() -> Vec<Category> {
    [
        ("Educational", "https://images.unsplash.com/photo-1637728225412-6210ff05c6f4?w=400"),
        ("Outdoor", "https://images.unsplash.com/photo-1545558014-8692077e9b5c?w=400"),
        ("Puzzles", "https://images.unsplash.com/photo-1587731556938-38755b4803a6?w=400"),
        ("Dolls", "https://images.pexels.com/photos/31061855/pexels-photo-31061855.jpeg?w=400"),
        ("Building Blocks", "https://images.unsplash.com/photo-1587654780291-39c9404d746b?w=400"),
        ("Action Figures", "https://images.unsplash.com/photo-1579946081291-b5c0ecea3e49?w=400"),
    ]
    .into_iter()
    .map(|(name, image)| Category {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        image: image.to_string(),
    })
    .collect()
}

fn seed_products() -> Vec<NewProduct> {
    #[rustfmt::skip]
    let rows: [(&str, &str, i64, &str, u32, &str, bool, &str); 8] = [
        ("Wooden Alphabet Blocks", "Classic wooden blocks with letters and numbers for early learning",
            2499, "Educational", 50, "https://images.unsplash.com/photo-1587654780291-39c9404d746b?w=500", true, "2-5 years"),
        ("Rainbow Stacking Rings", "Colorful stacking rings to develop motor skills and color recognition",
            1899, "Educational", 75, "https://images.unsplash.com/photo-1587731556938-38755b4803a6?w=500", true, "0-3 years"),
        ("Building Blocks Set", "100-piece colorful building blocks for creative construction",
            3499, "Building Blocks", 60, "https://images.unsplash.com/photo-1558060370-d644479cb6f7?w=500", true, "3-8 years"),
        ("Jigsaw Puzzle 100 Pieces", "Colorful jigsaw puzzle featuring animals and nature",
            1599, "Puzzles", 100, "https://images.unsplash.com/photo-1578662996442-48f60103fc96?w=500", false, "5-8 years"),
        ("Plush Teddy Bear", "Soft and cuddly teddy bear, perfect companion for kids",
            2299, "Dolls", 80, "https://images.pexels.com/photos/31061855/pexels-photo-31061855.jpeg?w=500", true, "0-5 years"),
        ("Outdoor Soccer Ball", "Durable soccer ball for outdoor play and sports",
            1999, "Outdoor", 45, "https://images.unsplash.com/photo-1614632537423-1e6c2e7e0aac?w=500", false, "6-12 years"),
        ("Art & Craft Kit", "Complete art set with paints, brushes, and canvas",
            2999, "Educational", 40, "https://images.unsplash.com/photo-1513542789411-b6a5d4f31634?w=500", false, "4-10 years"),
        ("Musical Xylophone", "Colorful wooden xylophone with 8 notes for musical exploration",
            2699, "Educational", 55, "https://images.unsplash.com/photo-1621111848501-8d3634f82336?w=500", true, "2-6 years"),
    ];

    rows.into_iter()
        .map(
            |(name, description, cents, category, stock, image, featured, age_range)| NewProduct {
                name: name.to_string(),
                description: description.to_string(),
                price: Decimal::new(cents, 2),
                category: category.to_string(),
                stock,
                image: image.to_string(),
                featured,
                age_range: Some(age_range.to_string()),
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn new_product(name: &str, category: &str, featured: bool) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: "A toy".to_string(),
            price: Decimal::new(1000, 2),
            category: category.to_string(),
            stock: 5,
            image: "https://example.com/toy.png".to_string(),
            featured,
            age_range: None,
        }
    }

    #[test]
    fn create_assigns_id_and_get_finds_it() {
        let store = MemoryStore::new();
        let catalog = CatalogRepository::new(&store);

        let created = catalog.create(new_product("Kite", "Outdoor", false)).unwrap();
        assert!(!created.id.is_empty());
        assert_eq!(catalog.get(&created.id).unwrap(), created);
    }

    #[test]
    fn get_missing_product_fails() {
        let store = MemoryStore::new();
        let catalog = CatalogRepository::new(&store);
        assert!(matches!(
            catalog.get("missing"),
            Err(ShopError::ProductNotFound)
        ));
    }

    #[test]
    fn create_rejects_negative_price() {
        let store = MemoryStore::new();
        let catalog = CatalogRepository::new(&store);
        let mut fields = new_product("Kite", "Outdoor", false);
        fields.price = Decimal::new(-1, 0);

        assert!(matches!(
            catalog.create(fields),
            Err(ShopError::Validation(_))
        ));
        assert_eq!(catalog.count_products().unwrap(), 0);
    }

    #[test]
    fn list_applies_category_and_featured_filters() {
        let store = MemoryStore::new();
        let catalog = CatalogRepository::new(&store);
        catalog.create(new_product("Kite", "Outdoor", true)).unwrap();
        catalog.create(new_product("Ball", "Outdoor", false)).unwrap();
        catalog.create(new_product("Puzzle", "Puzzles", true)).unwrap();

        let all = catalog.list(&ProductFilter::default()).unwrap();
        assert_eq!(all.len(), 3);

        let outdoor = catalog
            .list(&ProductFilter {
                category: Some("Outdoor".into()),
                featured: None,
            })
            .unwrap();
        assert_eq!(outdoor.len(), 2);

        let featured_outdoor = catalog
            .list(&ProductFilter {
                category: Some("Outdoor".into()),
                featured: Some(true),
            })
            .unwrap();
        assert_eq!(featured_outdoor.len(), 1);
        assert_eq!(featured_outdoor[0].name, "Kite");

        let empty_category = catalog
            .list(&ProductFilter {
                category: Some(String::new()),
                featured: Some(false),
            })
            .unwrap();
        assert_eq!(empty_category.len(), 1);
        assert_eq!(empty_category[0].name, "Ball");
    }

    #[test]
    fn seed_is_idempotent() {
        let store = MemoryStore::new();
        let catalog = CatalogRepository::new(&store);

        assert_eq!(
            catalog.seed().unwrap(),
            SeedOutcome::Seeded {
                products: 8,
                categories: 6
            }
        );
        let first: Vec<String> = catalog
            .list(&ProductFilter::default())
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();

        assert_eq!(catalog.seed().unwrap(), SeedOutcome::AlreadySeeded);
        let second: Vec<String> = catalog
            .list(&ProductFilter::default())
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();

        assert_eq!(first, second);
        assert_eq!(catalog.list_categories().unwrap().len(), 6);
    }

    #[test]
    fn seed_skips_when_products_already_exist() {
        let store = MemoryStore::new();
        let catalog = CatalogRepository::new(&store);
        catalog.create(new_product("Kite", "Outdoor", false)).unwrap();

        assert_eq!(catalog.seed().unwrap(), SeedOutcome::AlreadySeeded);
        assert_eq!(catalog.count_products().unwrap(), 1);
        assert!(catalog.list_categories().unwrap().is_empty());
    }

    #[test]
    fn seeded_prices_are_exact() {
        let store = MemoryStore::new();
        let catalog = CatalogRepository::new(&store);
        catalog.seed().unwrap();

        let blocks = catalog
            .list(&ProductFilter::default())
            .unwrap()
            .into_iter()
            .find(|p| p.name == "Wooden Alphabet Blocks")
            .unwrap();
        assert_eq!(blocks.price, Decimal::new(2499, 2));
        assert_eq!(blocks.age_range.as_deref(), Some("2-5 years"));
    }
}
