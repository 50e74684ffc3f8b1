//! In-memory catalog loaded from a JSON seed file.
//!
//! The seed file has two collections:
//!
//! ```json
//! {
//!   "stock": [{ "id": 1, "amount": 3 }],
//!   "products": [{ "id": 1, "title": "Tênis de Caminhada", "price": 179.9, "image": "..." }]
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use rocket_shoes_core::{Product, ProductId, StockRecord};
use serde::Deserialize;
use thiserror::Error;

/// Errors loading the seed file.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate {collection} record for product {id}")]
    DuplicateId {
        collection: &'static str,
        id: ProductId,
    },
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    stock: Vec<StockRecord>,
    #[serde(default)]
    products: Vec<Product>,
}

/// Stock and product records keyed by product id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    stock: BTreeMap<ProductId, StockRecord>,
    products: BTreeMap<ProductId, Product>,
}

impl Catalog {
    /// Load a catalog from a seed file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the file cannot be read, is not valid JSON,
    /// or repeats an id within a collection.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parse a catalog from seed JSON.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the JSON is invalid or repeats an id within
    /// a collection.
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(text)?;

        let mut catalog = Self::default();
        for record in file.stock {
            if catalog.stock.insert(record.id, record).is_some() {
                return Err(CatalogError::DuplicateId {
                    collection: "stock",
                    id: record.id,
                });
            }
        }
        for product in file.products {
            let id = product.id;
            if catalog.products.insert(id, product).is_some() {
                return Err(CatalogError::DuplicateId {
                    collection: "products",
                    id,
                });
            }
        }

        Ok(catalog)
    }

    #[must_use]
    pub fn stock(&self, id: ProductId) -> Option<StockRecord> {
        self.stock.get(&id).copied()
    }

    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.get(&id)
    }

    /// All stock records, ordered by id.
    pub fn all_stock(&self) -> impl Iterator<Item = &StockRecord> {
        self.stock.values()
    }

    /// All products, ordered by id.
    pub fn all_products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }
}
