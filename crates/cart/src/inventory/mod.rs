//! Stock and product lookups.
//!
//! The cart store only needs two reads from the catalog, both by product
//! id. [`Inventory`] is the seam; [`InventoryClient`] talks to the HTTP
//! inventory API.

mod client;

use std::sync::Arc;

use async_trait::async_trait;
use rocket_shoes_core::{Product, ProductId, StockRecord};
use thiserror::Error;

pub use client::InventoryClient;

/// Errors that can occur when querying the inventory.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {path}{}", request_suffix(.request_id.as_deref()))]
    NotFound {
        path: String,
        /// Correlation id the API answered with, if any.
        request_id: Option<String>,
    },

    /// Endpoint URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Non-success response other than 404.
    #[error("Unexpected status {status}: {body}{}", request_suffix(.request_id.as_deref()))]
    Status {
        status: u16,
        body: String,
        request_id: Option<String>,
    },
}

impl InventoryError {
    /// Correlation id of the failed API request, when the API sent one.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::NotFound { request_id, .. } | Self::Status { request_id, .. } => {
                request_id.as_deref()
            }
            _ => None,
        }
    }
}

fn request_suffix(request_id: Option<&str>) -> String {
    request_id
        .map(|id| format!(" (request {id})"))
        .unwrap_or_default()
}

/// Read access to stock and product records.
#[async_trait]
pub trait Inventory: Send + Sync {
    /// Current stock record for a product.
    async fn stock(&self, id: ProductId) -> Result<StockRecord, InventoryError>;

    /// Full product record.
    async fn product(&self, id: ProductId) -> Result<Product, InventoryError>;
}

#[async_trait]
impl<T: Inventory + ?Sized> Inventory for Arc<T> {
    async fn stock(&self, id: ProductId) -> Result<StockRecord, InventoryError> {
        (**self).stock(id).await
    }

    async fn product(&self, id: ProductId) -> Result<Product, InventoryError> {
        (**self).product(id).await
    }
}
