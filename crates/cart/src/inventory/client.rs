//! HTTP client for the inventory API.
//!
//! Product records are cached using `moka` (5-minute TTL). Stock records
//! are never cached: every stock check hits the API.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use rocket_shoes_core::{Product, ProductId, StockRecord};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::{Inventory, InventoryError};
use crate::config::InventoryApiConfig;

/// Header the inventory API uses for request correlation.
const REQUEST_ID_HEADER: &str = "x-request-id";

/// Client for the inventory API.
///
/// Cheap to clone; clones share the HTTP connection pool and product cache.
#[derive(Clone)]
pub struct InventoryClient {
    inner: Arc<InventoryClientInner>,
}

struct InventoryClientInner {
    client: reqwest::Client,
    base_url: Url,
    products: Cache<ProductId, Product>,
}

impl InventoryClient {
    /// Create a new inventory API client.
    ///
    /// # Errors
    ///
    /// Returns `InventoryError::Http` if the HTTP client cannot be built.
    pub fn new(config: &InventoryApiConfig) -> Result<Self, InventoryError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        let products = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Ok(Self {
            inner: Arc::new(InventoryClientInner {
                client,
                base_url: config.base_url.clone(),
                products,
            }),
        })
    }

    /// Resolve `{collection}/{id}` against the base URL.
    fn endpoint(&self, collection: &str, id: ProductId) -> Result<Url, InventoryError> {
        Ok(self.inner.base_url.join(&format!("{collection}/{id}"))?)
    }

    /// GET a JSON document.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, InventoryError> {
        let response = self.inner.client.get(url.clone()).send().await?;
        let status = response.status();
        let request_id = response
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(String::from);

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(InventoryError::NotFound {
                path: url.path().to_string(),
                request_id,
            });
        }

        if !status.is_success() {
            tracing::error!(
                status = %status,
                request_id = request_id.as_deref().unwrap_or("-"),
                body = %body.chars().take(500).collect::<String>(),
                "Inventory API returned non-success status"
            );
            return Err(InventoryError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
                request_id,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse inventory API response"
            );
            InventoryError::Parse(e)
        })
    }
}

#[async_trait]
impl Inventory for InventoryClient {
    #[instrument(skip(self, id), fields(product_id = %id))]
    async fn stock(&self, id: ProductId) -> Result<StockRecord, InventoryError> {
        let stock: StockRecord = self.get_json(self.endpoint("stock", id)?).await?;
        debug!(available = stock.amount, "Fetched stock record");
        Ok(stock)
    }

    #[instrument(skip(self, id), fields(product_id = %id))]
    async fn product(&self, id: ProductId) -> Result<Product, InventoryError> {
        if let Some(product) = self.inner.products.get(&id).await {
            debug!("Cache hit for product");
            return Ok(product);
        }

        let product: Product = self.get_json(self.endpoint("products", id)?).await?;
        self.inner.products.insert(id, product.clone()).await;
        Ok(product)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> InventoryClient {
        InventoryClient::new(&InventoryApiConfig::new(base).unwrap()).unwrap()
    }

    #[test]
    fn test_endpoint_resolves_against_base() {
        let client = client("http://localhost:3333");
        assert_eq!(
            client.endpoint("stock", ProductId::new(3)).unwrap().as_str(),
            "http://localhost:3333/stock/3"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client = client("https://api.example.com/v1");
        assert_eq!(
            client
                .endpoint("products", ProductId::new(12))
                .unwrap()
                .as_str(),
            "https://api.example.com/v1/products/12"
        );
    }
}
