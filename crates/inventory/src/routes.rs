//! HTTP route handlers for the inventory API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//! GET  /stock                  - All stock records
//! GET  /stock/{id}             - Stock record for a product
//! GET  /products               - All products
//! GET  /products/{id}          - Product record
//! ```
//!
//! Errors are JSON with the request id: an unknown id is 404, a
//! non-integer `{id}` is 400.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::PathRejection},
    http::Request,
    middleware,
    routing::get,
};
use rocket_shoes_core::{Product, ProductId, StockRecord};
use tower_http::trace::TraceLayer;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::request_id::{RequestId, assign_request_id};
use crate::state::AppState;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stock", get(list_stock))
        .route("/stock/{id}", get(get_stock))
        .route("/products", get(list_products))
        .route("/products/{id}", get(get_product))
        .with_state(state)
        .layer(middleware::from_fn(assign_request_id))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

#[instrument(skip(state))]
async fn list_stock(State(state): State<AppState>) -> Json<Vec<StockRecord>> {
    Json(state.catalog().all_stock().copied().collect())
}

/// Resolve the `{id}` segment, turning a malformed one into a JSON 400.
fn product_id(
    path: std::result::Result<Path<i32>, PathRejection>,
    request_id: &RequestId,
) -> Result<ProductId> {
    path.map(|Path(id)| ProductId::new(id))
        .map_err(|rejection| AppError::InvalidId {
            reason: rejection.body_text(),
            request_id: request_id.clone(),
        })
}

#[instrument(skip(state, path))]
async fn get_stock(
    State(state): State<AppState>,
    request_id: RequestId,
    path: std::result::Result<Path<i32>, PathRejection>,
) -> Result<Json<StockRecord>> {
    let id = product_id(path, &request_id)?;
    state
        .catalog()
        .stock(id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound {
            what: format!("stock for product {id}"),
            request_id,
        })
}

#[instrument(skip(state))]
async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.catalog().all_products().cloned().collect())
}

#[instrument(skip(state, path))]
async fn get_product(
    State(state): State<AppState>,
    request_id: RequestId,
    path: std::result::Result<Path<i32>, PathRejection>,
) -> Result<Json<Product>> {
    let id = product_id(path, &request_id)?;
    state
        .catalog()
        .product(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound {
            what: format!("product {id}"),
            request_id,
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;
    use axum::http::StatusCode;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::catalog::Catalog;
    use crate::request_id::REQUEST_ID_HEADER;

    fn test_app() -> Router {
        let catalog = Catalog::from_json(
            r#"{
                "stock": [{"id": 1, "amount": 3}, {"id": 2, "amount": 5}],
                "products": [
                    {"id": 1, "title": "Tênis de Caminhada", "price": 179.9, "image": "1.jpg"},
                    {"id": 2, "title": "Tênis VR Caminhada", "price": 139.9, "image": "2.jpg"}
                ]
            }"#,
        )
        .unwrap();
        app(AppState::new(catalog))
    }

    async fn get(uri: &str) -> (StatusCode, Value) {
        get_with_id(uri, "test-request").await
    }

    async fn get_with_id(uri: &str, request_id: &str) -> (StatusCode, Value) {
        let response = test_app()
            .oneshot(
                Request::get(uri)
                    .header(REQUEST_ID_HEADER, request_id)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_get_stock() {
        let (status, body) = get("/stock/1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"id": 1, "amount": 3}));
    }

    #[tokio::test]
    async fn test_get_product() {
        let (status, body) = get("/products/2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Tênis VR Caminhada");
        assert_eq!(body["price"], json!(139.9));
    }

    #[tokio::test]
    async fn test_unknown_id_is_404_json() {
        let (status, body) = get("/stock/99").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({
                "error": "Not found: stock for product 99",
                "request_id": "test-request",
            })
        );

        let (status, body) = get_with_id("/products/99", "cart-42").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["request_id"], "cart-42");
    }

    #[tokio::test]
    async fn test_non_integer_id_is_400_json() {
        let (status, body) = get("/stock/abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(
            body["error"]
                .as_str()
                .unwrap()
                .starts_with("Invalid product id")
        );
        assert_eq!(body["request_id"], "test-request");
    }

    #[tokio::test]
    async fn test_generated_request_id_matches_error_body() {
        let response = test_app()
            .oneshot(Request::get("/products/99").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let header = response.headers()[REQUEST_ID_HEADER]
            .to_str()
            .unwrap()
            .to_string();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["request_id"], header.as_str());
    }

    #[tokio::test]
    async fn test_list_collections() {
        let (status, body) = get("/products").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);

        let (_, body) = get("/stock").await;
        assert_eq!(body, json!([{"id": 1, "amount": 3}, {"id": 2, "amount": 5}]));
    }

    #[tokio::test]
    async fn test_request_id_echoed_or_generated() {
        let response = test_app()
            .oneshot(
                Request::get("/health")
                    .header(REQUEST_ID_HEADER, "abc-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers()[REQUEST_ID_HEADER], "abc-123");

        let response = test_app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let generated = response.headers()[REQUEST_ID_HEADER].to_str().unwrap();
        assert!(uuid::Uuid::parse_str(generated).is_ok());
    }
}
