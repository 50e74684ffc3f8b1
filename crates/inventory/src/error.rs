//! API errors.
//!
//! Route handlers return `Result<T, AppError>`. Errors render as
//! `{ "error": "...", "request_id": "..." }` so a client can quote the id
//! back when it reports the failure.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::request_id::RequestId;

/// Application-level error type for the inventory API.
#[derive(Debug, Error)]
pub enum AppError {
    /// No record with the requested id.
    #[error("Not found: {what}")]
    NotFound { what: String, request_id: RequestId },

    /// The `{id}` path segment is not an integer.
    #[error("Invalid product id: {reason}")]
    InvalidId { reason: String, request_id: RequestId },
}

impl AppError {
    #[must_use]
    pub const fn request_id(&self) -> &RequestId {
        match self {
            Self::NotFound { request_id, .. } | Self::InvalidId { request_id, .. } => request_id,
        }
    }

    const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::InvalidId { .. } => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self, request_id = %self.request_id(), "Request rejected");

        let body = json!({
            "error": self.to_string(),
            "request_id": self.request_id(),
        });
        (self.status(), Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
