//! Error types for the aggregation service
//!
//! Request-level failures map onto HTTP responses; per-source failures are
//! absorbed by the aggregator and never reach the caller.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Fixed plain-text body returned for rejected query parameters.
pub const INVALID_REQUEST_BODY: &str = "Invalid request";

// == Aggregator Error Enum ==
/// Request-level error type.
#[derive(Error, Debug)]
pub enum AggregatorError {
    /// Malformed sort key or limit, detected before any fetch
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Source has no cache entry to delete
    #[error("Source not cached: {0}")]
    NotCached(String),

    /// Internal server error (e.g. response serialization)
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for AggregatorError {
    fn into_response(self) -> Response {
        match self {
            AggregatorError::InvalidRequest(_) => (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                INVALID_REQUEST_BODY,
            )
                .into_response(),
            AggregatorError::NotCached(source) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": format!("Source not cached: {}", source) })),
            )
                .into_response(),
            AggregatorError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for request handling.
pub type Result<T> = std::result::Result<T, AggregatorError>;

// == Fetch Error Enum ==
/// Failure of a single upstream retrieval.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Connection failure, timeout or body read error
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream answered with a status we cannot use
    #[error("unexpected status: {0}")]
    Status(u16),

    /// Body is not a `{"data": [...]}` document
    #[error("malformed body: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Fetch task panicked or was cancelled before producing a result
    #[error("fetch task aborted: {0}")]
    Aborted(String),
}

impl FetchError {
    /// Transient errors are worth another attempt; definitive ones are not.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Transport(e) => !e.is_builder() && !e.is_decode(),
            FetchError::Status(code) => (500..600).contains(code),
            FetchError::Malformed(_) | FetchError::Aborted(_) => false,
        }
    }
}
