//! Response DTOs for the aggregation API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::fetch::FetchStatsSnapshot;
use crate::merge::ResultContainer;
use crate::models::Record;

/// Response body for `GET /api/v1/data`.
#[derive(Debug, Clone, Serialize)]
pub struct DataResponse {
    pub data: Vec<Record>,
    /// Only serialized when the deployment enables it; equals `data.len()`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl DataResponse {
    /// Builds the response from a finalized container.
    pub fn from_container(container: ResultContainer, include_count: bool) -> Self {
        let count = include_count.then_some(container.count);
        Self {
            data: container.data,
            count,
        }
    }
}

/// Response body for `GET /api/v1/stats`.
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of configured sources
    pub sources: usize,
    /// Number of sources with a cached entry
    pub cached_sources: usize,
    /// Total cached payload size in bytes
    pub cached_bytes: usize,
    #[serde(flatten)]
    pub fetch: FetchStatsSnapshot,
}

/// Response body for `DELETE /api/v1/cache`.
#[derive(Debug, Clone, Serialize)]
pub struct PurgeResponse {
    pub message: String,
    pub source: String,
}

impl PurgeResponse {
    /// Creates a new PurgeResponse
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        Self {
            message: format!("Cache entry for '{}' deleted", source),
            source,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
