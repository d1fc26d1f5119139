//! API Handlers
//!
//! HTTP request handlers for the aggregation endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, error, info};

use crate::aggregate::Aggregator;
use crate::cache::SharedCache;
use crate::config::Config;
use crate::error::{AggregatorError, Result};
use crate::fetch::SourceFetcher;
use crate::merge::finalize;
use crate::models::{
    DataQuery, DataResponse, HealthResponse, PurgeQuery, PurgeResponse, StatsResponse,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Orchestrator owning the fetcher and the shared cache
    pub aggregator: Aggregator,
    /// Serialize `count` next to `data`
    pub include_count: bool,
}

impl AppState {
    /// Creates a new AppState around an aggregator.
    pub fn new(aggregator: Aggregator, include_count: bool) -> Self {
        Self {
            aggregator,
            include_count,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds a fresh cache, an HTTP client with the configured timeout and
    /// the retry policy.
    pub fn from_config(config: &Config) -> reqwest::Result<Self> {
        let fetcher = SourceFetcher::with_timeout(
            crate::cache::ConditionalCache::shared(),
            config.retry_policy(),
            std::time::Duration::from_secs(config.request_timeout),
        )?;
        let aggregator = Aggregator::new(Arc::new(fetcher), config.sources.clone());
        Ok(Self::new(aggregator, config.include_count))
    }

    /// Returns the cache shared by all fetches.
    pub fn cache(&self) -> &SharedCache {
        self.aggregator.fetcher().cache()
    }
}

/// Handler for GET /api/v1/data
///
/// Validates the query, fetches every source, then merges, sorts and limits.
/// A repeated parameter keeps its first value.
pub async fn data_handler(
    State(state): State<AppState>,
    pairs: std::result::Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Response> {
    let Query(pairs) = pairs.map_err(|e| {
        debug!(reason = %e, "rejecting unparsable query string");
        AggregatorError::InvalidRequest(e.to_string())
    })?;
    let query = DataQuery::from_pairs(pairs);
    info!(sort_key = ?query.sort_key, limit = ?query.limit, "request received");

    let params = query.validate().map_err(|msg| {
        debug!(reason = %msg, "rejecting request");
        AggregatorError::InvalidRequest(msg)
    })?;

    let partials = state.aggregator.aggregate().await;
    let container = finalize(partials, params.sort, params.limit);
    let response = DataResponse::from_container(container, state.include_count);

    let body = serde_json::to_vec(&response).map_err(|e| {
        error!(error = %e, "failed to serialize response");
        AggregatorError::Internal(e.to_string())
    })?;

    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

/// Handler for GET /api/v1/stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let (cached_sources, cached_bytes) = {
        let cache = state.cache().read().await;
        (cache.len(), cache.payload_bytes())
    };

    Json(StatsResponse {
        sources: state.aggregator.sources().len(),
        cached_sources,
        cached_bytes,
        fetch: state.aggregator.fetcher().stats().snapshot(),
    })
}

/// Handler for DELETE /api/v1/cache?source=<id>
///
/// Drops the cached entry so the next fetch of that source is unconditional.
pub async fn purge_handler(
    State(state): State<AppState>,
    Query(query): Query<PurgeQuery>,
) -> Result<Json<PurgeResponse>> {
    let source = query
        .source
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AggregatorError::InvalidRequest("missing source".to_string()))?;

    let removed = state.cache().write().await.delete(&source);
    if !removed {
        return Err(AggregatorError::NotCached(source));
    }

    info!(source = %source, "cache entry deleted");
    Ok(Json(PurgeResponse::new(source)))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
