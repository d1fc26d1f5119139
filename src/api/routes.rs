//! API Routes
//!
//! Configures the Axum router with all aggregation endpoints.

use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{data_handler, health_handler, purge_handler, stats_handler, AppState};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/v1/data` - Merged dataset, optional `sortKey` and `limit`
/// - `GET /api/v1/stats` - Fetch and cache statistics
/// - `DELETE /api/v1/cache?source=<id>` - Drop one cached source
/// - `GET /health` - Health check endpoint
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/data", get(data_handler))
        .route("/stats", get(stats_handler))
        .route("/cache", delete(purge_handler));

    Router::new()
        .nest("/api/v1", api)
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::Aggregator;
    use crate::cache::ConditionalCache;
    use crate::fetch::{RetryPolicy, SourceFetcher};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use std::time::Duration;
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let fetcher = SourceFetcher::with_timeout(
            ConditionalCache::shared(),
            RetryPolicy::no_retry(),
            Duration::from_secs(1),
        )
        .unwrap();
        let state = AppState::new(Aggregator::new(Arc::new(fetcher), Vec::new()), true);
        create_router(state)
    }

    async fn get_status(uri: &str) -> StatusCode {
        create_test_app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        assert_eq!(get_status("/health").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_stats_endpoint() {
        assert_eq!(get_status("/api/v1/stats").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_data_endpoint() {
        assert_eq!(get_status("/api/v1/data").await, StatusCode::OK);
        assert_eq!(get_status("/api/v1/data?limit=0").await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_data_repeated_params_use_first_value() {
        assert_eq!(get_status("/api/v1/data?limit=1&limit=2").await, StatusCode::OK);
        assert_eq!(
            get_status("/api/v1/data?sortKey=views&sortKey=views").await,
            StatusCode::OK
        );
        assert_eq!(
            get_status("/api/v1/data?limit=201&limit=1").await,
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_data_rejects_post() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/data")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_purge_missing_source_param() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/v1/cache")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
