//! In-process upstream sources for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use data_aggregator::aggregate::Aggregator;
use data_aggregator::cache::ConditionalCache;
use data_aggregator::fetch::{RetryPolicy, SourceFetcher};
use data_aggregator::AppState;

/// Behaviour of one mock source.
#[derive(Clone)]
pub struct Upstream {
    body: Arc<Mutex<String>>,
    etag: Arc<Mutex<Option<String>>>,
    status: StatusCode,
    fail_first: usize,
    hits: Arc<AtomicUsize>,
    conditional_hits: Arc<AtomicUsize>,
}

impl Upstream {
    /// Source serving `body` with entity tag `etag`.
    pub fn json(body: &str, etag: Option<&str>) -> Self {
        Self {
            body: Arc::new(Mutex::new(body.to_string())),
            etag: Arc::new(Mutex::new(etag.map(String::from))),
            status: StatusCode::OK,
            fail_first: 0,
            hits: Arc::new(AtomicUsize::new(0)),
            conditional_hits: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Source that always answers `status` with no body.
    pub fn failing(status: StatusCode) -> Self {
        Self {
            status,
            ..Self::json("", None)
        }
    }

    /// Answer 503 for the first `n` requests.
    pub fn fail_first(mut self, n: usize) -> Self {
        self.fail_first = n;
        self
    }

    /// Swap the served document and its tag.
    pub fn update(&self, body: &str, etag: Option<&str>) {
        *self.body.lock().unwrap() = body.to_string();
        *self.etag.lock().unwrap() = etag.map(String::from);
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Requests that carried `If-None-Match`.
    pub fn conditional_hits(&self) -> usize {
        self.conditional_hits.load(Ordering::SeqCst)
    }

    /// Binds to an ephemeral port and returns the source URL.
    pub async fn spawn(&self) -> String {
        let router = Router::new()
            .route("/data.json", get(serve))
            .with_state(self.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/data.json", addr)
    }
}

async fn serve(State(upstream): State<Upstream>, headers: HeaderMap) -> Response {
    let n = upstream.hits.fetch_add(1, Ordering::SeqCst);
    let if_none_match = headers
        .get(header::IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    if if_none_match.is_some() {
        upstream.conditional_hits.fetch_add(1, Ordering::SeqCst);
    }

    if n < upstream.fail_first {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }
    if upstream.status != StatusCode::OK {
        return upstream.status.into_response();
    }

    let body = upstream.body.lock().unwrap().clone();
    let etag = upstream.etag.lock().unwrap().clone();
    match etag {
        Some(etag) if if_none_match.as_deref() == Some(etag.as_str()) => {
            StatusCode::NOT_MODIFIED.into_response()
        }
        Some(etag) => (
            [(header::ETAG, etag), (header::CONTENT_TYPE, "application/json".to_string())],
            body,
        )
            .into_response(),
        None => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
    }
}

/// Fast retry policy for tests.
pub fn test_policy() -> RetryPolicy {
    RetryPolicy::new(3, Duration::from_millis(1), Duration::from_millis(5))
}

pub fn test_fetcher() -> Arc<SourceFetcher> {
    let fetcher = SourceFetcher::with_timeout(
        ConditionalCache::shared(),
        test_policy(),
        Duration::from_secs(5),
    )
    .unwrap();
    Arc::new(fetcher)
}

pub fn test_state(sources: Vec<String>, include_count: bool) -> AppState {
    AppState::new(Aggregator::new(test_fetcher(), sources), include_count)
}

pub const SOURCE_A: &str = r#"{"data":[{"url":"a","views":1000,"relevanceScore":0.1}]}"#;
pub const SOURCE_B: &str = r#"{"data":[{"url":"b","views":3000,"relevanceScore":0.3}]}"#;
pub const SOURCE_C: &str = r#"{"data":[{"url":"c","views":2000,"relevanceScore":0.2}]}"#;
