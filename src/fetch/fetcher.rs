//! Source Fetcher
//!
//! Performs one conditional GET against one source. The cached entity tag is
//! sent as `If-None-Match`; a `304 Not Modified` answer reuses the cached
//! body, a full answer replaces the cache entry.

use std::time::Duration;

use reqwest::header::{ETAG, IF_NONE_MATCH};
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, warn};

use crate::cache::{CacheEntry, SharedCache};
use crate::error::FetchError;
use crate::fetch::{FetchStats, PartialResult, RetryPolicy};
use crate::models::{Record, SourceDocument};

// == Source Fetcher ==
/// Fetches sources through the shared conditional cache.
#[derive(Debug)]
pub struct SourceFetcher {
    client: Client,
    cache: SharedCache,
    policy: RetryPolicy,
    stats: FetchStats,
}

impl SourceFetcher {
    // == Constructor ==
    /// Creates a fetcher around an existing HTTP client.
    pub fn new(client: Client, cache: SharedCache, policy: RetryPolicy) -> Self {
        Self {
            client,
            cache,
            policy,
            stats: FetchStats::new(),
        }
    }

    /// Creates a fetcher with its own client using the given request timeout.
    pub fn with_timeout(
        cache: SharedCache,
        policy: RetryPolicy,
        timeout: Duration,
    ) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::new(client, cache, policy))
    }

    /// Returns the cache consulted and updated by every fetch.
    pub fn cache(&self) -> &SharedCache {
        &self.cache
    }

    /// Returns the outcome counters.
    pub fn stats(&self) -> &FetchStats {
        &self.stats
    }

    // == Fetch ==
    /// Retrieves the current records of `source`.
    ///
    /// Never fails as a whole; errors come back as [`PartialResult::Failed`].
    pub async fn fetch(&self, source: &str) -> PartialResult {
        let result = self.try_fetch(source).await;
        if let Err(e) = &result {
            self.stats.record_failure();
            warn!(source = %source, error = %e, "source fetch failed");
        }
        result.into()
    }

    async fn try_fetch(&self, source: &str) -> Result<Vec<Record>, FetchError> {
        // The read guard is released before the request goes out.
        let cached = self.cache.read().await.get(source);
        match &cached {
            Some(entry) => debug!(
                source = %source,
                etag = %entry.etag,
                "cache hit, sending conditional request"
            ),
            None => debug!(source = %source, "cache miss"),
        }

        let etag = cached.as_ref().map(|entry| entry.etag.as_str());
        let response = self.send_with_retry(source, etag).await?;
        let status = response.status();

        if status == StatusCode::NOT_MODIFIED {
            // Only reachable when a token was sent, so `cached` holds the
            // payload that token belongs to, even if the entry has since
            // been deleted.
            let entry = cached.ok_or(FetchError::Status(status.as_u16()))?;
            let document = SourceDocument::parse(&entry.payload)?;
            self.stats.record_revalidation();
            debug!(
                source = %source,
                status = status.as_u16(),
                "not modified, reusing cached payload"
            );
            return Ok(document.data);
        }

        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let new_etag = response
            .headers()
            .get(ETAG)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body = response.bytes().await?;
        let document = SourceDocument::parse(&body)?;

        {
            let mut cache = self.cache.write().await;
            match new_etag {
                Some(etag) => cache.set(source, CacheEntry::new(etag, body.to_vec())),
                // Nothing to revalidate against next time.
                None => {
                    cache.delete(source);
                }
            }
        }
        self.stats.record_refresh();
        debug!(
            source = %source,
            status = status.as_u16(),
            records = document.data.len(),
            "fetched fresh data"
        );

        Ok(document.data)
    }

    // == Retry Loop ==
    /// Sends the request, retrying transient failures per the policy.
    async fn send_with_retry(
        &self,
        source: &str,
        etag: Option<&str>,
    ) -> Result<Response, FetchError> {
        let mut attempt = 1;
        loop {
            let error = match self.send_once(source, etag).await {
                Ok(response) if !response.status().is_server_error() => return Ok(response),
                Ok(response) => FetchError::Status(response.status().as_u16()),
                Err(e) => e,
            };

            if !error.is_transient() || !self.policy.should_retry(attempt) {
                return Err(error);
            }

            let wait = self.policy.backoff(attempt);
            debug!(
                source = %source,
                attempt,
                wait_ms = wait.as_millis() as u64,
                error = %error,
                "transient failure, retrying"
            );
            self.stats.record_retry();
            tokio::time::sleep(wait).await;
            attempt += 1;
        }
    }

    async fn send_once(&self, source: &str, etag: Option<&str>) -> Result<Response, FetchError> {
        let mut request = self.client.get(source);
        if let Some(etag) = etag {
            request = request.header(IF_NONE_MATCH, etag);
        }
        Ok(request.send().await?)
    }
}
