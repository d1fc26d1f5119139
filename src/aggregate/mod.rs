//! Aggregation Module
//!
//! Fans out one fetch task per configured source and joins them in
//! configuration order.

use std::sync::Arc;

use tokio::task::JoinError;
use tracing::{debug, error, info};

use crate::error::FetchError;
use crate::fetch::{PartialResult, SourceFetcher};

// == Aggregator ==
/// Runs the fetcher for every configured source concurrently.
#[derive(Debug, Clone)]
pub struct Aggregator {
    fetcher: Arc<SourceFetcher>,
    sources: Arc<[String]>,
}

impl Aggregator {
    /// Creates an aggregator over `sources`, kept in the given order.
    pub fn new(fetcher: Arc<SourceFetcher>, sources: Vec<String>) -> Self {
        Self {
            fetcher,
            sources: sources.into(),
        }
    }

    /// Configured sources, in tie-break order.
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Fetcher shared by every spawned task.
    pub fn fetcher(&self) -> &Arc<SourceFetcher> {
        &self.fetcher
    }

    // == Aggregate ==
    /// Fetches all sources and returns one outcome per source, in
    /// configuration order.
    ///
    /// Waits for every task. A failing or panicking task yields
    /// [`PartialResult::Failed`] and never affects its siblings.
    pub async fn aggregate(&self) -> Vec<PartialResult> {
        let handles: Vec<_> = self
            .sources
            .iter()
            .cloned()
            .map(|source| {
                let fetcher = Arc::clone(&self.fetcher);
                tokio::spawn(async move { fetcher.fetch(&source).await })
            })
            .collect();

        let mut partials = Vec::with_capacity(handles.len());
        for (source, handle) in self.sources.iter().zip(handles) {
            partials.push(self.settle(source, handle.await));
        }

        let failed = partials.iter().filter(|p| p.is_failed()).count();
        if failed == partials.len() && !partials.is_empty() {
            info!(sources = partials.len(), "all sources failed, returning empty result");
        } else {
            debug!(sources = partials.len(), failed, "aggregation complete");
        }

        partials
    }

    /// Turns a joined task into its outcome; a task that never finished
    /// counts as a failed source.
    fn settle(&self, source: &str, joined: Result<PartialResult, JoinError>) -> PartialResult {
        joined.unwrap_or_else(|e| {
            error!(source = %source, error = %e, "fetch task did not complete");
            self.fetcher.stats().record_failure();
            PartialResult::Failed(FetchError::Aborted(e.to_string()))
        })
    }
}
