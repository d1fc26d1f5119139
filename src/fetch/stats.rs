//! Fetch Statistics Module
//!
//! Counts upstream outcomes: full refreshes, revalidations served from the
//! cache, retries and failures.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Fetch Stats ==
/// Counters shared by concurrent fetches.
#[derive(Debug, Default)]
pub struct FetchStats {
    refreshed: AtomicU64,
    revalidated: AtomicU64,
    retries: AtomicU64,
    failures: AtomicU64,
}

/// Point-in-time copy of [`FetchStats`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FetchStatsSnapshot {
    /// Full responses that replaced the cache entry
    pub refreshed: u64,
    /// Not-modified responses answered from the cache
    pub revalidated: u64,
    /// Extra attempts after transient failures
    pub retries: u64,
    /// Sources that produced no records
    pub failures: u64,
    /// revalidated / (refreshed + revalidated)
    pub revalidation_rate: f64,
}

impl FetchStats {
    /// Creates a new FetchStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts a full response that replaced the cache entry.
    pub fn record_refresh(&self) {
        self.refreshed.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts a not-modified response served from the cache.
    pub fn record_revalidation(&self) {
        self.revalidated.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts one extra attempt after a transient failure.
    pub fn record_retry(&self) {
        self.retries.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts a source that produced no records.
    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    // == Snapshot ==
    /// Returns a point-in-time copy of the counters.
    pub fn snapshot(&self) -> FetchStatsSnapshot {
        let refreshed = self.refreshed.load(Ordering::Relaxed);
        let revalidated = self.revalidated.load(Ordering::Relaxed);
        let total = refreshed + revalidated;
        let revalidation_rate = if total == 0 {
            0.0
        } else {
            revalidated as f64 / total as f64
        };

        FetchStatsSnapshot {
            refreshed,
            revalidated,
            retries: self.retries.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            revalidation_rate,
        }
    }
}
