//! Fetch Module
//!
//! Conditional retrieval of one upstream source, with bounded retries.

mod fetcher;
mod retry;
mod stats;

pub use fetcher::SourceFetcher;
pub use retry::RetryPolicy;
pub use stats::{FetchStats, FetchStatsSnapshot};

use crate::error::FetchError;
use crate::models::Record;

/// Outcome of fetching exactly one source.
#[derive(Debug)]
pub enum PartialResult {
    Records(Vec<Record>),
    Failed(FetchError),
}

impl PartialResult {
    /// Returns true if the source produced no usable result.
    pub fn is_failed(&self) -> bool {
        matches!(self, PartialResult::Failed(_))
    }

    /// Records contributed to the merge; a failure contributes none.
    pub fn into_records(self) -> Vec<Record> {
        match self {
            PartialResult::Records(records) => records,
            PartialResult::Failed(_) => Vec::new(),
        }
    }
}

impl From<Result<Vec<Record>, FetchError>> for PartialResult {
    fn from(result: Result<Vec<Record>, FetchError>) -> Self {
        match result {
            Ok(records) => PartialResult::Records(records),
            Err(e) => PartialResult::Failed(e),
        }
    }
}
