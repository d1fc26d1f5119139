//! Sort keys accepted by the data endpoint.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::models::Record;

/// Ordering applied to merged records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortSpec {
    /// Keep concatenation order
    #[default]
    None,
    /// Ascending by `views`
    Views,
    /// Ascending by `relevanceScore`
    RelevanceScore,
}

/// Error for a sort key that is not one of the two recognized literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSortKey(pub String);

impl fmt::Display for UnknownSortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown sort key: {}", self.0)
    }
}

impl std::error::Error for UnknownSortKey {}

impl FromStr for SortSpec {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "views" => Ok(SortSpec::Views),
            "relevanceScore" => Ok(SortSpec::RelevanceScore),
            other => Err(UnknownSortKey(other.to_string())),
        }
    }
}

impl SortSpec {
    /// Sorts `records` in place. `slice::sort_by` is stable, so ties keep
    /// their incoming order.
    pub fn apply(self, records: &mut [Record]) {
        match self {
            SortSpec::None => {}
            SortSpec::Views => records.sort_by(|a, b| a.views.cmp(&b.views)),
            SortSpec::RelevanceScore => records.sort_by(compare_relevance),
        }
    }
}

fn compare_relevance(a: &Record, b: &Record) -> Ordering {
    a.relevance_score.total_cmp(&b.relevance_score)
}
