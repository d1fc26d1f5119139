//! Request DTOs for the aggregation API
//!
//! Query parameters arrive as raw strings and are validated here, before any
//! upstream traffic happens.

use serde::Deserialize;

use crate::merge::{SortSpec, MAX_LIMIT, MIN_LIMIT};

/// Query string of `GET /api/v1/data`.
///
/// # Fields
/// - `sortKey`: `views` or `relevanceScore`
/// - `limit`: base-10 integer in `[1, 200]`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataQuery {
    #[serde(rename = "sortKey")]
    pub sort_key: Option<String>,
    pub limit: Option<String>,
}

/// Validated form of [`DataQuery`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataParams {
    pub sort: SortSpec,
    pub limit: Option<usize>,
}

impl DataQuery {
    /// Builds the query from raw key/value pairs.
    ///
    /// A repeated parameter keeps its first value; unknown parameters are
    /// ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "sortKey" if query.sort_key.is_none() => query.sort_key = Some(value),
                "limit" if query.limit.is_none() => query.limit = Some(value),
                _ => {}
            }
        }
        query
    }

    /// Validates the query.
    ///
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<DataParams, String> {
        let sort = match self.sort_key.as_deref() {
            None => SortSpec::None,
            Some(raw) => raw
                .parse::<SortSpec>()
                .map_err(|_| format!("unrecognized sortKey '{}'", raw))?,
        };

        let limit = match self.limit.as_deref() {
            None => None,
            Some(raw) => Some(parse_limit(raw)?),
        };

        Ok(DataParams { sort, limit })
    }
}

fn parse_limit(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(v) if (MIN_LIMIT..=MAX_LIMIT).contains(&v) => Ok(v),
        _ => Err(format!(
            "limit '{}' is not an integer in [{}, {}]",
            raw, MIN_LIMIT, MAX_LIMIT
        )),
    }
}

/// Query string of `DELETE /api/v1/cache`.
#[derive(Debug, Clone, Deserialize)]
pub struct PurgeQuery {
    pub source: Option<String>,
}
