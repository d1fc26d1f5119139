//! Domain records returned by upstream sources.

use serde::{Deserialize, Serialize};

/// One unit of data from a source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub url: String,
    pub views: i64,
    #[serde(rename = "relevanceScore")]
    pub relevance_score: f64,
}

impl Record {
    /// Creates a new Record
    pub fn new(url: impl Into<String>, views: i64, relevance_score: f64) -> Self {
        Self {
            url: url.into(),
            views,
            relevance_score,
        }
    }
}

/// Body shape served by every upstream source: `{"data": [Record, ...]}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceDocument {
    #[serde(default)]
    pub data: Vec<Record>,
}

impl SourceDocument {
    /// Parses a raw upstream body.
    pub fn parse(body: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(body)
    }
}
