//! Concatenate, sort and truncate partial results.

use serde::Serialize;

use crate::fetch::PartialResult;
use crate::merge::SortSpec;
use crate::models::Record;

/// Final ordered, bounded dataset for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultContainer {
    pub data: Vec<Record>,
    /// Always equal to `data.len()`
    pub count: usize,
}

impl ResultContainer {
    /// Wraps `data`, setting `count` to its length.
    pub fn new(data: Vec<Record>) -> Self {
        let count = data.len();
        Self { data, count }
    }
}

/// Builds the response container.
///
/// Successful partials are concatenated in the order given (the configured
/// source order), failures contribute nothing. The sort is stable, so that
/// order breaks ties. A limit only applies when `1 <= limit <= len`.
pub fn finalize(
    partials: Vec<PartialResult>,
    sort: SortSpec,
    limit: Option<usize>,
) -> ResultContainer {
    let mut records: Vec<Record> = partials
        .into_iter()
        .flat_map(PartialResult::into_records)
        .collect();

    sort.apply(&mut records);

    if let Some(limit) = limit {
        if limit >= 1 && limit <= records.len() {
            records.truncate(limit);
        }
    }

    ResultContainer::new(records)
}
