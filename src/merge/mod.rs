//! Merge Module
//!
//! Pure stage that turns per-source partial results into one ordered,
//! bounded container. No I/O happens here.

mod finalize;
mod sort;


pub use finalize::{finalize, ResultContainer};
pub use sort::{SortSpec, UnknownSortKey};

/// Smallest accepted `limit`
pub const MIN_LIMIT: usize = 1;

/// Largest accepted `limit`
pub const MAX_LIMIT: usize = 200;
