//! Cache Module
//!
//! Holds the last observed freshness token and payload per upstream source,
//! used to make conditional requests.

mod entry;
mod store;


pub use entry::CacheEntry;
pub use store::{ConditionalCache, SharedCache};
