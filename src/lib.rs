//! Data Aggregator - merges JSON datasets from several upstream sources
//!
//! Fetches every source concurrently with conditional requests, tolerates
//! per-source failures, and returns one stable-sorted, bounded dataset.

pub mod aggregate;
pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod merge;
pub mod models;

pub use aggregate::Aggregator;
pub use api::AppState;
pub use config::Config;
