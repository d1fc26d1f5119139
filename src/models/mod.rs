//! Request and Response models for the aggregation API
//!
//! Domain records plus the DTOs used for query parsing and response bodies.

pub mod record;
pub mod requests;
pub mod responses;

pub use record::{Record, SourceDocument};
pub use requests::{DataParams, DataQuery, PurgeQuery};
pub use responses::{DataResponse, HealthResponse, PurgeResponse, StatsResponse};
