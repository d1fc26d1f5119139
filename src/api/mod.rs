//! API Module
//!
//! HTTP handlers and routing for the aggregation service.
//!
//! # Endpoints
//! - `GET /api/v1/data` - Merged, optionally sorted and limited dataset
//! - `GET /api/v1/stats` - Fetch and cache statistics
//! - `DELETE /api/v1/cache` - Drop one cached source
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
