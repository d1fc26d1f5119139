//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::fetch::RetryPolicy;

/// Sources queried when `SOURCE_URLS` is not set.
pub const DEFAULT_SOURCES: [&str; 3] = [
    "https://raw.githubusercontent.com/assignment132/assignment/main/duckduckgo.json",
    "https://raw.githubusercontent.com/assignment132/assignment/main/google.json",
    "https://raw.githubusercontent.com/assignment132/assignment/main/wikipedia.json",
];

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Upstream source URLs, in tie-break order
    pub sources: Vec<String>,
    /// Total attempts per source fetch (first try included)
    pub max_attempts: u32,
    /// Lower bound of the wait between attempts, in milliseconds
    pub retry_wait_min_ms: u64,
    /// Upper bound of the wait between attempts, in milliseconds
    pub retry_wait_max_ms: u64,
    /// Upstream request timeout in seconds
    pub request_timeout: u64,
    /// Whether `count` is serialized next to `data`
    pub include_count: bool,
    /// Grace period for in-flight requests on shutdown, in seconds
    pub shutdown_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `SOURCE_URLS` - Comma-separated upstream URLs (default: three sample sources)
    /// - `FETCH_MAX_ATTEMPTS` - Attempts per source (default: 3)
    /// - `RETRY_WAIT_MIN_MS` / `RETRY_WAIT_MAX_MS` - Backoff bounds (default: 10 / 50)
    /// - `REQUEST_TIMEOUT_SECS` - Upstream timeout (default: 10)
    /// - `INCLUDE_COUNT` - Serialize `count` in responses (default: false)
    /// - `SHUTDOWN_TIMEOUT_SECS` - Shutdown grace period (default: 10)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            sources: env::var("SOURCE_URLS")
                .ok()
                .map(|v| parse_sources(&v))
                .filter(|sources| !sources.is_empty())
                .unwrap_or(defaults.sources),
            max_attempts: parse_var("FETCH_MAX_ATTEMPTS")
                .unwrap_or(defaults.max_attempts)
                .max(1),
            retry_wait_min_ms: parse_var("RETRY_WAIT_MIN_MS").unwrap_or(defaults.retry_wait_min_ms),
            retry_wait_max_ms: parse_var("RETRY_WAIT_MAX_MS").unwrap_or(defaults.retry_wait_max_ms),
            request_timeout: parse_var("REQUEST_TIMEOUT_SECS").unwrap_or(defaults.request_timeout),
            include_count: parse_var("INCLUDE_COUNT").unwrap_or(defaults.include_count),
            shutdown_timeout: parse_var("SHUTDOWN_TIMEOUT_SECS")
                .unwrap_or(defaults.shutdown_timeout),
        }
    }

    /// Retry policy derived from the attempt and wait settings.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_attempts,
            Duration::from_millis(self.retry_wait_min_ms),
            Duration::from_millis(self.retry_wait_max_ms),
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8080,
            sources: DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect(),
            max_attempts: 3,
            retry_wait_min_ms: 10,
            retry_wait_max_ms: 50,
            request_timeout: 10,
            include_count: false,
            shutdown_timeout: 10,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

/// Splits a comma-separated source list, dropping blank items.
pub fn parse_sources(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
