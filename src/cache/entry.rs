//! Cache Entry Module
//!
//! Defines the freshness token / payload pair stored per source.

// == Cache Entry ==
/// Last successfully observed state of one source.
///
/// The token and payload always come from the same upstream response and are
/// replaced together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// Entity tag returned with the payload
    pub etag: String,
    /// Raw response body
    pub payload: Vec<u8>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry from an upstream token and body.
    pub fn new(etag: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            etag: etag.into(),
            payload: payload.into(),
        }
    }

    /// Size of the cached body in bytes.
    pub fn payload_len(&self) -> usize {
        self.payload.len()
    }
}
