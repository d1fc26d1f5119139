//! Cache Store Module
//!
//! Source-keyed storage of the last observed token/payload pairs.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::cache::CacheEntry;

/// Cache handle shared by every concurrent fetch.
///
/// Readers take the read lock, `set`/`delete` take the write lock. Guards are
/// dropped before any network call.
pub type SharedCache = Arc<RwLock<ConditionalCache>>;

// == Conditional Cache ==
/// Mapping from source identifier to its last observed entry.
///
/// Entries never expire; they disappear only through `delete`.
#[derive(Debug, Default)]
pub struct ConditionalCache {
    entries: HashMap<String, Arc<CacheEntry>>,
}

impl ConditionalCache {
    // == Constructor ==
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty cache ready to be shared between tasks.
    pub fn shared() -> SharedCache {
        Arc::new(RwLock::new(Self::new()))
    }

    // == Get ==
    /// Returns the entry for `key`, if any.
    ///
    /// The returned handle stays valid even if the entry is replaced or
    /// deleted afterwards.
    pub fn get(&self, key: &str) -> Option<Arc<CacheEntry>> {
        self.entries.get(key).cloned()
    }

    // == Set ==
    /// Replaces any existing entry for `key` wholesale.
    pub fn set(&mut self, key: impl Into<String>, entry: CacheEntry) {
        self.entries.insert(key.into(), Arc::new(entry));
    }

    // == Delete ==
    /// Removes the entry for `key`. Returns whether one was present.
    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Length ==
    /// Returns the number of cached sources.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total cached payload size in bytes.
    pub fn payload_bytes(&self) -> usize {
        self.entries.values().map(|e| e.payload_len()).sum()
    }
}
