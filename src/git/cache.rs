//! Bounded attribution cache.
//!
//! Fixed-capacity LRU mapping (path, line, volatility token) to an
//! attribution record or an explicit "no attribution" marker. The capacity
//! bounds memory under pathological scroll behavior; it does not try to
//! model the working set. The only bulk invalidation is `clear()`, called on
//! every save notification because the volatility token may not yet reflect
//! the new on-disk state when the event fires.

use std::num::NonZeroUsize;

use lru::LruCache;

use crate::git::identity::CacheKey;
use crate::models::AttributionRecord;

/// Entries at capacity: independent of repository size.
pub const CACHE_CAPACITY: usize = 512;

/// A cached answer. `NoAttribution` is a legitimate value (line past end of
/// file, binary file) so such lines are not re-queried on every trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cached {
    Attribution(AttributionRecord),
    NoAttribution,
}

pub struct AttributionCache {
    entries: LruCache<CacheKey, Cached>,
}

impl AttributionCache {
    pub fn new() -> Self {
        Self::with_capacity(CACHE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
        }
    }

    /// A hit promotes the key to most recently used.
    pub fn get(&mut self, key: &CacheKey) -> Option<Cached> {
        self.entries.get(key).cloned()
    }

    /// Inserting beyond capacity evicts the least recently used entry.
    pub fn set(&mut self, key: CacheKey, value: Cached) {
        self.entries.put(key, value);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AttributionCache {
    fn default() -> Self {
        Self::new()
    }
}
