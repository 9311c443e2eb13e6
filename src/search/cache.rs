use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use lru::LruCache;

use super::request::FetchKey;

struct Entry<V> {
    value: V,
    stored_at: Instant,
}

/// Bounded cache of responses, each tagged with the time it was stored.
///
/// Entries older than the freshness window are treated as absent but stay in
/// the cache until evicted or overwritten.
pub struct FreshnessCache<V> {
    entries: LruCache<FetchKey, Entry<V>>,
    freshness: Duration,
}

impl<V> FreshnessCache<V> {
    #[must_use]
    pub fn new(capacity: NonZeroUsize, freshness: Duration) -> Self {
        Self {
            entries: LruCache::new(capacity),
            freshness,
        }
    }

    /// Look up a value stored less than the freshness window ago.
    pub fn get_fresh(&mut self, key: &FetchKey, now: Instant) -> Option<&V> {
        let freshness = self.freshness;
        let entry = self.entries.get(key)?;
        if now.saturating_duration_since(entry.stored_at) < freshness {
            Some(&entry.value)
        } else {
            None
        }
    }

    pub fn insert(&mut self, key: FetchKey, value: V, now: Instant) {
        self.entries.put(
            key,
            Entry {
                value,
                stored_at: now,
            },
        );
    }

    /// Replace the value for `key` without moving its stored time. A key
    /// with no entry is stored as new.
    pub fn update(&mut self, key: FetchKey, value: V, now: Instant) {
        match self.entries.get_mut(&key) {
            Some(entry) => entry.value = value,
            None => self.insert(key, value, now),
        }
    }

    pub fn invalidate(&mut self, key: &FetchKey) {
        self.entries.pop(key);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn freshness(&self) -> Duration {
        self.freshness
    }
}
