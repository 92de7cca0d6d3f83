//! Cache Entry Module
//!
//! Defines the structure for individual cache entries and their expiry check.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A single stored value with the time of its most recent write.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// Key the entry is indexed under
    pub key: String,
    /// The stored value
    pub value: V,
    /// Clock reading at the last `put`
    pub written_at: Instant,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry written at `now`.
    pub fn new(key: String, value: V, now: Instant) -> Self {
        Self {
            key,
            value,
            written_at: now,
        }
    }

    // == Rewrite ==
    /// Replaces the value and restarts the entry's lifetime.
    pub fn rewrite(&mut self, value: V, now: Instant) {
        self.value = value;
        self.written_at = now;
    }

    // == Age ==
    /// Time elapsed since the last write, zero if `now` precedes it.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.written_at)
    }

    // == Is Expired ==
    /// Checks whether the entry has outlived `ttl`.
    ///
    /// Boundary condition: an entry whose age equals the TTL exactly is still
    /// live; it expires only once its age strictly exceeds the TTL.
    pub fn is_expired(&self, ttl: Duration, now: Instant) -> bool {
        self.age(now) > ttl
    }
}
