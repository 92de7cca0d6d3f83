//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, and evictions.

use serde::Serialize;

// == Counters ==
/// Running counters owned by a cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Counters {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

impl Counters {
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    // == Snapshot ==
    /// Builds a stats snapshot for a cache holding `size` of `max_size` entries.
    pub fn snapshot(&self, size: usize, max_size: usize) -> CacheStats {
        let mut stats = CacheStats {
            size,
            max_size,
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
            hit_rate: 0.0,
        };
        stats.hit_rate = stats.compute_hit_rate();
        stats
    }
}

// == Cache Stats ==
/// Point-in-time view of a cache's size and performance.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Current number of entries in the cache
    pub size: usize,
    /// Capacity the cache was built with
    pub max_size: usize,
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals (key not found or expired)
    pub misses: u64,
    /// Number of entries evicted due to LRU policy
    pub evictions: u64,
    /// hits / (hits + misses), or 0.0 before any lookup
    pub hit_rate: f64,
}

impl CacheStats {
    /// Total number of lookups (hits + misses).
    pub fn total_lookups(&self) -> u64 {
        self.hits + self.misses
    }

    /// Calculates the hit rate, returning 0.0 if no requests have been made.
    fn compute_hit_rate(&self) -> f64 {
        let total = self.total_lookups();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
