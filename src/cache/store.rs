//! Cache Store Module
//!
//! Main cache engine combining a HashMap index with an arena-backed LRU list
//! and lazy TTL expiration.

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use crate::cache::lru::{NodeId, PREALLOC_LIMIT};
use crate::cache::stats::Counters;
use crate::cache::{CacheEntry, CacheStats, Clock, LruList, SystemClock};
use crate::config::Config;
use crate::error::{ConfigError, Result};

// == Expiring Cache ==
/// Bounded key/value cache with LRU eviction and per-entry TTL.
///
/// Holds at most `max_size` entries. Each entry stays readable for `ttl`
/// after its last `put`; stale entries are purged when a `get` finds them or
/// when the owner calls [`evict_expired`](Self::evict_expired). Nothing runs
/// in the background.
///
/// `get` hands back a clone of the stored value, so callers never alias the
/// cache's own copy.
#[derive(Debug)]
pub struct ExpiringCache<V, C = SystemClock> {
    /// Key to list slot
    index: HashMap<String, NodeId>,
    /// Entries in recency order, least recently used first
    order: LruList<CacheEntry<V>>,
    /// Hit/miss/eviction counters
    counters: Counters,
    /// Maximum number of entries allowed
    max_size: usize,
    /// Lifetime of an entry after its last write
    ttl: Duration,
    /// Time source for write stamps and age checks
    clock: C,
}

impl<V: Clone> ExpiringCache<V, SystemClock> {
    // == Constructor ==
    /// Creates a cache holding up to `max_size` entries for `ttl_seconds` each.
    ///
    /// # Errors
    /// `ConfigError::InvalidCapacity` if `max_size` is zero,
    /// `ConfigError::InvalidTtl` if `ttl_seconds` is not a positive finite number.
    pub fn new(max_size: usize, ttl_seconds: f64) -> Result<Self> {
        Self::with_clock(max_size, ttl_seconds, SystemClock)
    }

    /// Creates a cache from the capacity and TTL in `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.max_size, config.ttl_seconds)
    }
}

impl<V: Clone, C: Clock> ExpiringCache<V, C> {
    /// Creates a cache that reads time from `clock`.
    pub fn with_clock(max_size: usize, ttl_seconds: f64, clock: C) -> Result<Self> {
        if max_size < 1 {
            return Err(ConfigError::InvalidCapacity(max_size));
        }
        if !(ttl_seconds.is_finite() && ttl_seconds > 0.0) {
            return Err(ConfigError::InvalidTtl(ttl_seconds));
        }
        let ttl = Duration::try_from_secs_f64(ttl_seconds)
            .map_err(|_| ConfigError::InvalidTtl(ttl_seconds))?;

        Ok(Self {
            index: HashMap::with_capacity(max_size.min(PREALLOC_LIMIT)),
            order: LruList::with_capacity(max_size),
            counters: Counters::default(),
            max_size,
            ttl,
            clock,
        })
    }

    // == Get ==
    /// Retrieves a copy of the value stored under `key`.
    ///
    /// A live entry becomes the most recently used and counts as a hit.
    /// A missing entry counts as a miss; an expired one is removed first and
    /// also counts as a miss.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let now = self.clock.now();

        let id = match self.index.get(key) {
            Some(&id) => id,
            None => {
                self.counters.record_miss();
                return None;
            }
        };

        let expired = self
            .order
            .get(id)
            .map_or(true, |entry| entry.is_expired(self.ttl, now));
        if expired {
            self.index.remove(key);
            self.order.remove(id);
            self.counters.record_miss();
            return None;
        }

        self.order.touch(id);
        self.counters.record_hit();
        self.order.get(id).map(|entry| entry.value.clone())
    }

    // == Put ==
    /// Stores `value` under `key` as the most recently used entry.
    ///
    /// Overwriting an existing key replaces its value and restarts its TTL,
    /// even when the value is unchanged. Inserting a new key into a full
    /// cache first evicts the least recently used entry.
    pub fn put(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        let now = self.clock.now();

        if let Some(&id) = self.index.get(&key) {
            if let Some(entry) = self.order.get_mut(id) {
                entry.rewrite(value, now);
            }
            self.order.touch(id);
            return;
        }

        if self.index.len() >= self.max_size {
            if let Some(evicted) = self.order.pop_front() {
                self.index.remove(&evicted.key);
                self.counters.record_eviction();
                debug!(key = %evicted.key, "Evicted least recently used entry");
            }
        }

        let id = self.order.push_back(CacheEntry::new(key.clone(), value, now));
        self.index.insert(key, id);
    }

    // == Delete ==
    /// Removes the entry for `key` if there is one.
    ///
    /// Deleting an absent key is a no-op. Counters are left untouched.
    /// Returns whether an entry was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        match self.index.remove(key) {
            Some(id) => {
                self.order.remove(id);
                true
            }
            None => false,
        }
    }

    // == Evict Expired ==
    /// Removes every entry older than the TTL.
    ///
    /// Survivors keep their relative recency. Returns the number of entries removed.
    pub fn evict_expired(&mut self) -> usize {
        let now = self.clock.now();
        let ttl = self.ttl;

        let expired: Vec<NodeId> = self
            .order
            .iter()
            .filter(|(_, entry)| entry.is_expired(ttl, now))
            .map(|(id, _)| id)
            .collect();

        for &id in &expired {
            if let Some(entry) = self.order.remove(id) {
                self.index.remove(&entry.key);
            }
        }

        expired.len()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn get_stats(&self) -> CacheStats {
        self.counters.snapshot(self.len(), self.max_size)
    }

    // == Clear ==
    /// Drops every entry and resets hits, misses and evictions to zero.
    pub fn clear(&mut self) {
        self.index.clear();
        self.order.clear();
        self.counters.reset();
    }

    // == Contains Key ==
    /// Checks for a live entry without touching recency or counters.
    ///
    /// Entries past their TTL report false even before they are purged.
    pub fn contains_key(&self, key: &str) -> bool {
        let now = self.clock.now();
        self.index
            .get(key)
            .and_then(|&id| self.order.get(id))
            .is_some_and(|entry| !entry.is_expired(self.ttl, now))
    }

    // == Keys ==
    /// Iterates over stored keys from least to most recently used.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.order.iter().map(|(_, entry)| entry.key.as_str())
    }

    // == Length ==
    /// Returns the current number of entries, expired or not.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns the capacity.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Returns the entry lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}
