//! Parameter Cache
//!
//! Caches values fetched from a parameter store so repeated lookups of the
//! same name do not reach the store until the entry expires or is evicted.

use std::cell::Cell;
use std::collections::HashMap;

use tracing::debug;

use crate::cache::{CacheStats, Clock, ExpiringCache, SystemClock};
use crate::error::Result;

// == Parameter Store ==
/// Backing store the cache reads through to.
pub trait ParameterStore {
    /// Looks up a parameter, returning None if the store has no such name.
    fn fetch(&self, name: &str) -> Option<String>;
}

// == In-Memory Parameter Store ==
/// HashMap-backed store that counts how often it is fetched from.
#[derive(Debug, Default)]
pub struct InMemoryParameterStore {
    params: HashMap<String, String>,
    fetches: Cell<u64>,
}

impl InMemoryParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a parameter.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.params.insert(name.into(), value.into());
    }

    /// Removes a parameter, returning whether it existed.
    pub fn remove(&mut self, name: &str) -> bool {
        self.params.remove(name).is_some()
    }

    /// Number of `fetch` calls served so far.
    pub fn fetch_count(&self) -> u64 {
        self.fetches.get()
    }
}

impl ParameterStore for InMemoryParameterStore {
    fn fetch(&self, name: &str) -> Option<String> {
        self.fetches.set(self.fetches.get() + 1);
        self.params.get(name).cloned()
    }
}

// == Parameter Cache ==
/// Read-through cache over a [`ParameterStore`].
#[derive(Debug)]
pub struct ParameterCache<S, C = SystemClock> {
    store: S,
    cache: ExpiringCache<String, C>,
}

impl<S: ParameterStore> ParameterCache<S, SystemClock> {
    /// Creates a parameter cache holding up to `max_size` values for `ttl_seconds` each.
    pub fn new(store: S, max_size: usize, ttl_seconds: f64) -> Result<Self> {
        Ok(Self::with_cache(store, ExpiringCache::new(max_size, ttl_seconds)?))
    }
}

impl<S: ParameterStore, C: Clock> ParameterCache<S, C> {
    /// Wraps an already built cache.
    pub fn with_cache(store: S, cache: ExpiringCache<String, C>) -> Self {
        Self { store, cache }
    }

    // == Get Parameter ==
    /// Returns the parameter value, fetching from the store on a cache miss.
    ///
    /// Names the store does not know are not cached, so a later insert into
    /// the store becomes visible on the next lookup.
    pub fn get_parameter(&mut self, name: &str) -> Option<String> {
        if let Some(value) = self.cache.get(name) {
            return Some(value);
        }

        let value = self.store.fetch(name)?;
        debug!(parameter = %name, "Fetched parameter from store");
        self.cache.put(name, value.clone());
        Some(value)
    }

    /// Drops a cached parameter after it changed or was deleted upstream.
    pub fn invalidate(&mut self, name: &str) -> bool {
        self.cache.delete(name)
    }

    /// Purges expired parameters, returning how many were removed.
    pub fn evict_expired(&mut self) -> usize {
        self.cache.evict_expired()
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.get_stats()
    }

    /// Empties the cache and resets its counters.
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Returns the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the backing store mutably, e.g. to simulate upstream changes.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}
