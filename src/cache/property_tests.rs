//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the cache against a plain reference model under
//! simulated time.

use proptest::prelude::*;
use std::collections::HashSet;
use std::time::Duration;

use crate::cache::{ExpiringCache, ManualClock};

// == Test Configuration ==
const TEST_MAX_SIZE: usize = 8;
const TEST_TTL_SECS: u64 = 10;

// == Strategies ==
/// Generates keys from a small alphabet so operations collide often
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-f]{1,2}".prop_map(|s| s)
}

/// Generates unique-looking parameter paths
fn path_strategy() -> impl Strategy<Value = String> {
    "/[a-z]{1,8}/[a-z0-9_]{1,16}".prop_map(|s| s)
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,32}".prop_map(|s| s)
}

/// A single step against the cache
#[derive(Debug, Clone)]
enum CacheOp {
    Put { key: String, value: String },
    Get { key: String },
    Delete { key: String },
    Advance { millis: u64 },
    EvictExpired,
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        4 => (key_strategy(), value_strategy())
            .prop_map(|(key, value)| CacheOp::Put { key, value }),
        4 => key_strategy().prop_map(|key| CacheOp::Get { key }),
        1 => key_strategy().prop_map(|key| CacheOp::Delete { key }),
        2 => (0u64..6_000).prop_map(|millis| CacheOp::Advance { millis }),
        1 => Just(CacheOp::EvictExpired),
    ]
}

// == Reference Model ==
/// Recency-ordered list of (key, value, written_at_ms), least recent first.
#[derive(Debug, Default)]
struct Model {
    entries: Vec<(String, String, u64)>,
    now_ms: u64,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl Model {
    fn is_expired(&self, written_at: u64) -> bool {
        self.now_ms - written_at > TEST_TTL_SECS * 1000
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _, _)| k == key)
    }

    fn put(&mut self, key: String, value: String) {
        if let Some(pos) = self.position(&key) {
            self.entries.remove(pos);
        } else if self.entries.len() >= TEST_MAX_SIZE {
            self.entries.remove(0);
            self.evictions += 1;
        }
        self.entries.push((key, value, self.now_ms));
    }

    fn get(&mut self, key: &str) -> Option<String> {
        let pos = match self.position(key) {
            Some(pos) => pos,
            None => {
                self.misses += 1;
                return None;
            }
        };
        let entry = self.entries.remove(pos);
        if self.is_expired(entry.2) {
            self.misses += 1;
            return None;
        }
        self.hits += 1;
        let value = entry.1.clone();
        self.entries.push(entry);
        Some(value)
    }

    fn delete(&mut self, key: &str) {
        if let Some(pos) = self.position(key) {
            self.entries.remove(pos);
        }
    }

    fn evict_expired(&mut self) -> usize {
        let before = self.entries.len();
        let now = self.now_ms;
        self.entries
            .retain(|(_, _, written_at)| now - written_at <= TEST_TTL_SECS * 1000);
        before - self.entries.len()
    }

    fn keys(&self) -> Vec<String> {
        self.entries.iter().map(|(k, _, _)| k.clone()).collect()
    }
}

fn new_cache() -> (ExpiringCache<String, ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    let cache =
        ExpiringCache::with_clock(TEST_MAX_SIZE, TEST_TTL_SECS as f64, clock.clone()).unwrap();
    (cache, clock)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Property: Model Equivalence
    // *For any* sequence of operations, the cache returns the same values, keeps
    // the same recency order and reports the same counters as the reference model.
    #[test]
    fn prop_matches_reference_model(ops in prop::collection::vec(cache_op_strategy(), 1..120)) {
        let (mut cache, clock) = new_cache();
        let mut model = Model::default();

        for op in ops {
            match op {
                CacheOp::Put { key, value } => {
                    cache.put(key.clone(), value.clone());
                    model.put(key, value);
                }
                CacheOp::Get { key } => {
                    prop_assert_eq!(cache.get(&key), model.get(&key), "get({}) mismatch", key);
                }
                CacheOp::Delete { key } => {
                    cache.delete(&key);
                    model.delete(&key);
                }
                CacheOp::Advance { millis } => {
                    clock.advance(Duration::from_millis(millis));
                    model.now_ms += millis;
                }
                CacheOp::EvictExpired => {
                    prop_assert_eq!(cache.evict_expired(), model.evict_expired());
                }
            }

            let keys: Vec<String> = cache.keys().map(str::to_string).collect();
            prop_assert_eq!(keys, model.keys(), "Recency order mismatch");

            let stats = cache.get_stats();
            prop_assert_eq!(stats.size, model.entries.len());
            prop_assert_eq!(stats.hits, model.hits, "Hits mismatch");
            prop_assert_eq!(stats.misses, model.misses, "Misses mismatch");
            prop_assert_eq!(stats.evictions, model.evictions, "Evictions mismatch");
        }
    }

    // Property: Capacity Enforcement
    // *For any* sequence of puts, the size never exceeds max_size and stays at
    // max_size once that many distinct keys have been inserted.
    #[test]
    fn prop_capacity_enforcement(
        entries in prop::collection::vec((path_strategy(), value_strategy()), 1..200)
    ) {
        let (mut cache, _clock) = new_cache();
        let mut seen = HashSet::new();

        for (key, value) in entries {
            seen.insert(key.clone());
            cache.put(key, value);
            prop_assert!(
                cache.len() <= TEST_MAX_SIZE,
                "Cache size {} exceeds max {}",
                cache.len(),
                TEST_MAX_SIZE
            );
            prop_assert_eq!(cache.len(), seen.len().min(TEST_MAX_SIZE));
        }
    }

    // Property: Round-trip Before Expiry
    // *For any* key and value, a get issued before the TTL elapses returns the
    // value that was put.
    #[test]
    fn prop_roundtrip_before_ttl(
        key in path_strategy(),
        value in value_strategy(),
        elapsed_ms in 0u64..=TEST_TTL_SECS * 1000
    ) {
        let (mut cache, clock) = new_cache();

        cache.put(key.clone(), value.clone());
        clock.advance(Duration::from_millis(elapsed_ms));

        prop_assert_eq!(cache.get(&key), Some(value));
    }

    // Property: Expired Entries Are Purged
    // *For any* key, once the TTL has elapsed a get returns nothing and the
    // entry no longer counts toward the size.
    #[test]
    fn prop_expired_entries_purged(
        key in path_strategy(),
        value in value_strategy(),
        extra_ms in 1u64..60_000
    ) {
        let (mut cache, clock) = new_cache();

        cache.put(key.clone(), value);
        clock.advance(Duration::from_millis(TEST_TTL_SECS * 1000 + extra_ms));

        prop_assert_eq!(cache.get(&key), None);
        prop_assert_eq!(cache.get_stats().size, 0);
        prop_assert_eq!(cache.evict_expired(), 0);
    }

    // Property: LRU Eviction Order
    // *For any* set of distinct keys filling the cache, reading one key protects
    // it, and the next insert evicts the least recently touched key instead.
    #[test]
    fn prop_lru_eviction_order(
        keys in prop::collection::hash_set(path_strategy(), 2..=TEST_MAX_SIZE),
        touched in any::<prop::sample::Index>(),
        new_key in "#[a-z]{1,8}"
    ) {
        let keys: Vec<String> = keys.into_iter().collect();
        let capacity = keys.len();
        let clock = ManualClock::new();
        let mut cache: ExpiringCache<String, ManualClock> =
            ExpiringCache::with_clock(capacity, 300.0, clock).unwrap();

        for key in &keys {
            cache.put(key.clone(), format!("value_{}", key));
        }

        let touched = touched.index(capacity);
        prop_assert!(cache.get(&keys[touched]).is_some());

        let expected_victim = if touched == 0 { &keys[1] } else { &keys[0] };
        cache.put(new_key.clone(), "new".to_string());

        prop_assert_eq!(cache.len(), capacity);
        prop_assert_eq!(cache.get_stats().evictions, 1);
        prop_assert!(!cache.contains_key(expected_victim));
        prop_assert!(cache.contains_key(&keys[touched]));
        prop_assert!(cache.contains_key(&new_key));
    }

    // Property: Hit Rate
    // *For any* number of hits and misses, hit_rate equals hits / (hits + misses).
    #[test]
    fn prop_hit_rate(hits in 0u64..50, misses in 0u64..50) {
        let (mut cache, _clock) = new_cache();
        cache.put("present", "v".to_string());

        for _ in 0..hits {
            cache.get("present");
        }
        for _ in 0..misses {
            cache.get("absent");
        }

        let stats = cache.get_stats();
        let expected = if hits + misses == 0 {
            0.0
        } else {
            hits as f64 / (hits + misses) as f64
        };
        prop_assert_eq!(stats.hit_rate, expected);
    }

    // Property: Clear Resets Everything
    // *For any* prior history, clear leaves an empty cache with zeroed counters.
    #[test]
    fn prop_clear_resets(ops in prop::collection::vec(cache_op_strategy(), 0..60)) {
        let (mut cache, clock) = new_cache();

        for op in ops {
            match op {
                CacheOp::Put { key, value } => cache.put(key, value),
                CacheOp::Get { key } => {
                    cache.get(&key);
                }
                CacheOp::Delete { key } => {
                    cache.delete(&key);
                }
                CacheOp::Advance { millis } => clock.advance(Duration::from_millis(millis)),
                CacheOp::EvictExpired => {
                    cache.evict_expired();
                }
            }
        }

        cache.clear();
        let stats = cache.get_stats();
        prop_assert_eq!(stats.size, 0);
        prop_assert_eq!(stats.hits, 0);
        prop_assert_eq!(stats.misses, 0);
        prop_assert_eq!(stats.evictions, 0);
        prop_assert_eq!(cache.keys().count(), 0);
    }
}
