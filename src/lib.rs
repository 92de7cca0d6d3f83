//! Expiring LRU - A bounded in-memory cache with TTL expiration
//!
//! Holds at most N entries, each valid for T seconds after its last write,
//! evicting the least recently used entry when full and tracking hit/miss/
//! eviction metrics. Host-side helpers run expiry sweeps and invalidations
//! on tokio.

pub mod cache;
pub mod config;
pub mod error;
pub mod pods;
pub mod sources;
pub mod tasks;

pub use cache::{CacheStats, Clock, ExpiringCache, ManualClock, SystemClock};
pub use config::Config;
pub use error::ConfigError;
pub use tasks::{share, spawn_invalidation_task, spawn_sweep_task, SharedCache};
