//! Background Tasks Module
//!
//! Host-side tasks that drive a cache shared behind a single mutex.
//!
//! # Tasks
//! - Expiry sweep: calls `evict_expired` at a fixed interval
//! - Invalidation: deletes keys announced on a channel

mod invalidation;
mod sweep;

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::cache::{ExpiringCache, SystemClock};

pub use invalidation::spawn_invalidation_task;
pub use sweep::spawn_sweep_task;

/// A cache shared between tasks. Every operation holds the one lock for its
/// full duration.
pub type SharedCache<V, C = SystemClock> = Arc<Mutex<ExpiringCache<V, C>>>;

/// Wraps an owned cache for use from several tasks.
pub fn share<V, C>(cache: ExpiringCache<V, C>) -> SharedCache<V, C> {
    Arc::new(Mutex::new(cache))
}
