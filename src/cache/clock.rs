//! Clock Module
//!
//! Time sources for entry ages. The cache only ever compares readings from
//! the same clock, so any non-decreasing source works.

use std::fmt::Debug;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

// == Clock Trait ==
/// A non-decreasing time source.
pub trait Clock: Debug + Send + Sync {
    /// Returns the current reading.
    fn now(&self) -> Instant;
}

// == System Clock ==
/// Monotonic wall time via `Instant::now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

// == Manual Clock ==
/// Simulated time that only moves when advanced.
///
/// Clones share the same reading, so a test can keep one handle and hand
/// another to the cache.
#[derive(Debug, Clone)]
pub struct ManualClock {
    current: Arc<Mutex<Instant>>,
}

impl ManualClock {
    /// Creates a clock frozen at the current instant.
    pub fn new() -> Self {
        Self {
            current: Arc::new(Mutex::new(Instant::now())),
        }
    }

    /// Moves simulated time forward by `by`.
    pub fn advance(&self, by: Duration) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current += by;
    }

    /// Moves simulated time forward by a fractional number of seconds.
    /// Negative, non-finite or unrepresentable amounts are ignored.
    pub fn advance_secs(&self, secs: f64) {
        if secs > 0.0 {
            if let Ok(by) = Duration::try_from_secs_f64(secs) {
                self.advance(by);
            }
        }
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}
