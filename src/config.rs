//! Configuration Module
//!
//! Handles loading and validating cache and simulation settings from
//! environment variables.

use std::env;
use std::str::FromStr;

use crate::error::{ConfigError, Result};

/// Cache and demo host configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub max_size: usize,
    /// Lifetime of an entry in seconds, measured from its last write
    pub ttl_seconds: f64,
    /// Interval in seconds between background expiry sweeps
    pub sweep_interval_secs: u64,
    /// Number of pod churn rounds the demo binary simulates
    pub sim_iterations: usize,
    /// Number of pods created per simulated round
    pub pods_per_iteration: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX_SIZE` - Maximum cache entries (default: 100)
    /// - `CACHE_TTL_SECONDS` - Entry lifetime in seconds (default: 300)
    /// - `SWEEP_INTERVAL_SECS` - Expiry sweep frequency in seconds (default: 1)
    /// - `SIM_ITERATIONS` - Simulated churn rounds (default: 50)
    /// - `PODS_PER_ITERATION` - Pods created per round (default: 10)
    ///
    /// Values that fail to parse fall back to their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_size: env_or("CACHE_MAX_SIZE", defaults.max_size),
            ttl_seconds: env_or("CACHE_TTL_SECONDS", defaults.ttl_seconds),
            sweep_interval_secs: env_or("SWEEP_INTERVAL_SECS", defaults.sweep_interval_secs),
            sim_iterations: env_or("SIM_ITERATIONS", defaults.sim_iterations),
            pods_per_iteration: env_or("PODS_PER_ITERATION", defaults.pods_per_iteration),
        }
    }

    /// Checks the cache parameters before any cache is built from them.
    pub fn validate(&self) -> Result<()> {
        if self.max_size < 1 {
            return Err(ConfigError::InvalidCapacity(self.max_size));
        }
        if !(self.ttl_seconds.is_finite() && self.ttl_seconds > 0.0) {
            return Err(ConfigError::InvalidTtl(self.ttl_seconds));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_size: 100,
            ttl_seconds: 300.0,
            sweep_interval_secs: 1,
            sim_iterations: 50,
            pods_per_iteration: 10,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
