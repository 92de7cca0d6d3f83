//! Error types for the cache
//!
//! Only construction can fail. Misses, expiry and eviction are normal outcomes
//! and are reported as `None`, never as errors.

use thiserror::Error;

// == Config Error Enum ==
/// Invalid parameters supplied when building a cache.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Capacity must hold at least one entry
    #[error("Invalid capacity: max_size must be at least 1, got {0}")]
    InvalidCapacity(usize),

    /// TTL must be a finite, strictly positive number of seconds
    #[error("Invalid TTL: ttl_seconds must be a positive number, got {0}")]
    InvalidTtl(f64),
}

// == Result Type Alias ==
/// Convenience Result type for cache construction.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ConfigError::InvalidCapacity(0);
        assert!(err.to_string().contains("at least 1"));

        let err = ConfigError::InvalidTtl(-1.5);
        assert!(err.to_string().contains("-1.5"));
    }
}
