// src/recycle/config.rs
//! Configuration for recycle pools

/// Number of idle instances each process-wide pool keeps.
pub const DEFAULT_POOL_CAPACITY: usize = 16;

/// Configuration for recycle pool behavior.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Maximum number of idle instances to keep; extra returns are dropped
    pub capacity: usize,
    /// Number of instances to pre-allocate at startup (capped at `capacity`)
    pub prewarm: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_POOL_CAPACITY,
            prewarm: 0,
        }
    }
}

impl PoolConfig {
    /// Configuration holding up to `capacity` idle instances, none prewarmed.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            prewarm: 0,
        }
    }

    /// Configuration for servers with many concurrent connections.
    pub fn large() -> Self {
        Self {
            capacity: 256,
            prewarm: 16,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_process_pools() {
        let config = PoolConfig::default();
        assert_eq!(config.capacity, 16);
        assert_eq!(config.prewarm, 0);
    }

    #[test]
    fn test_large_prewarm_fits_capacity() {
        let config = PoolConfig::large();
        assert!(config.prewarm <= config.capacity);
    }
}
