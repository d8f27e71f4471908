//! Configuration for the cache.
//!
//! This module provides a builder for the capacity limit and for the
//! optional features of the engine: TTL expiry and statistics tracking.

use std::time::Duration;

use crate::error::{CacheError, CacheResult};

/// Capacity used by `CacheConfig::default()`.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Configuration for creating a new cache instance.
///
/// ```
/// use lru_ttl_cache::CacheConfig;
/// use std::time::Duration;
///
/// let config = CacheConfig::new(10_000)
///     .default_ttl(Duration::from_secs(300))
///     .track_stats(true)
///     .build();
///
/// assert_eq!(config.capacity(), 10_000);
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries. When full, the least recently used entry
    /// is evicted to make room for a new key.
    pub(crate) capacity: usize,

    /// TTL applied by `put` when no explicit TTL is given.
    /// `None` means entries don't expire by default.
    pub(crate) default_ttl: Option<Duration>,

    /// Whether TTLs are honoured at all. When disabled, entries never expire.
    pub(crate) expiry: bool,

    /// Whether hit/miss/eviction counters are maintained.
    pub(crate) track_stats: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            default_ttl: None,
            expiry: true,
            track_stats: true,
        }
    }
}

impl CacheConfig {
    /// Create a new configuration builder with the given capacity.
    ///
    /// The capacity is checked when the cache is constructed, not here.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    /// Set the default TTL for entries stored without an explicit TTL.
    ///
    /// `Duration::ZERO` disables the default.
    pub fn default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = if ttl.is_zero() { None } else { Some(ttl) };
        self
    }

    /// Enable or disable TTL expiry.
    pub fn expiry(mut self, enabled: bool) -> Self {
        self.expiry = enabled;
        self
    }

    /// Enable or disable statistics tracking.
    pub fn track_stats(mut self, enabled: bool) -> Self {
        self.track_stats = enabled;
        self
    }

    /// Build the final configuration.
    pub fn build(self) -> Self {
        self
    }

    /// Check that the configuration describes a usable cache.
    pub fn validate(&self) -> CacheResult<()> {
        if self.capacity == 0 {
            return Err(CacheError::InvalidConfiguration(
                "capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn get_default_ttl(&self) -> Option<Duration> {
        self.default_ttl
    }

    pub fn expiry_enabled(&self) -> bool {
        self.expiry
    }

    pub fn stats_enabled(&self) -> bool {
        self.track_stats
    }
}
