//! Statistics for the cache.
//!
//! The counters live inside the store and are only touched while the cache
//! lock is held, so they are plain integers rather than atomics.

/// Counters for cache operations.
///
/// When tracking is disabled every `record_*` call is a no-op and all
/// counters stay at zero.
#[derive(Debug, Default)]
pub struct CacheStats {
    enabled: bool,

    /// Number of successful get operations (key found and live).
    hits: u64,

    /// Number of failed get operations (key not found or expired).
    misses: u64,

    /// Number of entries evicted due to capacity limits.
    evictions: u64,

    /// Number of entries removed due to TTL expiration.
    expirations: u64,

    /// Total number of put operations performed.
    sets: u64,

    /// Number of entries removed explicitly.
    removals: u64,
}

impl CacheStats {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            ..Self::default()
        }
    }

    pub fn record_hit(&mut self) {
        if self.enabled {
            self.hits += 1;
        }
    }

    pub fn record_miss(&mut self) {
        if self.enabled {
            self.misses += 1;
        }
    }

    pub fn record_eviction(&mut self) {
        if self.enabled {
            self.evictions += 1;
        }
    }

    pub fn record_expiration(&mut self) {
        if self.enabled {
            self.expirations += 1;
        }
    }

    pub fn record_set(&mut self) {
        if self.enabled {
            self.sets += 1;
        }
    }

    pub fn record_removal(&mut self) {
        if self.enabled {
            self.removals += 1;
        }
    }

    /// Create a point-in-time snapshot.
    ///
    /// `size` and `capacity` come from the store since they are structural,
    /// not counted.
    pub fn snapshot(&self, size: usize, capacity: usize) -> StatsSnapshot {
        StatsSnapshot {
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
            expirations: self.expirations,
            sets: self.sets,
            removals: self.removals,
            size,
            capacity,
            hit_rate: hit_rate(self.hits, self.misses),
        }
    }
}

/// Hit rate as a percentage (0.0 to 100.0), 0.0 when there were no lookups.
fn hit_rate(hits: u64, misses: u64) -> f64 {
    let total = hits + misses;
    if total == 0 {
        0.0
    } else {
        (hits as f64 / total as f64) * 100.0
    }
}

/// A point-in-time snapshot of cache statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsSnapshot {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
    pub sets: u64,
    pub removals: u64,
    pub size: usize,
    pub capacity: usize,
    pub hit_rate: f64,
}

impl StatsSnapshot {
    /// Total number of get calls observed (hits + misses).
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_stats() {
        let stats = CacheStats::new(true);
        let snapshot = stats.snapshot(0, 4);
        assert_eq!(snapshot.hits, 0);
        assert_eq!(snapshot.misses, 0);
        assert_eq!(snapshot.capacity, 4);
    }

    #[test]
    fn test_record_operations() {
        let mut stats = CacheStats::new(true);

        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        stats.record_eviction();

        let snapshot = stats.snapshot(2, 2);
        assert_eq!(snapshot.hits, 2);
        assert_eq!(snapshot.misses, 1);
        assert_eq!(snapshot.evictions, 1);
        assert_eq!(snapshot.lookups(), 3);
    }

    #[test]
    fn test_hit_rate() {
        let mut stats = CacheStats::new(true);
        assert_eq!(stats.snapshot(0, 1).hit_rate, 0.0);

        // 3 hits, 1 miss = 75% hit rate
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();

        assert!((stats.snapshot(0, 1).hit_rate - 75.0).abs() < 0.01);
    }

    #[test]
    fn test_disabled_stats_stay_zero() {
        let mut stats = CacheStats::new(false);
        stats.record_hit();
        stats.record_miss();
        stats.record_set();

        let snapshot = stats.snapshot(1, 1);
        assert_eq!(snapshot.lookups(), 0);
        assert_eq!(snapshot.sets, 0);
        assert_eq!(snapshot.size, 1);
    }
}
