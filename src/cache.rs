//! The main cache interface.
//!
//! This module provides the `Cache` handle that users interact with. It owns
//! the internal store behind a single mutex: every operation runs as one
//! critical section, so concurrent calls are linearizable.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::config::CacheConfig;
use crate::error::CacheResult;
use crate::stats::StatsSnapshot;
use crate::storage::Store;

/// A thread-safe, fixed-capacity LRU cache with optional per-entry TTL.
///
/// Cloning a `Cache` creates a new handle to the same underlying data. The
/// entries are released when the last handle is dropped.
///
/// # Example
/// ```
/// use lru_ttl_cache::Cache;
///
/// let cache: Cache<u32, u32> = Cache::with_capacity(2).unwrap();
/// cache.put(1, 10);
/// cache.put(2, 20);
/// assert_eq!(cache.get(&1), Some(10));
///
/// // Key 2 is now the least recently used entry.
/// cache.put(3, 30);
/// assert_eq!(cache.get(&2), None);
/// assert_eq!(cache.get(&3), Some(30));
///
/// let stats = cache.stats();
/// assert_eq!((stats.hits, stats.misses), (2, 1));
/// ```
pub struct Cache<K, V> {
    inner: Arc<Mutex<Store<K, V>>>,
}

impl<K, V> Cache<K, V>
where
    K: Hash + Eq,
{
    /// Create a new cache with the given configuration.
    ///
    /// Fails with `CacheError::InvalidConfiguration` if the capacity is zero.
    ///
    /// # Example
    /// ```
    /// use lru_ttl_cache::{Cache, CacheConfig};
    /// use std::time::Duration;
    ///
    /// let config = CacheConfig::new(100)
    ///     .default_ttl(Duration::from_secs(60))
    ///     .build();
    /// let cache: Cache<String, String> = Cache::new(config).unwrap();
    /// assert_eq!(cache.capacity(), 100);
    ///
    /// assert!(Cache::<String, String>::new(CacheConfig::new(0)).is_err());
    /// ```
    pub fn new(config: CacheConfig) -> CacheResult<Self> {
        config.validate()?;
        Ok(Self::from_store(Store::new(&config)))
    }

    /// Create a cache holding at most `capacity` entries, with default
    /// options.
    pub fn with_capacity(capacity: usize) -> CacheResult<Self> {
        Self::new(CacheConfig::new(capacity))
    }

    fn from_store(store: Store<K, V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Run `f` with exclusive access to the store.
    ///
    /// The lock is released when `f` returns, on every path. A poisoned lock
    /// is recovered: store mutations never leave it half-updated.
    fn critical<R>(&self, f: impl FnOnce(&mut Store<K, V>) -> R) -> R {
        let mut store = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut store)
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist or has expired; an expired
    /// entry is removed on the way. A hit makes the key the most recently
    /// used one.
    ///
    /// # Example
    /// ```
    /// use lru_ttl_cache::Cache;
    ///
    /// let cache: Cache<String, String> = Cache::with_capacity(8).unwrap();
    /// cache.put("key".to_string(), "value".to_string());
    ///
    /// match cache.get("key") {
    ///     Some(value) => println!("Found: {}", value),
    ///     None => println!("Not found"),
    /// }
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        let now = Instant::now();
        self.critical(|store| store.get_at(key, now).cloned())
    }

    /// Insert or overwrite a value.
    ///
    /// The entry uses the configured default TTL, if any. Otherwise it never
    /// expires. When a new key arrives at a full cache the least recently
    /// used entry is evicted first.
    pub fn put(&self, key: K, value: V) {
        let now = Instant::now();
        self.critical(|store| store.put_at(key, value, None, now));
    }

    /// Insert or overwrite a value that expires after `ttl`.
    ///
    /// A zero `ttl` means the entry never expires, clearing any TTL a
    /// previous value under the same key had.
    ///
    /// # Example
    /// ```
    /// use lru_ttl_cache::Cache;
    /// use std::time::Duration;
    ///
    /// let cache: Cache<&str, &str> = Cache::with_capacity(8).unwrap();
    /// cache.put_with_ttl("session", "data", Duration::from_secs(3600));
    /// assert!(cache.contains("session"));
    /// ```
    pub fn put_with_ttl(&self, key: K, value: V, ttl: Duration) {
        let now = Instant::now();
        self.critical(|store| store.put_at(key, value, Some(ttl), now));
    }

    /// Remove a key, returning its value if it was present.
    ///
    /// Expired entries that were not reaped yet are removed too.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.critical(|store| store.remove(key))
    }

    /// Check if a live entry exists for the key.
    ///
    /// This does NOT update the recency order or the statistics.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = Instant::now();
        self.critical(|store| store.contains_at(key, now))
    }

    /// Get the number of entries in the cache.
    ///
    /// Note: this includes expired entries that haven't been accessed since
    /// they expired.
    pub fn len(&self) -> usize {
        self.critical(|store| store.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.critical(|store| store.capacity())
    }

    /// Remove all entries from the cache. Statistics are kept.
    pub fn clear(&self) {
        self.critical(|store| store.clear());
    }

    /// Copy out the entries from most to least recently used.
    ///
    /// Read-only: the order and the statistics are left untouched, and
    /// expired entries that were not accessed yet are still listed.
    ///
    /// # Example
    /// ```
    /// use lru_ttl_cache::Cache;
    ///
    /// let cache: Cache<u32, &str> = Cache::with_capacity(3).unwrap();
    /// cache.put(1, "one");
    /// cache.put(2, "two");
    /// let _ = cache.get(&1);
    ///
    /// assert_eq!(cache.snapshot(), vec![(1, "one"), (2, "two")]);
    /// ```
    pub fn snapshot(&self) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.critical(|store| {
            store
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect()
        })
    }

    /// Get a snapshot of the cache statistics.
    pub fn stats(&self) -> StatsSnapshot {
        self.critical(|store| store.stats())
    }
}

impl<K, V> Clone for Cache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> Default for Cache<K, V>
where
    K: Hash + Eq,
{
    /// A cache with `CacheConfig::default()`.
    fn default() -> Self {
        Self::from_store(Store::new(&CacheConfig::default()))
    }
}

impl<K, V> fmt::Debug for Cache<K, V>
where
    K: Hash + Eq,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (len, capacity) = self.critical(|store| (store.len(), store.capacity()));
        f.debug_struct("Cache")
            .field("len", &len)
            .field("capacity", &capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheError;
    use bytes::Bytes;

    fn bytes_cache() -> Cache<String, Bytes> {
        Cache::default()
    }

    fn put_str(cache: &Cache<String, Bytes>, key: &str, value: &'static str) {
        cache.put(key.to_string(), Bytes::from_static(value.as_bytes()));
    }

    #[test]
    fn test_cache_basic_operations() {
        let cache = bytes_cache();

        put_str(&cache, "key", "value");
        assert_eq!(cache.get("key"), Some(Bytes::from("value")));
        assert!(cache.contains("key"));

        assert_eq!(cache.remove("key"), Some(Bytes::from("value")));
        assert!(!cache.contains("key"));
    }

    #[test]
    fn test_zero_capacity_fails() {
        let result = Cache::<u32, u32>::with_capacity(0);
        assert!(matches!(result, Err(CacheError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_cache_is_clone() {
        let cache1 = bytes_cache();
        put_str(&cache1, "key", "value");

        let cache2 = cache1.clone();

        // Both point to the same underlying data
        assert_eq!(cache2.get("key"), Some(Bytes::from("value")));

        put_str(&cache2, "key2", "value2");
        assert_eq!(cache1.get("key2"), Some(Bytes::from("value2")));
    }

    #[test]
    fn test_cache_stats() {
        let cache = bytes_cache();

        put_str(&cache, "key", "value");
        let _ = cache.get("key");
        let _ = cache.get("missing");

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.size, 1);
    }

    #[test]
    fn test_snapshot_does_not_touch_order_or_stats() {
        let cache: Cache<u32, u32> = Cache::with_capacity(2).unwrap();
        cache.put(1, 10);
        cache.put(2, 20);

        assert_eq!(cache.snapshot(), vec![(2, 20), (1, 10)]);
        assert_eq!(cache.snapshot(), vec![(2, 20), (1, 10)]);
        assert_eq!(cache.stats().lookups(), 0);

        // 1 is still the victim.
        cache.put(3, 30);
        assert_eq!(cache.snapshot(), vec![(3, 30), (2, 20)]);
    }

    #[test]
    fn test_survives_poisoned_lock() {
        let cache: Cache<u32, u32> = Cache::with_capacity(2).unwrap();
        cache.put(1, 1);

        let poisoner = cache.clone();
        let _ = std::thread::spawn(move || {
            poisoner.critical(|_| panic!("poison the lock"));
        })
        .join();

        assert_eq!(cache.get(&1), Some(1));
        cache.put(2, 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_cache_thread_safety() {
        use std::thread;

        let cache: Cache<String, String> = Cache::with_capacity(50).unwrap();
        let mut handles = vec![];

        // Spawn multiple threads that read/write concurrently
        for i in 0..10 {
            let cache = cache.clone();
            let handle = thread::spawn(move || {
                for j in 0..100 {
                    let key = format!("key_{}", j);
                    cache.put(key.clone(), format!("value_{}_{}", i, j));
                    let _ = cache.get(&key);
                }
            });
            handles.push(handle);
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), 50);
        assert_eq!(cache.stats().lookups(), 1000);
        cache.critical(|store| store.assert_consistent());
    }
}
