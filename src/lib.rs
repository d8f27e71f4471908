//! # LRU TTL Cache
//!
//! A fixed-capacity, thread-safe, in-memory cache with least-recently-used
//! eviction and optional per-entry time-to-live.
//!
//! ## Features
//!
//! - **Bounded**: never holds more than its configured capacity
//! - **LRU eviction**: a new key arriving at a full cache evicts the least recently used entry
//! - **Lazy TTL**: expired entries are dropped when they are next read, no background sweeper
//! - **Thread-safe**: share across threads with `Clone` (one `Arc<Mutex<_>>` inside)
//! - **Statistics**: hits, misses, evictions and expirations
//! - **Zero unsafe code**: the recency list links slots by index, not by pointer
//!
//! ## Quick Start
//!
//! ```rust
//! use lru_ttl_cache::{Cache, CacheConfig};
//! use std::time::Duration;
//!
//! let config = CacheConfig::new(10_000)
//!     .default_ttl(Duration::from_secs(300))
//!     .build();
//!
//! let cache: Cache<&str, String> = Cache::new(config).expect("capacity is non-zero");
//!
//! cache.put("user:123", "Alice".to_string());
//!
//! if let Some(value) = cache.get("user:123") {
//!     println!("Found: {}", value);
//! }
//!
//! // Set with custom TTL
//! cache.put_with_ttl("session:abc", "session_data".to_string(), Duration::from_secs(60));
//!
//! // Most recently used first
//! for (key, value) in cache.snapshot() {
//!     println!("{} = {}", key, value);
//! }
//!
//! let stats = cache.stats();
//! println!("Hit rate: {:.1}%", stats.hit_rate);
//! ```
//!
//! ## Thread Safety
//!
//! Every operation takes the same lock for its whole duration, so concurrent
//! calls behave as if they ran one after another:
//!
//! ```rust
//! use lru_ttl_cache::Cache;
//! use std::thread;
//!
//! let cache: Cache<String, String> = Cache::with_capacity(100).unwrap();
//!
//! let handles: Vec<_> = (0..4).map(|i| {
//!     let cache = cache.clone();
//!     thread::spawn(move || {
//!         cache.put(format!("key_{}", i), format!("value_{}", i));
//!     })
//! }).collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(cache.len(), 4);
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod stats;

pub use cache::Cache;
pub use config::CacheConfig;
pub use error::{CacheError, CacheResult};
pub use stats::StatsSnapshot;

// Internal modules - not part of public API
pub(crate) mod entry;
pub(crate) mod storage;

// Text protocol shared by the shell, server and client binaries
pub mod cli;
pub mod command;
pub mod utils;

pub use command::{Command, Request};
