//! Internal storage implementation for the cache.
//!
//! The index and the recency ordering share a single `IndexMap`. Each slot
//! carries the positions of its neighbours, forming a doubly linked list over
//! the map's dense storage: `head` is the most recently used slot, `tail` the
//! least recently used one. Removals use `swap_remove_index`, so the slot that
//! moves into the freed position must have its neighbours re-pointed.
//!
//! `Store` is not synchronized; `Cache` owns it behind a mutex.

use indexmap::IndexMap;
use std::borrow::Borrow;
use std::hash::Hash;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

use crate::config::CacheConfig;
use crate::entry::Entry;
use crate::stats::{CacheStats, StatsSnapshot};

/// Null link.
const NIL: usize = usize::MAX;

#[derive(Debug)]
struct Slot<V> {
    entry: Entry<V>,
    prev: usize,
    next: usize,
}

#[derive(Debug)]
pub(crate) struct Store<K, V> {
    slots: IndexMap<K, Slot<V>>,
    /// Most recently used slot.
    head: usize,
    /// Least recently used slot, the next eviction victim.
    tail: usize,
    capacity: usize,
    default_ttl: Option<Duration>,
    expiry: bool,
    stats: CacheStats,
}

impl<K, V> Store<K, V>
where
    K: Hash + Eq,
{
    /// Create an empty store. The configuration must already be validated.
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            slots: IndexMap::with_capacity(config.capacity),
            head: NIL,
            tail: NIL,
            capacity: config.capacity,
            default_ttl: config.default_ttl,
            expiry: config.expiry,
            stats: CacheStats::new(config.track_stats),
        }
    }

    /// Look up a key as of `now`.
    ///
    /// A live entry is promoted to most recently used. An expired entry is
    /// removed and reported as a miss.
    pub fn get_at<Q>(&mut self, key: &Q, now: Instant) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(idx) = self.slots.get_index_of(key) else {
            self.stats.record_miss();
            trace!("cache miss");
            return None;
        };

        if self.slots[idx].entry.is_expired_at(now) {
            self.remove_at(idx);
            self.stats.record_miss();
            self.stats.record_expiration();
            debug!(size = self.slots.len(), "lazily expired entry on access");
            return None;
        }

        self.promote(idx);
        self.stats.record_hit();
        trace!("cache hit");
        Some(&self.slots[idx].entry.value)
    }

    /// Insert or overwrite a key as of `now`.
    ///
    /// `ttl` of `None` falls back to the configured default; a zero TTL means
    /// the entry never expires. Inserting a new key into a full store evicts
    /// the least recently used entry first, expired or not.
    pub fn put_at(&mut self, key: K, value: V, ttl: Option<Duration>, now: Instant) {
        let expires_at = self.deadline(ttl, now);
        self.stats.record_set();

        if let Some(idx) = self.slots.get_index_of(&key) {
            self.slots[idx].entry.replace(value, expires_at);
            self.promote(idx);
            return;
        }

        if self.slots.len() >= self.capacity {
            self.evict_lru();
        }

        let slot = Slot {
            entry: Entry::new(value, expires_at),
            prev: NIL,
            next: NIL,
        };
        let (idx, _) = self.slots.insert_full(key, slot);
        self.push_front(idx);
    }

    /// Remove a key regardless of its expiry.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.slots.get_index_of(key)?;
        let (_, entry) = self.remove_at(idx)?;
        self.stats.record_removal();
        Some(entry.into_value())
    }

    /// Whether a live entry exists as of `now`. Never reorders or reaps.
    pub fn contains_at<Q>(&self, key: &Q, now: Instant) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.slots
            .get(key)
            .map_or(false, |slot| !slot.entry.is_expired_at(now))
    }

    /// Drop every entry. Counters are kept.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = NIL;
        self.tail = NIL;
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot(self.slots.len(), self.capacity)
    }

    /// Iterate from most to least recently used, including entries that
    /// have expired but were not reaped yet.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            store: self,
            cursor: self.head,
        }
    }

    fn deadline(&self, ttl: Option<Duration>, now: Instant) -> Option<Instant> {
        if !self.expiry {
            return None;
        }
        ttl.or(self.default_ttl)
            .filter(|ttl| !ttl.is_zero())
            .and_then(|ttl| now.checked_add(ttl))
    }

    fn evict_lru(&mut self) {
        if self.tail == NIL {
            return;
        }
        if self.remove_at(self.tail).is_some() {
            self.stats.record_eviction();
            debug!(capacity = self.capacity, "evicted least recently used entry");
        }
    }

    fn promote(&mut self, idx: usize) {
        if self.head == idx {
            return;
        }
        self.unlink(idx);
        self.push_front(idx);
    }

    fn push_front(&mut self, idx: usize) {
        let old_head = self.head;
        {
            let slot = &mut self.slots[idx];
            slot.prev = NIL;
            slot.next = old_head;
        }
        if old_head == NIL {
            self.tail = idx;
        } else {
            self.slots[old_head].prev = idx;
        }
        self.head = idx;
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = {
            let slot = &self.slots[idx];
            (slot.prev, slot.next)
        };
        if prev == NIL {
            self.head = next;
        } else {
            self.slots[prev].next = next;
        }
        if next == NIL {
            self.tail = prev;
        } else {
            self.slots[next].prev = prev;
        }
        let slot = &mut self.slots[idx];
        slot.prev = NIL;
        slot.next = NIL;
    }

    /// Unlink and remove the slot at `idx`, fixing up the slot that
    /// `swap_remove_index` moves from the last position into `idx`.
    fn remove_at(&mut self, idx: usize) -> Option<(K, Entry<V>)> {
        if idx >= self.slots.len() {
            return None;
        }
        self.unlink(idx);
        let last = self.slots.len() - 1;
        let (key, slot) = self.slots.swap_remove_index(idx)?;
        if idx != last {
            self.relink_moved(idx);
        }
        Some((key, slot.entry))
    }

    /// Point the neighbours of the slot now living at `idx` back at it.
    fn relink_moved(&mut self, idx: usize) {
        let (prev, next) = {
            let slot = &self.slots[idx];
            (slot.prev, slot.next)
        };
        if prev == NIL {
            self.head = idx;
        } else {
            self.slots[prev].next = idx;
        }
        if next == NIL {
            self.tail = idx;
        } else {
            self.slots[next].prev = idx;
        }
    }

    /// Walk the list both ways and check it agrees with the index.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        assert!(self.slots.len() <= self.capacity, "over capacity");

        let mut seen = vec![false; self.slots.len()];
        let mut count = 0;
        let mut prev = NIL;
        let mut cursor = self.head;
        while cursor != NIL {
            assert!(!seen[cursor], "slot {} linked twice", cursor);
            seen[cursor] = true;
            assert_eq!(self.slots[cursor].prev, prev, "broken back link");
            prev = cursor;
            cursor = self.slots[cursor].next;
            count += 1;
        }
        assert_eq!(self.tail, prev, "tail is not the last linked slot");
        assert_eq!(count, self.slots.len(), "list and index disagree");
    }
}

/// Iterator over a store from most to least recently used.
pub(crate) struct Iter<'a, K, V> {
    store: &'a Store<K, V>,
    cursor: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == NIL {
            return None;
        }
        let (key, slot) = self.store.slots.get_index(self.cursor)?;
        self.cursor = slot.next;
        Some((key, &slot.entry.value))
    }
}
