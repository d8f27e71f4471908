//! Cache entry with its expiration metadata.

use std::time::Instant;

/// A single cached value.
///
/// Recency is not tracked here: it is the entry's position in the store's
/// ordering that decides eviction.
#[derive(Debug, Clone)]
pub struct Entry<V> {
    /// The stored value.
    pub(crate) value: V,

    /// When this entry expires. `None` means no expiration.
    pub(crate) expires_at: Option<Instant>,
}

impl<V> Entry<V> {
    pub fn new(value: V, expires_at: Option<Instant>) -> Self {
        Self { value, expires_at }
    }

    /// Check if this entry has expired at a given time.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now >= expires,
            None => false,
        }
    }

    /// Overwrite the value and the expiry in place.
    ///
    /// A `None` expiry clears any previous deadline.
    pub fn replace(&mut self, value: V, expires_at: Option<Instant>) {
        self.value = value;
        self.expires_at = expires_at;
    }

    pub fn into_value(self) -> V {
        self.value
    }
}
