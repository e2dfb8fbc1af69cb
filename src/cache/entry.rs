//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// Represents a single cache entry with its key, value and recency timestamp.
#[derive(Debug, Clone)]
pub struct CacheEntry<K, V> {
    /// The key the entry is indexed under
    pub key: K,
    /// The stored value
    pub value: V,
    /// When the entry was inserted or last refreshed
    pub touched_at: Instant,
}

impl<K, V> CacheEntry<K, V> {
    // == Constructor ==
    /// Creates a new cache entry stamped with `now`.
    pub fn new(key: K, value: V, now: Instant) -> Self {
        Self {
            key,
            value,
            touched_at: now,
        }
    }

    // == Touch ==
    /// Refreshes the timestamp to `now`.
    pub fn touch(&mut self, now: Instant) {
        self.touched_at = now;
    }

    // == Age ==
    /// Returns how long ago the entry was inserted or refreshed.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.touched_at)
    }

    // == Is Expired ==
    /// Checks if the entry has outlived `ttl` as of `now`.
    ///
    /// Boundary condition: an entry is expired only once its age is strictly
    /// greater than the TTL. A missing TTL never expires.
    pub fn is_expired(&self, ttl: Option<Duration>, now: Instant) -> bool {
        match ttl {
            Some(ttl) => self.age(now) > ttl,
            None => false,
        }
    }
}
