//! Thread-Safe LRU Cache
//!
//! A [`CacheStore`] behind one exclusive lock. Every operation holds the lock
//! for its whole duration, so operations on one cache are linearizable.

use std::fmt::Display;
use std::hash::Hash;
use std::io::{self, Write};
use std::time::Duration;

use parking_lot::Mutex;
use tracing::debug;

use crate::cache::CacheStore;
use crate::error::{CacheError, Result};
use crate::traits::Cache;

// == LRU Cache ==
/// Bounded, thread-safe LRU cache with optional TTL.
///
/// # Example
/// ```
/// use combo_cache::LruCache;
///
/// let cache = LruCache::new(2).unwrap();
/// cache.set("A", 1).unwrap();
/// cache.set("B", 2).unwrap();
/// cache.set("C", 3).unwrap();
///
/// assert!(cache.get(&"A").is_err());
/// assert_eq!(cache.get(&"C").unwrap(), 3);
/// ```
#[derive(Debug)]
pub struct LruCache<K, V> {
    store: Mutex<CacheStore<K, V>>,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    // == Constructors ==
    /// Creates a cache holding at most `capacity` entries that never expire.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_ttl(capacity, None)
    }

    /// Creates a cache whose entries expire once they go untouched for
    /// longer than `ttl`. `None` or a zero duration disables expiry.
    ///
    /// # Errors
    /// `InvalidCapacity` if `capacity` is zero.
    pub fn with_ttl(capacity: usize, ttl: Option<Duration>) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }
        let store = CacheStore::new(capacity, ttl);
        debug!(capacity, ttl = ?store.ttl(), "LRU cache created");
        Ok(Self {
            store: Mutex::new(store),
        })
    }

    // == Get ==
    /// Retrieves a clone of the value stored under `key`.
    ///
    /// A hit refreshes the entry's timestamp and marks it most recently
    /// used. Expired entries are removed and reported as `NotFound`.
    pub fn get(&self, key: &K) -> Result<V>
    where
        V: Clone,
    {
        self.store.lock().get(key).cloned()
    }

    // == Set ==
    /// Adds or updates the key-value pair, evicting the least recently used
    /// entry if a new key would exceed capacity.
    pub fn set(&self, key: K, value: V) -> Result<()> {
        self.store.lock().set(key, value)
    }

    // == Delete ==
    /// Removes the entry stored under `key`.
    ///
    /// # Errors
    /// `NotFound` if the key is absent or already expired.
    pub fn delete(&self, key: &K) -> Result<()> {
        self.store.lock().delete(key)
    }

    // == Length ==
    /// Number of entries currently held, including expired entries that
    /// have not been touched since they expired.
    pub fn len(&self) -> usize {
        self.store.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.store.lock().capacity()
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.store.lock().ttl()
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.store.lock().clear();
    }

    // == Purge Expired ==
    /// Removes every expired entry now instead of waiting for it to be
    /// touched. Returns the number of entries removed.
    pub fn purge_expired(&self) -> usize {
        let removed = self.store.lock().purge_expired();
        if removed > 0 {
            debug!(removed, "purged expired entries");
        }
        removed
    }

    // == Diagnostics ==
    /// Returns the entries from most to least recently used.
    pub fn snapshot(&self) -> Vec<(K, V)>
    where
        V: Clone,
    {
        self.store
            .lock()
            .iter()
            .map(|entry| (entry.key.clone(), entry.value.clone()))
            .collect()
    }

    /// Writes every value, each followed by `sep`, from most to least
    /// recently used.
    pub fn dump<W: Write>(&self, w: &mut W, sep: &str) -> io::Result<()>
    where
        V: Display,
    {
        let store = self.store.lock();
        for entry in store.iter() {
            write!(w, "{}{}", entry.value, sep)?;
        }
        Ok(())
    }
}

impl<K, V> Cache<K, V> for LruCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    fn get(&self, key: &K) -> Result<V> {
        LruCache::get(self, key)
    }

    fn set(&self, key: K, value: V) -> Result<()> {
        LruCache::set(self, key, value)
    }

    fn delete(&self, key: &K) -> Result<()> {
        LruCache::delete(self, key)
    }

    fn count(&self) -> Result<usize> {
        Ok(self.len())
    }
}
