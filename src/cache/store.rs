//! Cache Store Module
//!
//! Single-shard cache engine combining a HashMap index with the recency list
//! and lazy TTL expiration. Not synchronized; [`LruCache`](super::LruCache)
//! puts it behind a lock.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use crate::cache::{CacheEntry, RecencyList, SlotId};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Bounded LRU storage with optional TTL.
///
/// Every key in `index` points at exactly one live node of `entries`, so
/// `index.len() == entries.len()` between calls.
#[derive(Debug)]
pub struct CacheStore<K, V> {
    /// Key to list handle
    index: HashMap<K, SlotId>,
    /// Entries in recency order
    entries: RecencyList<CacheEntry<K, V>>,
    /// Maximum number of entries allowed
    capacity: usize,
    /// Maximum idle age of an entry, None = never expires
    ttl: Option<Duration>,
}

impl<K, V> CacheStore<K, V>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    /// Creates a new CacheStore.
    ///
    /// A capacity below 1 is raised to 1, and a zero TTL means no expiry.
    pub fn new(capacity: usize, ttl: Option<Duration>) -> Self {
        let capacity = capacity.max(1);
        Self {
            index: HashMap::new(),
            entries: RecencyList::new(),
            capacity,
            ttl: ttl.filter(|ttl| !ttl.is_zero()),
        }
    }

    // == Get ==
    /// Retrieves a value by key and marks it most recently used.
    ///
    /// An expired entry is removed and reported as `NotFound`.
    pub fn get(&mut self, key: &K) -> Result<&V> {
        let id = *self.index.get(key).ok_or(CacheError::NotFound)?;
        let now = Instant::now();

        let expired = self
            .entries
            .get(id)
            .map_or(true, |entry| entry.is_expired(self.ttl, now));
        if expired {
            self.index.remove(key);
            self.entries.remove(id);
            return Err(CacheError::NotFound);
        }

        self.entries.move_to_front(id);
        let entry = self.entries.get_mut(id).ok_or(CacheError::NotFound)?;
        entry.touch(now);
        Ok(&entry.value)
    }

    // == Set ==
    /// Stores a key-value pair.
    ///
    /// If the key already exists, the value is overwritten, its timestamp is
    /// refreshed and it becomes most recently used. Otherwise, if the store is
    /// at capacity, the least recently used entry is evicted first.
    pub fn set(&mut self, key: K, value: V) -> Result<()> {
        let now = Instant::now();

        if let Some(id) = self.index.get(&key).copied() {
            if let Some(entry) = self.entries.get_mut(id) {
                entry.value = value;
                entry.touch(now);
                self.entries.move_to_front(id);
                return Ok(());
            }
            self.index.remove(&key);
        }

        if self.entries.len() >= self.capacity {
            self.evict_oldest();
        }

        let id = self
            .entries
            .push_front(CacheEntry::new(key.clone(), value, now));
        self.index.insert(key, id);
        Ok(())
    }

    // == Delete ==
    /// Removes an entry by key.
    ///
    /// Deleting an absent key, or one that has already expired, is `NotFound`.
    pub fn delete(&mut self, key: &K) -> Result<()> {
        let id = self.index.remove(key).ok_or(CacheError::NotFound)?;
        let entry = self.entries.remove(id).ok_or(CacheError::NotFound)?;
        if entry.is_expired(self.ttl, Instant::now()) {
            return Err(CacheError::NotFound);
        }
        Ok(())
    }

    // == Evict Oldest ==
    /// Removes and returns the least recently used entry.
    pub fn evict_oldest(&mut self) -> Option<CacheEntry<K, V>> {
        let entry = self.entries.pop_back()?;
        self.index.remove(&entry.key);
        Some(entry)
    }

    // == Purge Expired ==
    /// Removes all expired entries from the store.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        if self.ttl.is_none() {
            return 0;
        }
        let now = Instant::now();
        let expired: Vec<SlotId> = self
            .entries
            .iter_entries()
            .filter(|(_, entry)| entry.is_expired(self.ttl, now))
            .map(|(id, _)| id)
            .collect();

        let count = expired.len();
        for id in expired {
            if let Some(entry) = self.entries.remove(id) {
                self.index.remove(&entry.key);
            }
        }
        count
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.index.clear();
        self.entries.clear();
    }

    /// Iterates entries from most to least recently used.
    ///
    /// Expired entries that have not been touched yet are included.
    pub fn iter(&self) -> impl Iterator<Item = &CacheEntry<K, V>> + '_ {
        self.entries.iter()
    }

    // == Length ==
    /// Returns the current number of entries in the store.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }
}
