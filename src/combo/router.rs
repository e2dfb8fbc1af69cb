//! Sharded Cache Router
//!
//! Splits the key space across several independently locked [`LruCache`]
//! shards. A key's shard is `hash(key) % shard_count`, so operations on keys
//! in different shards never contend for the same lock.

use std::fmt::{self, Display};
use std::hash::Hash;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::cache::LruCache;
use crate::combo::{default_hash, HashFn};
use crate::error::{CacheError, Result};
use crate::traits::Cache;

// == Combo Cache ==
/// A cache made of `shard_count` LRU shards behind one interface.
///
/// Each shard gets `size / shard_count` entries. The remainder of that
/// division is not handed out, so the total capacity can be smaller than
/// requested: 10 entries over 3 shards gives 3 shards of 3.
///
/// # Example
/// ```
/// use combo_cache::ComboCache;
///
/// let cache = ComboCache::new(10, 2, None, |key: &&str| key.len() as u32).unwrap();
/// cache.set("A", 1).unwrap();
/// assert_eq!(cache.get(&"A").unwrap(), 1);
/// assert_eq!(cache.route(&"A"), 1);
/// ```
pub struct ComboCache<K, V> {
    hash: HashFn<K>,
    shards: Vec<LruCache<K, V>>,
}

impl<K, V> ComboCache<K, V>
where
    K: Hash + Eq + Clone,
{
    // == Constructors ==
    /// Creates a router over `shards` shards sharing `ttl` and `hash`.
    ///
    /// `shards` below 1 is raised to 1, and `size` below `shards` is raised
    /// to `shards` so every shard holds at least one entry.
    ///
    /// # Errors
    /// `InvalidCapacity` if `size` is zero.
    pub fn new<F>(size: usize, shards: usize, ttl: Option<Duration>, hash: F) -> Result<Self>
    where
        F: Fn(&K) -> u32 + Send + Sync + 'static,
    {
        Self::with_hash_fn(size, shards, ttl, Arc::new(hash))
    }

    /// Same as [`ComboCache::new`], routing with [`default_hash`].
    pub fn with_default_hash(size: usize, shards: usize, ttl: Option<Duration>) -> Result<Self>
    where
        K: 'static,
    {
        Self::new(size, shards, ttl, default_hash::<K>)
    }

    /// Same as [`ComboCache::new`] with an already shared hash function.
    pub fn with_hash_fn(
        size: usize,
        shards: usize,
        ttl: Option<Duration>,
        hash: HashFn<K>,
    ) -> Result<Self> {
        if size == 0 {
            return Err(CacheError::InvalidCapacity(size));
        }
        let shard_count = shards.max(1);
        let size = size.max(shard_count);
        let per_shard = size / shard_count;

        let shards = (0..shard_count)
            .map(|_| LruCache::with_ttl(per_shard, ttl))
            .collect::<Result<Vec<_>>>()?;

        info!(
            shard_count,
            per_shard,
            lost = size % shard_count,
            ttl = ?ttl,
            "combo cache created"
        );
        Ok(Self { hash, shards })
    }

    // == Routing ==
    /// Index of the shard responsible for `key`.
    pub fn route(&self, key: &K) -> usize {
        (self.hash)(key) as usize % self.shards.len()
    }

    fn shard_for(&self, key: &K) -> &LruCache<K, V> {
        &self.shards[self.route(key)]
    }

    /// The shard at `index`, if any.
    pub fn shard(&self, index: usize) -> Option<&LruCache<K, V>> {
        self.shards.get(index)
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    // == Delegated Operations ==
    /// Retrieves a clone of the value stored under `key` from its shard.
    pub fn get(&self, key: &K) -> Result<V>
    where
        V: Clone,
    {
        self.shard_for(key).get(key)
    }

    /// Adds or updates the pair in the key's shard. Eviction only ever
    /// happens inside that shard.
    pub fn set(&self, key: K, value: V) -> Result<()> {
        self.shard_for(&key).set(key, value)
    }

    /// Removes the entry stored under `key` from its shard.
    pub fn delete(&self, key: &K) -> Result<()> {
        self.shard_for(key).delete(key)
    }

    // == Aggregates ==
    /// Sum of the shard lengths.
    ///
    /// Each shard is locked in turn, never all at once, so concurrent writers
    /// can make the total stale by the time it is returned.
    pub fn len(&self) -> usize {
        self.shards.iter().map(LruCache::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(LruCache::is_empty)
    }

    /// Total entries the router can hold: `shard_count * (size / shard_count)`.
    pub fn capacity(&self) -> usize {
        self.shards.iter().map(LruCache::capacity).sum()
    }

    pub fn clear(&self) {
        for shard in &self.shards {
            shard.clear();
        }
    }

    /// Runs [`LruCache::purge_expired`] on every shard and returns the total.
    pub fn purge_expired(&self) -> usize {
        self.shards.iter().map(LruCache::purge_expired).sum()
    }

    // == Diagnostics ==
    /// Entries per shard, each from most to least recently used.
    pub fn snapshot(&self) -> Vec<Vec<(K, V)>>
    where
        V: Clone,
    {
        self.shards.iter().map(LruCache::snapshot).collect()
    }

    /// Writes a header per shard followed by that shard's values.
    pub fn dump<W: Write>(&self, w: &mut W, sep: &str) -> io::Result<()>
    where
        V: Display,
    {
        for (i, shard) in self.shards.iter().enumerate() {
            writeln!(w, "Items in cache #{}", i)?;
            shard.dump(w, sep)?;
        }
        Ok(())
    }
}

impl<K, V> Cache<K, V> for ComboCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    fn get(&self, key: &K) -> Result<V> {
        ComboCache::get(self, key)
    }

    fn set(&self, key: K, value: V) -> Result<()> {
        ComboCache::set(self, key, value)
    }

    fn delete(&self, key: &K) -> Result<()> {
        ComboCache::delete(self, key)
    }

    fn count(&self) -> Result<usize> {
        Ok(self.len())
    }
}

impl<K, V> fmt::Debug for ComboCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComboCache")
            .field("shard_count", &self.shards.len())
            .finish_non_exhaustive()
    }
}
