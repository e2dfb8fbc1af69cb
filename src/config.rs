//! Configuration Module
//!
//! Handles loading cache configuration from environment variables or from a
//! host application's own config file.

use std::env;
use std::hash::Hash;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::cache::LruCache;
use crate::combo::ComboCache;
use crate::error::Result;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible
/// defaults. Missing fields take their default when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Total number of entries the cache can hold
    pub capacity: usize,
    /// Number of shards the capacity is split across
    pub shards: usize,
    /// Maximum idle age of an entry, None = never expires
    pub ttl: Option<Duration>,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Total cache entries (default: 1000)
    /// - `CACHE_SHARDS` - Shard count (default: 16)
    /// - `CACHE_TTL_MS` - TTL in milliseconds, 0 disables expiry (default: 0)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let ttl_ms: u64 = env_or("CACHE_TTL_MS", 0);
        Self {
            capacity: env_or("CACHE_CAPACITY", defaults.capacity),
            shards: env_or("CACHE_SHARDS", defaults.shards),
            ttl: (ttl_ms > 0).then(|| Duration::from_millis(ttl_ms)),
        }
    }

    /// Builds a single-shard cache of `capacity` entries; `shards` is ignored.
    pub fn build_lru<K, V>(&self) -> Result<LruCache<K, V>>
    where
        K: Hash + Eq + Clone,
    {
        LruCache::with_ttl(self.capacity, self.ttl)
    }

    /// Builds a sharded cache routing keys with `hash`.
    pub fn build_combo<K, V, F>(&self, hash: F) -> Result<ComboCache<K, V>>
    where
        K: Hash + Eq + Clone,
        F: Fn(&K) -> u32 + Send + Sync + 'static,
    {
        ComboCache::new(self.capacity, self.shards, self.ttl, hash)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 1000,
            shards: 16,
            ttl: None,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(variable = name, value = %raw, "invalid value, using default");
            default
        }),
        Err(_) => default,
    }
}
