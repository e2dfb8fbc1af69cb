//! Combo Cache - a thread-safe in-process LRU cache
//!
//! Bounded key-value caching with LRU eviction, optional lazy TTL expiry,
//! and a hash-routed sharding layer that spreads keys over independently
//! locked shards to cut lock contention.

pub mod cache;
pub mod combo;
pub mod config;
pub mod error;
pub mod traits;

pub use cache::LruCache;
pub use combo::{default_hash, ComboCache, HashFn};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use traits::Cache;
