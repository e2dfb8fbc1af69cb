//! Cache Module
//!
//! Provides the single-shard in-memory cache with TTL expiration and LRU
//! eviction.

mod entry;
mod lru;
mod shard;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use lru::{Iter, RecencyList, SlotId};
pub use shard::LruCache;
pub use store::CacheStore;
