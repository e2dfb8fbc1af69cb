//! Combo Module
//!
//! Routes keys across several independently locked LRU shards.

mod hash;
mod router;

pub use hash::{default_hash, HashFn};
pub use router::ComboCache;
