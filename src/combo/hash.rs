//! Key hashing for shard routing.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Maps a key to the 32-bit hash used to pick its shard.
///
/// Must be deterministic: a key that hashes differently between `set` and
/// `get` lands on a different shard and can never be found again.
pub type HashFn<K> = Arc<dyn Fn(&K) -> u32 + Send + Sync>;

/// Hashes any `K: Hash` with the standard library's SipHash, folded to 32
/// bits.
///
/// `DefaultHasher::new()` uses fixed keys, so the result is stable within a
/// process. The algorithm itself is unspecified by std and may change between
/// releases, so never persist these values.
pub fn default_hash<K: Hash + ?Sized>(key: &K) -> u32 {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    let h = hasher.finish();
    (h ^ (h >> 32)) as u32
}
