//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the LRU cache against a plain reference model and
//! the router against a bare shard.

use proptest::prelude::*;
use std::thread::sleep;
use std::time::Duration;

use crate::cache::LruCache;
use crate::combo::{default_hash, ComboCache};
use crate::error::CacheError;
use crate::traits::Cache;

// == Test Configuration ==
const TEST_CAPACITY: usize = 8;

// == Strategies ==
/// Generates keys from a small alphabet so operations collide often
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-l]{1,2}".prop_map(|s| s)
}

/// Generates a sequence of cache operations for testing
#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: u32 },
    Get { key: String },
    Delete { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        3 => (key_strategy(), any::<u32>()).prop_map(|(key, value)| CacheOp::Set { key, value }),
        2 => key_strategy().prop_map(|key| CacheOp::Get { key }),
        1 => key_strategy().prop_map(|key| CacheOp::Delete { key }),
    ]
}

// == Reference Model ==
/// Naive LRU: a vector ordered from most to least recently used.
struct Model {
    capacity: usize,
    order: Vec<(String, u32)>,
}

impl Model {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            order: Vec::new(),
        }
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.order.iter().position(|(k, _)| k == key)
    }

    fn get(&mut self, key: &str) -> Result<u32, CacheError> {
        let pos = self.position(key).ok_or(CacheError::NotFound)?;
        let item = self.order.remove(pos);
        let value = item.1;
        self.order.insert(0, item);
        Ok(value)
    }

    fn set(&mut self, key: String, value: u32) {
        if let Some(pos) = self.position(&key) {
            self.order.remove(pos);
        } else if self.order.len() >= self.capacity {
            self.order.pop();
        }
        self.order.insert(0, (key, value));
    }

    fn delete(&mut self, key: &str) -> Result<(), CacheError> {
        let pos = self.position(key).ok_or(CacheError::NotFound)?;
        self.order.remove(pos);
        Ok(())
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Every operation result, and the final recency order, matches a naive
    // LRU model.
    #[test]
    fn prop_matches_reference_model(ops in prop::collection::vec(cache_op_strategy(), 1..120)) {
        let cache = LruCache::new(TEST_CAPACITY).unwrap();
        let mut model = Model::new(TEST_CAPACITY);

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    model.set(key.clone(), value);
                    prop_assert_eq!(cache.set(key, value), Ok(()));
                }
                CacheOp::Get { key } => {
                    prop_assert_eq!(cache.get(&key), model.get(&key), "get {}", key);
                }
                CacheOp::Delete { key } => {
                    prop_assert_eq!(cache.delete(&key), model.delete(&key), "delete {}", key);
                }
            }
            prop_assert_eq!(cache.len(), model.order.len());
        }

        prop_assert_eq!(cache.snapshot(), model.order);
    }

    // For any sequence of sets, the cache never holds more than its capacity.
    #[test]
    fn prop_capacity_enforcement(
        entries in prop::collection::vec((key_strategy(), any::<u32>()), 1..200),
        capacity in 1usize..20
    ) {
        let cache = LruCache::new(capacity).unwrap();

        for (key, value) in entries {
            cache.set(key, value).unwrap();
            prop_assert!(
                cache.len() <= capacity,
                "Cache size {} exceeds capacity {}",
                cache.len(),
                capacity
            );
        }
    }

    // Inserting capacity + k distinct keys evicts exactly the k oldest.
    #[test]
    fn prop_evicts_exactly_oldest(capacity in 1usize..32, extra in 1usize..32) {
        let cache = LruCache::new(capacity).unwrap();
        let total = capacity + extra;

        for i in 0..total {
            cache.set(i, i).unwrap();
        }

        prop_assert_eq!(cache.len(), capacity);
        for i in 0..extra {
            prop_assert_eq!(cache.get(&i), Err(CacheError::NotFound));
        }
        for i in extra..total {
            prop_assert_eq!(cache.get(&i), Ok(i));
        }
    }

    // A set followed by a get returns the exact value, and an overwrite
    // replaces it without growing the cache.
    #[test]
    fn prop_roundtrip_and_overwrite(key in key_strategy(), v1 in any::<u32>(), v2 in any::<u32>()) {
        let cache = LruCache::new(TEST_CAPACITY).unwrap();

        cache.set(key.clone(), v1).unwrap();
        prop_assert_eq!(cache.get(&key), Ok(v1));

        cache.set(key.clone(), v2).unwrap();
        prop_assert_eq!(cache.get(&key), Ok(v2));
        prop_assert_eq!(cache.len(), 1);

        cache.delete(&key).unwrap();
        prop_assert_eq!(cache.get(&key), Err(CacheError::NotFound));
    }

    // A router with one shard is observably identical to a bare shard.
    #[test]
    fn prop_single_shard_equivalence(
        ops in prop::collection::vec(cache_op_strategy(), 1..120),
        capacity in 1usize..16
    ) {
        let bare = LruCache::new(capacity).unwrap();
        let combo = ComboCache::with_default_hash(capacity, 1, None).unwrap();

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    prop_assert_eq!(combo.set(key.clone(), value), bare.set(key, value));
                }
                CacheOp::Get { key } => {
                    prop_assert_eq!(combo.get(&key), bare.get(&key));
                }
                CacheOp::Delete { key } => {
                    prop_assert_eq!(combo.delete(&key), bare.delete(&key));
                }
            }
            prop_assert_eq!(Cache::count(&combo), Cache::count(&bare));
        }

        prop_assert_eq!(combo.snapshot(), vec![bare.snapshot()]);
    }

    // Routing is a pure function of the key, and without capacity pressure
    // every key set through the router can be read back through it.
    #[test]
    fn prop_routing_stability(
        keys in prop::collection::hash_set(key_strategy(), 1..40),
        shards in 1usize..8
    ) {
        let combo = ComboCache::with_default_hash(keys.len() * shards, shards, None).unwrap();

        for key in &keys {
            let shard = combo.route(key);
            prop_assert!(shard < shards);
            prop_assert_eq!(combo.route(key), shard);
            prop_assert_eq!(shard, default_hash(key) as usize % shards);
            combo.set(key.clone(), key.len()).unwrap();
        }

        for key in &keys {
            prop_assert_eq!(combo.get(key), Ok(key.len()));
        }
        prop_assert_eq!(combo.len(), keys.len());
    }
}

// Separate proptest block with fewer cases for time-sensitive TTL tests
proptest! {
    #![proptest_config(ProptestConfig::with_cases(5))]

    // An entry left untouched for longer than the TTL is gone on the next get
    // and stops counting.
    #[test]
    fn prop_ttl_expiration_behavior(keys in prop::collection::hash_set(key_strategy(), 1..5)) {
        let cache = LruCache::with_ttl(TEST_CAPACITY, Some(Duration::from_millis(40))).unwrap();

        for key in &keys {
            cache.set(key.clone(), 1u32).unwrap();
            prop_assert_eq!(cache.get(key), Ok(1));
        }

        sleep(Duration::from_millis(100));

        for key in &keys {
            prop_assert_eq!(cache.get(key), Err(CacheError::NotFound));
        }
        prop_assert_eq!(cache.len(), 0);
    }

    // With a TTL, a one-shard router and a bare shard agree before and after
    // every entry from the first batch has expired.
    #[test]
    fn prop_single_shard_equivalence_with_ttl(
        before in prop::collection::vec(cache_op_strategy(), 1..40),
        after in prop::collection::vec(cache_op_strategy(), 1..40),
        capacity in 1usize..16
    ) {
        let ttl = Some(Duration::from_millis(50));
        let bare = LruCache::with_ttl(capacity, ttl).unwrap();
        let combo = ComboCache::with_default_hash(capacity, 1, ttl).unwrap();

        for (i, batch) in [before, after].into_iter().enumerate() {
            if i == 1 {
                sleep(Duration::from_millis(150));
            }
            for op in batch {
                match op {
                    CacheOp::Set { key, value } => {
                        prop_assert_eq!(combo.set(key.clone(), value), bare.set(key, value));
                    }
                    CacheOp::Get { key } => {
                        prop_assert_eq!(combo.get(&key), bare.get(&key));
                    }
                    CacheOp::Delete { key } => {
                        prop_assert_eq!(combo.delete(&key), bare.delete(&key));
                    }
                }
                prop_assert_eq!(Cache::count(&combo), Cache::count(&bare));
            }
        }

        prop_assert_eq!(combo.snapshot(), vec![bare.snapshot()]);
    }
}
