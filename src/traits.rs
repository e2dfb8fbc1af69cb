//! The operation set shared by every cache in this crate.

use std::sync::Arc;

use crate::error::{CacheError, Result};

// == Cache Trait ==
/// A thread-safe key-value cache.
///
/// Implemented by [`LruCache`](crate::LruCache) and
/// [`ComboCache`](crate::ComboCache). `Option<C>` also implements it, so a
/// cache slot that was never filled answers every call with
/// [`CacheError::NotInitialized`] instead of panicking.
pub trait Cache<K, V> {
    /// Returns the value stored under `key`, marking it most recently used.
    fn get(&self, key: &K) -> Result<V>;

    /// Adds or updates the key-value pair.
    fn set(&self, key: K, value: V) -> Result<()>;

    /// Removes the entry stored under `key`.
    fn delete(&self, key: &K) -> Result<()>;

    /// Returns the number of live entries.
    fn count(&self) -> Result<usize>;
}

impl<K, V, C> Cache<K, V> for Option<C>
where
    C: Cache<K, V>,
{
    fn get(&self, key: &K) -> Result<V> {
        self.as_ref().ok_or(CacheError::NotInitialized)?.get(key)
    }

    fn set(&self, key: K, value: V) -> Result<()> {
        self.as_ref()
            .ok_or(CacheError::NotInitialized)?
            .set(key, value)
    }

    fn delete(&self, key: &K) -> Result<()> {
        self.as_ref().ok_or(CacheError::NotInitialized)?.delete(key)
    }

    fn count(&self) -> Result<usize> {
        self.as_ref().ok_or(CacheError::NotInitialized)?.count()
    }
}

impl<K, V, C> Cache<K, V> for Arc<C>
where
    C: Cache<K, V> + ?Sized,
{
    fn get(&self, key: &K) -> Result<V> {
        (**self).get(key)
    }

    fn set(&self, key: K, value: V) -> Result<()> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &K) -> Result<()> {
        (**self).delete(key)
    }

    fn count(&self) -> Result<usize> {
        (**self).count()
    }
}
