//! Shared Cache Module
//!
//! Thread-safe handle around [`CacheStore`] for concurrent request handlers.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::cache::{CacheStats, CacheStore};

// == Bounded Cache ==
/// Cloneable, thread-safe bounded LRU cache.
///
/// A `get` hit updates recency, so lookups take the write lock just like
/// `set`, `delete` and invalidation. Only inspection (`len`, `stats`,
/// `contains`) runs under the shared read lock.
#[derive(Debug)]
pub struct BoundedCache<V> {
    inner: Arc<RwLock<CacheStore<V>>>,
}

impl<V> Clone for BoundedCache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V: Clone> BoundedCache<V> {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(CacheStore::new(capacity))),
        }
    }

    /// Returns the cached value, promoting the key to most recently used.
    pub async fn get(&self, key: &str) -> Option<V> {
        self.inner.write().await.get(key)
    }

    /// Stores a value. Never fails; may evict the least recently used entry.
    pub async fn set(&self, key: String, value: V) {
        self.inner.write().await.set(key, value);
    }

    /// Removes a key. No-op when absent.
    pub async fn delete(&self, key: &str) {
        self.inner.write().await.delete(key);
    }

    /// Removes every entry under `prefix` and returns how many were dropped.
    pub async fn invalidate_prefix(&self, prefix: &str) -> usize {
        self.inner.write().await.invalidate_prefix(prefix)
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.inner.read().await.contains(key)
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.read().await.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_shared_set_then_get() {
        let cache = BoundedCache::new(4);

        cache.set("k".to_string(), 7u32).await;

        assert_eq!(cache.get("k").await, Some(7));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_shared_delete_missing_is_noop() {
        let cache: BoundedCache<u32> = BoundedCache::new(4);

        cache.delete("absent").await;

        assert!(cache.is_empty().await);
        assert_eq!(cache.stats().await.invalidations, 0);
    }

    #[tokio::test]
    async fn test_shared_clones_see_same_entries() {
        let cache = BoundedCache::new(4);
        let other = cache.clone();

        cache.set("k".to_string(), "v".to_string()).await;

        assert_eq!(other.get("k").await, Some("v".to_string()));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_shared_concurrent_writers_respect_capacity() {
        let cache = BoundedCache::new(16);

        let mut handles = Vec::new();
        for task in 0..8 {
            let cache = cache.clone();
            handles.push(tokio::spawn(async move {
                for n in 0..100 {
                    let key = format!("task{}-{}", task, n);
                    cache.set(key.clone(), n).await;
                    cache.get(&key).await;
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let stats = cache.stats().await;
        assert_eq!(cache.len().await, 16);
        assert_eq!(stats.total_entries, 16);
        assert_eq!(stats.evictions, 800 - 16);
    }
}
