//! In-memory memoization for provider responses.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;

use tokio::sync::{OnceCell, RwLock};

/// Result of a memoized lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheLookup<V> {
    pub value: V,
    /// `true` when the value was produced by an earlier call.
    pub hit: bool,
}

/// Thread-safe, process-lifetime memo table.
///
/// Each key owns a once-cell: concurrent callers for the same key await a
/// single initialization instead of racing. Entries are never evicted.
#[derive(Debug)]
pub struct MemoCache<K, V> {
    inner: Arc<RwLock<HashMap<K, Arc<OnceCell<V>>>>>,
}

impl<K, V> Clone for MemoCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> Default for MemoCache<K, V> {
    fn default() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<K, V> MemoCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the stored value for `key`, running `init` only if no value exists yet.
    ///
    /// If `init` is cancelled before completing, the next caller runs it again.
    pub async fn get_or_init<F, Fut>(&self, key: K, init: F) -> CacheLookup<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = V>,
    {
        let cell = self.cell_for(key).await;
        if let Some(value) = cell.get() {
            return CacheLookup {
                value: value.clone(),
                hit: true,
            };
        }

        let mut produced_here = false;
        let value = cell
            .get_or_init(|| {
                produced_here = true;
                init()
            })
            .await
            .clone();

        CacheLookup {
            value,
            hit: !produced_here,
        }
    }

    /// Number of keys holding a produced value.
    pub async fn len(&self) -> usize {
        let store = self.inner.read().await;
        store.values().filter(|cell| cell.initialized()).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Drop every entry.
    pub async fn clear(&self) {
        let mut store = self.inner.write().await;
        store.clear();
    }

    async fn cell_for(&self, key: K) -> Arc<OnceCell<V>> {
        {
            let store = self.inner.read().await;
            if let Some(cell) = store.get(&key) {
                return Arc::clone(cell);
            }
        }

        let mut store = self.inner.write().await;
        Arc::clone(store.entry(key).or_default())
    }
}
