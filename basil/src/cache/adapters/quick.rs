//! Adapter over `quick_cache::sync::Cache`.
//!
//! quick_cache keeps a live entry count, has no deferred maintenance and no
//! time-based expiration. Loader failures come back as the loader's own error
//! type; only the failing caller sees them, and each thread that was waiting
//! on the same key then runs its own loader, one after another.
//!
//! The weighter, hasher and lifecycle the backend was built with
//! (`with_weighter`, `with_options`) are kept as they are.

use std::hash::{BuildHasher, Hash};

use quick_cache::sync::{Cache as QuickCache, DefaultLifecycle};
use quick_cache::{DefaultHashBuilder, Lifecycle, UnitWeighter, Weighter};

use crate::cache::forwarding::{
    Backend, BackendCapabilities, Forward, ForwardingCache, LoaderDedup, SizeSemantics,
};
use crate::cache::traits::{CacheError, Loader};

/// Unified cache over a `quick_cache::sync::Cache`.
pub type QuickCacheAdapter<
    K,
    V,
    We = UnitWeighter,
    B = DefaultHashBuilder,
    L = DefaultLifecycle<K, V>,
> = ForwardingCache<QuickCache<K, V, We, B, L>>;

impl<K, V, We, B, L> Backend for QuickCache<K, V, We, B, L> {
    const CAPABILITIES: BackendCapabilities = BackendCapabilities {
        name: "quick_cache",
        size: SizeSemantics::Exact,
        expiration: false,
        loader_dedup: LoaderDedup::Degraded,
    };
}

impl<K, V, We, B, L> Forward<K, V> for QuickCache<K, V, We, B, L>
where
    K: Hash + Eq + Clone + Send + Sync,
    V: Clone + Send + Sync,
    We: Weighter<K, V> + Clone + Send + Sync,
    B: BuildHasher + Clone + Send + Sync,
    L: Lifecycle<K, V> + Clone + Send + Sync,
{
    fn get_if_present(&self, key: &K) -> Option<V> {
        self.get(key)
    }

    fn insert(&self, key: K, value: V) {
        QuickCache::insert(self, key, value);
    }

    fn invalidate(&self, key: &K) {
        self.remove(key);
    }

    fn invalidate_all(&self) {
        self.clear();
    }

    fn approximate_size(&self) -> u64 {
        self.len() as u64
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get_or_load(&self, key: K, loader: Loader<'_, V>) -> Result<V, CacheError> {
        self.get_or_insert_with(&key, loader)
            .map_err(CacheError::computation)
    }

    fn snapshot(&self) -> Result<Vec<(K, V)>, CacheError> {
        Ok(self.iter().collect())
    }
}
