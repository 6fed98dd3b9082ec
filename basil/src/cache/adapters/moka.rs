//! Adapter over `moka::sync::Cache`.
//!
//! moka reports an estimated entry count that only settles after pending
//! maintenance runs, and surfaces loader failures as `Arc<E>` shared by
//! every caller that waited on the same key. Both are translated here.
//!
//! Any hasher the backend was built with (`build_with_hasher`) is kept.

use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hash};

use moka::sync::Cache as MokaCache;

use crate::cache::forwarding::{
    Backend, BackendCapabilities, Forward, ForwardingCache, LoaderDedup, SizeSemantics,
};
use crate::cache::traits::{CacheError, Loader};

/// Unified cache over a `moka::sync::Cache`.
pub type MokaCacheAdapter<K, V, S = RandomState> = ForwardingCache<MokaCache<K, V, S>>;

impl<K, V, S> Backend for MokaCache<K, V, S> {
    const CAPABILITIES: BackendCapabilities = BackendCapabilities {
        name: "moka",
        size: SizeSemantics::Estimated,
        expiration: true,
        loader_dedup: LoaderDedup::Guaranteed,
    };
}

impl<K, V, S> Forward<K, V> for MokaCache<K, V, S>
where
    K: Hash + Eq + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
    S: BuildHasher + Clone + Send + Sync + 'static,
{
    fn get_if_present(&self, key: &K) -> Option<V> {
        self.get(key)
    }

    fn insert(&self, key: K, value: V) {
        MokaCache::insert(self, key, value);
    }

    fn invalidate(&self, key: &K) {
        MokaCache::invalidate(self, key);
    }

    fn invalidate_all(&self) {
        MokaCache::invalidate_all(self);
    }

    fn approximate_size(&self) -> u64 {
        self.entry_count()
    }

    fn is_empty(&self) -> bool {
        // entry_count() lags behind writes; iteration skips expired and
        // invalidated entries immediately.
        self.iter().next().is_none()
    }

    fn clean_up(&self) {
        self.run_pending_tasks();
    }

    fn get_or_load(&self, key: K, loader: Loader<'_, V>) -> Result<V, CacheError> {
        self.try_get_with(key, loader).map_err(CacheError::computation)
    }

    fn snapshot(&self) -> Result<Vec<(K, V)>, CacheError> {
        Ok(self
            .iter()
            .map(|(key, value)| ((*key).clone(), value))
            .collect())
    }
}
