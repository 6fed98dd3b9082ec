//! Conversion of raw backend caches into their unified counterparts.
//!
//! Adapter selection is static: [`IntoAdapter`] is implemented once per
//! supported backend type, so [`wrap`] picks the adapter at compile time.
//!
//! ```ignore
//! use basil::set::SingleTypeCache;
//!
//! // Key-value view
//! let cache = basil::wrap(moka::sync::Cache::<String, u64>::new(1_000)).cache();
//!
//! // Membership-only view
//! let seen = basil::wrap(quick_cache::sync::Cache::<String, basil::Sentinel>::new(1_000))
//!     .cache_set();
//! seen.add("abc".to_string());
//! ```

use std::hash::{BuildHasher, Hash};

use moka::sync::Cache as MokaCache;
use quick_cache::sync::Cache as QuickCache;
use quick_cache::{Lifecycle, Weighter};
use tracing::trace;

use crate::cache::{Cache, MokaCacheAdapter, QuickCacheAdapter};
use crate::set::{CacheSet, Sentinel};

/// A backend cache type that has a matching adapter.
pub trait IntoAdapter {
    /// Key type of the backend.
    type Key;
    /// Value type of the backend.
    type Value;
    /// Adapter that translates this backend onto [`Cache`].
    type Adapter: Cache<Self::Key, Self::Value>;

    /// Wrap `self` in its adapter.
    fn into_adapter(self) -> Self::Adapter;
}

impl<K, V, S> IntoAdapter for MokaCache<K, V, S>
where
    K: Hash + Eq + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
    S: BuildHasher + Clone + Send + Sync + 'static,
{
    type Key = K;
    type Value = V;
    type Adapter = MokaCacheAdapter<K, V, S>;

    fn into_adapter(self) -> Self::Adapter {
        MokaCacheAdapter::new(self)
    }
}

impl<K, V, We, B, L> IntoAdapter for QuickCache<K, V, We, B, L>
where
    K: Hash + Eq + Clone + Send + Sync,
    V: Clone + Send + Sync,
    We: Weighter<K, V> + Clone + Send + Sync,
    B: BuildHasher + Clone + Send + Sync,
    L: Lifecycle<K, V> + Clone + Send + Sync,
{
    type Key = K;
    type Value = V;
    type Adapter = QuickCacheAdapter<K, V, We, B, L>;

    fn into_adapter(self) -> Self::Adapter {
        QuickCacheAdapter::new(self)
    }
}

/// Second step of a conversion: choose the view to hand out.
///
/// Holds only the adapter and is consumed by either accessor.
#[derive(Debug)]
pub struct CacheProvider<A> {
    adapter: A,
}

impl<A> CacheProvider<A> {
    /// The backend as a key-value [`Cache`].
    pub fn cache(self) -> A {
        self.adapter
    }

    /// The backend as a set-like cache. The backend's values must be
    /// [`Sentinel`]s.
    pub fn cache_set<T>(self) -> CacheSet<T, A>
    where
        A: Cache<T, Sentinel>,
    {
        CacheSet::new(self.adapter)
    }
}

/// Start converting a backend cache.
pub fn wrap<B: IntoAdapter>(backend: B) -> CacheProvider<B::Adapter> {
    trace!(backend = std::any::type_name::<B>(), "Wrapping backend cache");
    CacheProvider {
        adapter: backend.into_adapter(),
    }
}

/// Convert a backend whose values are [`Sentinel`]s straight into a set-like cache.
pub fn wrap_set<B>(backend: B) -> CacheSet<B::Key, B::Adapter>
where
    B: IntoAdapter<Value = Sentinel>,
{
    wrap(backend).cache_set()
}
