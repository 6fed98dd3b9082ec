//! Generic forwarding from the unified contract to a wrapped backend.
//!
//! Backends like moka and quick_cache expose near-identical method surfaces.
//! Instead of writing one full adapter per backend, each backend implements
//! the small [`Forward`] trait and [`ForwardingCache`] derives the whole
//! [`Cache`] contract from it.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │                  Cache<K, V> (contract)                │
//! └───────────────────────────┬────────────────────────────┘
//!                             │
//!                             ▼
//! ┌───────────────────────────────────────────────────────┐
//! │                 ForwardingCache<B>                     │
//! │                                                        │
//! │  bulk ops derived from single-key ops                  │
//! │  loader failures  ─► CacheError::Computation           │
//! │  missing backend op ─► CacheError::BackendMismatch     │
//! └───────────────────────────┬────────────────────────────┘
//!                             │ B: Forward<K, V>
//!                             ▼
//! ┌───────────────────────────────────────────────────────┐
//! │   moka::sync::Cache        quick_cache::sync::Cache    │
//! └───────────────────────────────────────────────────────┘
//! ```
//!
//! Every `Forward` impl is written by hand against the concrete backend
//! type, so a backend that lacks an operation is caught at compile time for
//! required methods and reported as a typed error for optional ones.

use std::collections::HashMap;
use std::hash::Hash;

use tracing::{debug, trace, warn};

use crate::cache::traits::{Cache, CacheError, Loader};
use crate::cache::view::MapView;

/// How a backend reports its entry count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeSemantics {
    /// Live, exact count of resident entries.
    Exact,
    /// Estimate that may lag behind recent writes until maintenance runs.
    Estimated,
}

/// How strongly a backend deduplicates concurrent loads of the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderDedup {
    /// At most one loader runs per miss; all waiters share its outcome,
    /// success or failure.
    Guaranteed,
    /// At most one loader runs per successful miss. After a failure only the
    /// failing caller sees the error, and each waiter may then run its own
    /// loader, one after another.
    Degraded,
}

/// Static description of what a wrapped backend provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendCapabilities {
    /// Short backend name, used in logs and errors.
    pub name: &'static str,
    /// Meaning of `size()`.
    pub size: SizeSemantics,
    /// Whether the backend can expire entries by time.
    pub expiration: bool,
    /// Concurrent loader guarantee.
    pub loader_dedup: LoaderDedup,
}

/// A backend type with a fixed capability description.
///
/// Kept apart from [`Forward`] so the description can be read without
/// naming the key and value types.
pub trait Backend {
    /// What this backend provides.
    const CAPABILITIES: BackendCapabilities;
}

/// The native operation surface a backend exposes to [`ForwardingCache`].
///
/// Required methods are the ones every supported backend has. Optional
/// methods default to a [`CacheError::BackendMismatch`] so a backend without
/// them still wraps, and callers get a clear error instead of a silent
/// default.
pub trait Forward<K, V>: Backend + Send + Sync {
    /// Current value for `key`, never loading.
    fn get_if_present(&self, key: &K) -> Option<V>;

    /// Insert or replace.
    fn insert(&self, key: K, value: V);

    /// Remove `key` if present.
    fn invalidate(&self, key: &K);

    /// Remove every entry.
    fn invalidate_all(&self);

    /// The backend's own entry count.
    fn approximate_size(&self) -> u64;

    /// Exact emptiness check.
    fn is_empty(&self) -> bool;

    /// Run deferred maintenance. Backends that defer nothing keep the default.
    fn clean_up(&self) {}

    /// Return the value for `key`, running `loader` at most once on a miss.
    fn get_or_load(&self, _key: K, _loader: Loader<'_, V>) -> Result<V, CacheError> {
        Err(CacheError::BackendMismatch {
            backend: Self::CAPABILITIES.name,
            operation: "get_or_load",
        })
    }

    /// Point-in-time copy of every resident entry.
    fn snapshot(&self) -> Result<Vec<(K, V)>, CacheError> {
        Err(CacheError::BackendMismatch {
            backend: Self::CAPABILITIES.name,
            operation: "snapshot",
        })
    }
}

/// A [`Cache`] that forwards every operation to a wrapped backend.
///
/// Holds the backend by value for its whole lifetime; it is never replaced,
/// copied, or re-derived.
#[derive(Debug)]
pub struct ForwardingCache<B> {
    delegate: B,
}

impl<B> ForwardingCache<B> {
    /// Wrap an already configured backend.
    pub fn new(delegate: B) -> Self {
        Self { delegate }
    }

    /// The wrapped backend.
    pub fn delegate(&self) -> &B {
        &self.delegate
    }

    /// Unwrap, returning the backend.
    pub fn into_inner(self) -> B {
        self.delegate
    }

    /// Capabilities of the wrapped backend.
    pub fn capabilities(&self) -> BackendCapabilities
    where
        B: Backend,
    {
        B::CAPABILITIES
    }
}

fn report<T>(backend: &'static str, result: Result<T, CacheError>) -> Result<T, CacheError> {
    if let Err(ref err) = result {
        match err {
            CacheError::Computation { source } => {
                debug!(backend, error = %source, "Loader failed");
            }
            CacheError::BackendMismatch { operation, .. } => {
                warn!(backend, operation, "Backend does not support operation");
            }
        }
    }
    result
}

impl<K, V, B> Cache<K, V> for ForwardingCache<B>
where
    K: Eq + Hash + Clone,
    B: Forward<K, V>,
{
    fn get(&self, key: K, loader: Loader<'_, V>) -> Result<V, CacheError> {
        report(
            B::CAPABILITIES.name,
            self.delegate.get_or_load(key, loader),
        )
    }

    fn value_if_present(&self, key: &K) -> Option<V> {
        self.delegate.get_if_present(key)
    }

    fn all_present(&self, keys: &[K]) -> HashMap<K, V> {
        keys.iter()
            .filter_map(|key| {
                self.delegate
                    .get_if_present(key)
                    .map(|value| (key.clone(), value))
            })
            .collect()
    }

    fn put(&self, key: K, value: V) {
        self.delegate.insert(key, value);
    }

    fn put_all(&self, entries: HashMap<K, V>) {
        for (key, value) in entries {
            self.delegate.insert(key, value);
        }
    }

    fn invalidate(&self, key: &K) {
        self.delegate.invalidate(key);
    }

    fn invalidate_keys(&self, keys: &[K]) {
        for key in keys {
            self.delegate.invalidate(key);
        }
    }

    fn invalidate_all(&self) {
        self.delegate.invalidate_all();
    }

    fn size(&self) -> u64 {
        self.delegate.approximate_size()
    }

    fn is_empty(&self) -> bool {
        self.delegate.is_empty()
    }

    fn clean_up(&self) {
        trace!(backend = B::CAPABILITIES.name, "Running pending maintenance");
        self.delegate.clean_up();
    }

    fn entries(&self) -> Result<Vec<(K, V)>, CacheError> {
        report(B::CAPABILITIES.name, self.delegate.snapshot())
    }

    fn as_map(&self) -> MapView<'_, K, V> {
        MapView::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheExt;
    use parking_lot::RwLock;

    /// Minimal backend that only provides the required operations.
    #[derive(Default)]
    struct MapBackend {
        entries: RwLock<HashMap<String, u32>>,
    }

    impl Backend for MapBackend {
        const CAPABILITIES: BackendCapabilities = BackendCapabilities {
            name: "hashmap",
            size: SizeSemantics::Exact,
            expiration: false,
            loader_dedup: LoaderDedup::Degraded,
        };
    }

    impl Forward<String, u32> for MapBackend {
        fn get_if_present(&self, key: &String) -> Option<u32> {
            self.entries.read().get(key).copied()
        }

        fn insert(&self, key: String, value: u32) {
            self.entries.write().insert(key, value);
        }

        fn invalidate(&self, key: &String) {
            self.entries.write().remove(key);
        }

        fn invalidate_all(&self) {
            self.entries.write().clear();
        }

        fn approximate_size(&self) -> u64 {
            self.entries.read().len() as u64
        }

        fn is_empty(&self) -> bool {
            self.entries.read().is_empty()
        }
    }

    fn key(s: &str) -> String {
        s.to_string()
    }

    #[test]
    fn test_forwarding_required_operations() {
        let cache = ForwardingCache::new(MapBackend::default());

        cache.put(key("a"), 1);
        assert_eq!(cache.value_if_present(&key("a")), Some(1));
        assert_eq!(cache.size(), 1);
        assert!(!cache.is_empty());

        cache.invalidate(&key("a"));
        assert!(cache.value_if_present(&key("a")).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_forwarding_bulk_operations() {
        let cache = ForwardingCache::new(MapBackend::default());

        let mut batch = HashMap::new();
        batch.insert(key("a"), 1);
        batch.insert(key("b"), 2);
        batch.insert(key("c"), 3);
        cache.put_all(batch);
        assert_eq!(cache.size(), 3);

        let found = cache.all_present(&[key("a"), key("c"), key("missing")]);
        assert_eq!(found.len(), 2);
        assert_eq!(found.get("a"), Some(&1));
        assert_eq!(found.get("c"), Some(&3));
        assert!(!found.contains_key("missing"));

        cache.invalidate_keys(&[key("a"), key("b"), key("never-there")]);
        assert_eq!(cache.size(), 1);

        cache.invalidate_all();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_missing_loader_support_is_a_typed_error() {
        let cache = ForwardingCache::new(MapBackend::default());

        let result = cache.get_or_load(key("a"), || Ok::<_, std::io::Error>(1));
        match result {
            Err(CacheError::BackendMismatch { backend, operation }) => {
                assert_eq!(backend, "hashmap");
                assert_eq!(operation, "get_or_load");
            }
            other => panic!("expected BackendMismatch, got {:?}", other),
        }
        // No silent default value was stored.
        assert!(cache.value_if_present(&key("a")).is_none());
    }

    #[test]
    fn test_missing_snapshot_support_is_a_typed_error() {
        let cache = ForwardingCache::new(MapBackend::default());
        cache.put(key("a"), 1);

        assert!(matches!(
            cache.entries(),
            Err(CacheError::BackendMismatch {
                operation: "snapshot",
                ..
            })
        ));
        assert!(cache.as_map().keys().is_err());
    }

    #[test]
    fn test_default_clean_up_is_noop() {
        let cache = ForwardingCache::new(MapBackend::default());
        cache.clean_up();
        cache.put(key("a"), 1);
        cache.clean_up();
        assert_eq!(cache.value_if_present(&key("a")), Some(1));
    }

    #[test]
    fn test_delegate_accessors() {
        let cache = ForwardingCache::new(MapBackend::default());
        cache.put(key("a"), 1);

        assert_eq!(cache.delegate().entries.read().len(), 1);
        assert_eq!(cache.capabilities().name, "hashmap");

        let backend = cache.into_inner();
        assert_eq!(backend.entries.read().get("a"), Some(&1));
    }
}
