//! Core traits for the unified cache interface.
//!
//! The `Cache` trait is the one key-value contract every backend adapter
//! satisfies. Callers program against it and never need to know whether a
//! moka or a quick_cache store sits underneath.
//!
//! # Design Principles
//!
//! - **Thin translation**: Adapters forward to the wrapped backend. Eviction,
//!   expiration and concurrency are inherited, never reimplemented.
//! - **Absent is not an error**: Lookups return `Option`; only loader failures
//!   and backend mismatches produce a `CacheError`.
//! - **Approximate sizes**: `size()` may be an estimate depending on backend.
//! - **Dyn-compatible**: Loaders are boxed so the trait works as
//!   `Arc<dyn Cache<K, V>>`.
//!
//! # Example
//!
//! ```ignore
//! use basil::cache::{Cache, CacheExt};
//!
//! let cache = basil::wrap(moka::sync::Cache::new(1_000)).cache();
//! cache.put("answer".to_string(), 42);
//!
//! let value = cache.get_or_load("question".to_string(), || Ok::<_, std::io::Error>(7))?;
//! assert_eq!(cache.value_if_present(&"answer".to_string()), Some(42));
//! ```

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::cache::view::MapView;

/// Boxed, thread-safe error produced by caller-supplied loaders.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// A value loader invoked at most once on a cache miss.
pub type Loader<'a, V> = Box<dyn FnOnce() -> Result<V, LoaderError> + 'a>;

/// Failure raised by a loader passed to [`Cache::get`].
///
/// Wraps the original error so it can be inspected or downcast after it has
/// travelled through the backend.
#[derive(Debug)]
pub struct LoaderError {
    inner: BoxError,
}

impl LoaderError {
    /// Wrap any error as a loader failure.
    pub fn new<E>(error: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self {
            inner: error.into(),
        }
    }

    /// Borrow the underlying cause.
    pub fn get_ref(&self) -> &(dyn Error + Send + Sync + 'static) {
        &*self.inner
    }

    /// Attempt to downcast the underlying cause to a concrete error type.
    pub fn downcast_ref<E: Error + 'static>(&self) -> Option<&E> {
        self.inner.downcast_ref::<E>()
    }

    /// Consume the wrapper and return the underlying cause.
    pub fn into_inner(self) -> BoxError {
        self.inner
    }
}

impl fmt::Display for LoaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl Error for LoaderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.inner.source()
    }
}

/// Errors that can occur during cache operations.
#[derive(Debug, Clone, Error)]
pub enum CacheError {
    /// The loader supplied to `get` failed. The cause is shared between all
    /// callers that waited on the same computation.
    #[error("Loader failed to compute value: {source}")]
    Computation { source: Arc<LoaderError> },

    /// The wrapped backend does not provide an operation the contract needs.
    #[error("Backend {backend} does not support {operation}")]
    BackendMismatch {
        backend: &'static str,
        operation: &'static str,
    },
}

impl CacheError {
    /// Build a computation error from a loader failure.
    pub fn computation(cause: impl Into<Arc<LoaderError>>) -> Self {
        CacheError::Computation {
            source: cause.into(),
        }
    }

    /// The loader failure attached to a computation error, if any.
    pub fn loader_cause(&self) -> Option<&LoaderError> {
        match self {
            CacheError::Computation { source } => Some(source.as_ref()),
            CacheError::BackendMismatch { .. } => None,
        }
    }
}

/// Unified key-value cache interface.
///
/// Every backend adapter implements this trait. All methods take `&self`;
/// thread-safety and consistency come from the wrapped backend.
///
/// # Loader Semantics
///
/// `get` invokes the loader only on a miss and at most once per miss, even
/// when several threads ask for the same missing key. Those threads block
/// until the single computation finishes and all receive its result.
///
/// # Sizes
///
/// `size()` is approximate. Some backends only settle their counts after
/// `clean_up()`. Use `is_empty()` when an exact emptiness check is needed.
pub trait Cache<K, V>: Send + Sync {
    /// Return the value for `key`, computing and storing it with `loader` on a miss.
    ///
    /// # Errors
    ///
    /// - `CacheError::Computation` if the loader fails (cause attached)
    /// - `CacheError::BackendMismatch` if the backend cannot load on miss
    fn get(&self, key: K, loader: Loader<'_, V>) -> Result<V, CacheError>;

    /// Return the current value for `key` without invoking any loader.
    fn value_if_present(&self, key: &K) -> Option<V>;

    /// Return the subset of `keys` currently resident.
    ///
    /// Missing keys are omitted, not reported.
    fn all_present(&self, keys: &[K]) -> HashMap<K, V>;

    /// Insert or replace the value for `key`.
    fn put(&self, key: K, value: V);

    /// Insert or replace every entry of `entries`.
    fn put_all(&self, entries: HashMap<K, V>);

    /// Discard the value for `key`. Absent keys are a no-op.
    fn invalidate(&self, key: &K);

    /// Discard the values for `keys`.
    fn invalidate_keys(&self, keys: &[K]);

    /// Discard every entry.
    fn invalidate_all(&self);

    /// Approximate number of resident entries.
    fn size(&self) -> u64;

    /// Whether the cache currently holds no entries.
    fn is_empty(&self) -> bool;

    /// Run any maintenance the backend defers, such as expiration sweeps.
    fn clean_up(&self);

    /// Point-in-time snapshot of the resident entries.
    fn entries(&self) -> Result<Vec<(K, V)>, CacheError>;

    /// Live view of the cache as a map. Mutations go straight to the cache.
    fn as_map(&self) -> MapView<'_, K, V>;
}

/// Convenience methods available on every [`Cache`], including trait objects.
pub trait CacheExt<K, V>: Cache<K, V> {
    /// Like [`Cache::get`], but accepts any loader whose error converts into
    /// a boxed error.
    fn get_or_load<F, E>(&self, key: K, loader: F) -> Result<V, CacheError>
    where
        F: FnOnce() -> Result<V, E>,
        E: Into<BoxError>,
    {
        self.get(key, Box::new(move || loader().map_err(LoaderError::new)))
    }
}

impl<K, V, C> CacheExt<K, V> for C where C: Cache<K, V> + ?Sized {}
