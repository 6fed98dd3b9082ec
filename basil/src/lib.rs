//! Basil - one cache interface over moka and quick_cache
//!
//! This library lets calling code program against a single key-value cache
//! contract regardless of which in-process cache library sits underneath,
//! and builds set-like caches (deduplicated membership) on top of it.
//!
//! - [`cache`]: the [`Cache`] contract, backend adapters and views
//! - [`set`]: set-like caches over a key-value cache
//! - [`builder`]: [`wrap`] a raw backend into either view
//!
//! Eviction, expiration and concurrency are entirely the backend's. Adapters
//! only translate the operation surface.

pub mod builder;
pub mod cache;
pub mod set;

pub use builder::{wrap, wrap_set, CacheProvider, IntoAdapter};
pub use cache::{Cache, CacheError, CacheExt, LoaderError};
pub use set::{CacheSet, Sentinel, SingleTypeCache, SENTINEL};
