//! Unified key-value cache contract and its backend adapters.
//!
//! - [`traits`]: the [`Cache`] contract, loaders and errors
//! - [`view`]: live map and key-set views
//! - [`forwarding`]: the generic forwarding layer adapters are built on
//! - [`adapters`]: moka and quick_cache adapters

pub mod adapters;
pub mod forwarding;
pub mod traits;
pub mod view;

pub use adapters::{MokaCacheAdapter, QuickCacheAdapter};
pub use forwarding::{
    Backend, BackendCapabilities, Forward, ForwardingCache, LoaderDedup, SizeSemantics,
};
pub use traits::{BoxError, Cache, CacheError, CacheExt, Loader, LoaderError};
pub use view::{KeySetView, MapView};
