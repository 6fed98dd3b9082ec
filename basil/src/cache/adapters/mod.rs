//! Backend adapters translating each supported cache library onto [`Cache`].
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │                    Calling code                        │
//! │                                                        │
//! │        uses Cache<K, V> / SingleTypeCache<T>           │
//! └───────────────────────────┬────────────────────────────┘
//!                             │
//!                             ▼
//! ┌───────────────────────────────────────────────────────┐
//! │                   Backend Adapters                     │
//! │                                                        │
//! │  MokaCacheAdapter ──────► moka::sync::Cache           │
//! │  QuickCacheAdapter ─────► quick_cache::sync::Cache    │
//! └───────────────────────────────────────────────────────┘
//! ```
//!
//! | Backend | `size()` | Expiration | Concurrent loads |
//! |---------|----------|------------|------------------|
//! | moka | estimated, settles after `clean_up()` | yes | one loader, shared outcome |
//! | quick_cache | exact, live | no | one loader per successful miss |
//!
//! [`Cache`]: crate::cache::Cache

mod moka;
mod quick;

pub use self::moka::MokaCacheAdapter;
pub use self::quick::QuickCacheAdapter;
