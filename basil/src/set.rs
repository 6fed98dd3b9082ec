//! Set-like caches built on a key-value [`Cache`].
//!
//! A [`CacheSet`] stores each member as a key mapped to the fixed
//! [`SENTINEL`] value. It owns the underlying cache and forwards every call,
//! so eviction, expiration and concurrency behave exactly as they do for the
//! key-value cache it wraps.
//!
//! # Example
//!
//! ```ignore
//! use basil::set::SingleTypeCache;
//!
//! let seen = basil::wrap_set(moka::sync::Cache::new(10_000));
//! seen.add("request-42".to_string());
//! assert!(seen.contains(&"request-42".to_string()));
//! ```

use std::fmt;
use std::marker::PhantomData;

use crate::cache::{Cache, KeySetView};

/// Value type stored for every member of a set-like cache.
pub type Sentinel = u8;

/// The value stored for every member: present, no payload.
pub const SENTINEL: Sentinel = 0;

/// A cache that stores single values rather than key-value pairs.
pub trait SingleTypeCache<T>: Send + Sync {
    /// Whether `value` is a member.
    fn contains(&self, value: &T) -> bool;

    /// Add `value`.
    fn add(&self, value: T);

    /// Add every value, one at a time. The batch is not atomic.
    fn add_all<I>(&self, values: I)
    where
        I: IntoIterator<Item = T>,
        Self: Sized,
    {
        for value in values {
            self.add(value);
        }
    }

    /// Discard `value`.
    fn invalidate(&self, value: &T);

    /// Discard every value, one at a time.
    fn invalidate_values<I>(&self, values: I)
    where
        I: IntoIterator<Item = T>,
        Self: Sized,
    {
        for value in values {
            self.invalidate(&value);
        }
    }

    /// Discard every member.
    fn invalidate_all(&self);

    /// Whether there are no members.
    fn is_empty(&self) -> bool;

    /// Live view of the members.
    fn as_set(&self) -> KeySetView<'_, T, Sentinel>;

    /// Approximate number of members.
    fn size(&self) -> u64;

    /// Run any maintenance the backend defers.
    fn clean_up(&self);
}

/// [`SingleTypeCache`] over a key-value cache whose values are [`SENTINEL`].
pub struct CacheSet<T, C> {
    delegate: C,
    _member: PhantomData<fn(T) -> T>,
}

impl<T, C> CacheSet<T, C>
where
    C: Cache<T, Sentinel>,
{
    /// Wrap a key-value cache.
    pub fn new(delegate: C) -> Self {
        Self {
            delegate,
            _member: PhantomData,
        }
    }

    /// The wrapped key-value cache.
    pub fn delegate(&self) -> &C {
        &self.delegate
    }

    /// Unwrap, returning the key-value cache.
    pub fn into_inner(self) -> C {
        self.delegate
    }
}

impl<T, C> SingleTypeCache<T> for CacheSet<T, C>
where
    C: Cache<T, Sentinel>,
{
    fn contains(&self, value: &T) -> bool {
        self.delegate.value_if_present(value).is_some()
    }

    fn add(&self, value: T) {
        self.delegate.put(value, SENTINEL);
    }

    fn invalidate(&self, value: &T) {
        self.delegate.invalidate(value);
    }

    fn invalidate_all(&self) {
        self.delegate.invalidate_all();
    }

    fn is_empty(&self) -> bool {
        self.as_set().is_empty()
    }

    fn as_set(&self) -> KeySetView<'_, T, Sentinel> {
        self.delegate.as_map().key_set()
    }

    fn size(&self) -> u64 {
        self.delegate.size()
    }

    fn clean_up(&self) {
        self.delegate.clean_up();
    }
}

impl<T, C: fmt::Debug> fmt::Debug for CacheSet<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheSet")
            .field("delegate", &self.delegate)
            .finish()
    }
}
