//! Live map and key-set views over a [`Cache`].
//!
//! Views hold only a borrow of the cache. Every call is forwarded, so a
//! change made through a view is immediately visible through the cache and
//! vice versa. Nothing is copied or cached on the side.

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use crate::cache::traits::{Cache, CacheError};

/// Live map view returned by [`Cache::as_map`].
pub struct MapView<'a, K, V> {
    cache: &'a dyn Cache<K, V>,
}

impl<'a, K, V> MapView<'a, K, V> {
    /// Create a view over `cache`.
    pub fn new(cache: &'a dyn Cache<K, V>) -> Self {
        Self { cache }
    }

    /// Current value for `key`.
    pub fn get(&self, key: &K) -> Option<V> {
        self.cache.value_if_present(key)
    }

    /// Whether `key` is currently resident.
    pub fn contains_key(&self, key: &K) -> bool {
        self.cache.value_if_present(key).is_some()
    }

    /// Insert or replace an entry in the underlying cache.
    pub fn insert(&self, key: K, value: V) {
        self.cache.put(key, value);
    }

    /// Remove `key` from the underlying cache, returning the value it held.
    ///
    /// The read and the removal are two backend calls, not one atomic step.
    pub fn remove(&self, key: &K) -> Option<V> {
        let previous = self.cache.value_if_present(key);
        self.cache.invalidate(key);
        previous
    }

    /// Remove every entry.
    pub fn clear(&self) {
        self.cache.invalidate_all();
    }

    /// Approximate number of entries.
    pub fn len(&self) -> u64 {
        self.cache.size()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Snapshot of the resident entries.
    pub fn entries(&self) -> Result<Vec<(K, V)>, CacheError> {
        self.cache.entries()
    }

    /// Snapshot of the resident keys.
    pub fn keys(&self) -> Result<Vec<K>, CacheError> {
        Ok(self.cache.entries()?.into_iter().map(|(k, _)| k).collect())
    }

    /// Live view of the keys of this map.
    pub fn key_set(&self) -> KeySetView<'a, K, V> {
        KeySetView { cache: self.cache }
    }
}

impl<K, V> fmt::Debug for MapView<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapView")
            .field("approximate_len", &self.cache.size())
            .finish()
    }
}

/// Live view of the keys of a cache.
///
/// Used by set-like caches, where the keys are the members.
pub struct KeySetView<'a, K, V> {
    cache: &'a dyn Cache<K, V>,
}

impl<K, V> KeySetView<'_, K, V> {
    /// Whether `key` is a member.
    pub fn contains(&self, key: &K) -> bool {
        self.cache.value_if_present(key).is_some()
    }

    /// Remove `key`, reporting whether it was a member.
    pub fn remove(&self, key: &K) -> bool {
        let present = self.contains(key);
        self.cache.invalidate(key);
        present
    }

    /// Approximate number of members.
    pub fn len(&self) -> u64 {
        self.cache.size()
    }

    /// Whether there are no members.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Snapshot of the members.
    pub fn to_vec(&self) -> Result<Vec<K>, CacheError> {
        Ok(self.cache.entries()?.into_iter().map(|(k, _)| k).collect())
    }
}

impl<K: Eq + Hash, V> KeySetView<'_, K, V> {
    /// Snapshot of the members as a `HashSet`.
    pub fn to_hash_set(&self) -> Result<HashSet<K>, CacheError> {
        Ok(self.cache.entries()?.into_iter().map(|(k, _)| k).collect())
    }
}

impl<K, V> fmt::Debug for KeySetView<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeySetView")
            .field("approximate_len", &self.cache.size())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::cache::{Cache, MokaCacheAdapter};
    use moka::sync::Cache as MokaCache;

    fn create_test_cache() -> MokaCacheAdapter<String, u32> {
        MokaCacheAdapter::new(MokaCache::new(100))
    }

    #[test]
    fn test_map_view_writes_are_visible_in_cache() {
        let cache = create_test_cache();
        let map = cache.as_map();

        map.insert("a".to_string(), 1);
        assert_eq!(cache.value_if_present(&"a".to_string()), Some(1));

        assert_eq!(map.remove(&"a".to_string()), Some(1));
        assert!(cache.value_if_present(&"a".to_string()).is_none());
    }

    #[test]
    fn test_map_view_sees_cache_writes() {
        let cache = create_test_cache();
        let map = cache.as_map();
        assert!(map.is_empty());

        cache.put("b".to_string(), 2);
        assert!(map.contains_key(&"b".to_string()));
        assert_eq!(map.get(&"b".to_string()), Some(2));
        assert!(!map.is_empty());
        assert_eq!(map.keys().unwrap(), vec!["b".to_string()]);
    }

    #[test]
    fn test_map_view_remove_missing_is_none() {
        let cache = create_test_cache();
        assert!(cache.as_map().remove(&"ghost".to_string()).is_none());
    }

    #[test]
    fn test_map_view_clear() {
        let cache = create_test_cache();
        cache.put("a".to_string(), 1);
        cache.put("b".to_string(), 2);

        cache.as_map().clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_key_set_view() {
        let cache = create_test_cache();
        cache.put("x".to_string(), 0);
        cache.put("y".to_string(), 0);

        let keys = cache.as_map().key_set();
        assert!(keys.contains(&"x".to_string()));

        let members = keys.to_hash_set().unwrap();
        assert_eq!(members.len(), 2);
        assert!(members.contains("y"));

        assert!(keys.remove(&"x".to_string()));
        assert!(!keys.remove(&"x".to_string()));
        assert!(!cache.as_map().contains_key(&"x".to_string()));
    }
}
