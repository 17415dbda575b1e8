//! Snapshot views over `ElasticMap`

use crate::{ElasticMap, error::Result};
use std::{
    collections::HashSet,
    hash::{BuildHasher, Hash},
};

/// Extension trait that copies the contents of a map out into owned collections.
///
/// Each call scans every slot once and reflects the map at that moment; later
/// changes to the map are not visible through a returned collection.
pub trait MapViews<K, V> {
    /// Returns the keys of the map as a set
    fn keys(&self) -> HashSet<K>;

    /// Returns the values of the map, one per entry, in slot order
    fn values(&self) -> Vec<V>;

    /// Returns the key-value pairs of the map in slot order
    fn entries(&self) -> Vec<(K, V)>;
}

impl<K, V, S> MapViews<K, V> for ElasticMap<K, V, S>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn keys(&self) -> HashSet<K> {
        self.iter().map(|(k, _)| k.clone()).collect()
    }

    fn values(&self) -> Vec<V> {
        self.iter().map(|(_, v)| v.clone()).collect()
    }

    fn entries(&self) -> Vec<(K, V)> {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

/// Creates an `ElasticMap` with default parameters from an iterator of key-value pairs
///
/// # Errors
///
/// Returns `InsertionCapacityExceeded` if any pair cannot be placed.
pub fn from_pairs<K, V, I>(pairs: I) -> Result<ElasticMap<K, V>>
where
    K: Eq + Hash,
    I: IntoIterator<Item = (K, V)>,
{
    let mut map = ElasticMap::new();
    map.put_all(pairs)?;
    Ok(map)
}

/// Copies every pair of `source` into `target`, as `ElasticMap::put_all` would
///
/// # Errors
///
/// Returns the first `InsertionCapacityExceeded` raised by `target`.
pub fn copy_into<K, V, S, T>(
    target: &mut ElasticMap<K, V, T>,
    source: &ElasticMap<K, V, S>,
) -> Result<()>
where
    K: Eq + Hash + Clone,
    V: Clone,
    T: BuildHasher,
{
    target.put_all(source.iter().map(|(k, v)| (k.clone(), v.clone())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs() {
        let data = vec![("a".to_string(), 1), ("b".to_string(), 2), ("c".to_string(), 3)];

        let map = from_pairs(data).unwrap();

        assert_eq!(map.get("a"), Some(&1));
        assert_eq!(map.get("b"), Some(&2));
        assert_eq!(map.get("c"), Some(&3));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_keys_and_values() {
        let mut map = ElasticMap::new();
        map.insert("a".to_string(), 1).unwrap();
        map.insert("b".to_string(), 2).unwrap();
        map.insert("c".to_string(), 3).unwrap();

        let keys = map.keys();
        let mut values = map.values();
        values.sort_unstable();

        assert_eq!(keys.len(), 3);
        assert!(keys.contains("a"));
        assert!(keys.contains("b"));
        assert!(keys.contains("c"));
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn test_values_keep_duplicates() {
        let mut map = ElasticMap::new();
        map.insert(1, "same").unwrap();
        map.insert(2, "same").unwrap();

        assert_eq!(map.values(), vec!["same", "same"]);
    }

    #[test]
    fn test_entries() {
        let mut map = ElasticMap::new();
        map.insert("one", 1).unwrap();
        map.insert("two", 2).unwrap();

        let mut entries = map.entries();
        entries.sort_unstable();

        assert_eq!(entries, vec![("one", 1), ("two", 2)]);
    }

    #[test]
    fn test_views_are_snapshots() {
        let mut map = ElasticMap::new();
        map.insert(1, 10).unwrap();

        let keys = map.keys();
        map.insert(2, 20).unwrap();
        map.remove(&1);

        assert_eq!(keys.len(), 1);
        assert!(keys.contains(&1));
        assert_eq!(map.keys().into_iter().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_copy_into() {
        let mut source = ElasticMap::new();
        source.insert("a", 1).unwrap();
        source.insert("b", 2).unwrap();

        let mut target = ElasticMap::new();
        target.insert("b", 20).unwrap();
        target.insert("c", 30).unwrap();

        copy_into(&mut target, &source).unwrap();

        assert_eq!(target.len(), 3);
        assert_eq!(target.get("a"), Some(&1));
        assert_eq!(target.get("b"), Some(&2));
        assert_eq!(target.get("c"), Some(&30));
        assert_eq!(source.len(), 2);
    }
}
