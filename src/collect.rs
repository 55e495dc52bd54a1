//! Accumulating flattened entries and ordering them.
//!
//! [`Collector`] takes `(path, leaf)` pairs in whatever order the traverser
//! produces them and turns them into a [`FlatMap`] whose keys are strictly
//! ascending under byte-wise comparison.
//!
//! # Collisions
//!
//! Two different input paths can render to the same key (`{"a.b": 1}` and
//! `{"a": {"b": 2}}` both give `"a.b"`). The later-arriving entry wins. Since
//! arrival order among siblings follows the host map's iteration order, the
//! winner is not specified; callers who care must keep keys dot-free.

use alloc::string::String;
use alloc::vec::Vec;
use core::mem;

use log::{debug, trace};

use crate::error::UnnestError;

/// Accumulator for one unnest call.
#[derive(Debug)]
pub struct Collector<L> {
    entries: Vec<(String, L)>,
}

impl<L> Collector<L> {
    /// An empty collector.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// An empty collector pre-sized for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Result<Self, UnnestError> {
        let mut entries = Vec::new();
        entries.try_reserve_exact(capacity)?;
        Ok(Self { entries })
    }

    /// Record one flattened entry.
    pub fn push(&mut self, path: String, leaf: L) -> Result<(), UnnestError> {
        self.entries.try_reserve(1)?;
        self.entries.push((path, leaf));
        Ok(())
    }

    /// Entries recorded so far, collisions included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sort by key and resolve collisions, last write wins.
    pub fn finish(self) -> FlatMap<L> {
        let mut entries = self.entries;

        // Stable, so equal keys stay in arrival order.
        entries.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

        let before = entries.len();
        entries.dedup_by(|later, kept| {
            let duplicate = later.0 == kept.0;
            if duplicate {
                trace!(target: "hash_unnest", "key collision on {:?}; keeping the later value", kept.0);
                mem::swap(&mut later.1, &mut kept.1);
            }
            duplicate
        });
        let collisions = before - entries.len();
        if collisions > 0 {
            debug!(target: "hash_unnest", "resolved {collisions} key collisions");
        }

        FlatMap { entries }
    }
}

impl<L> Default for Collector<L> {
    fn default() -> Self {
        Self::new()
    }
}

/// Flat, key-sorted output of an unnest call.
///
/// Keys are unique and strictly ascending under byte-wise comparison.
/// Lookups are binary searches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatMap<L> {
    entries: Vec<(String, L)>,
}

impl<L> FlatMap<L> {
    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Leaf stored under the dot-joined `key`.
    pub fn get(&self, key: &str) -> Option<&L> {
        self.position(key).map(|i| &self.entries[i].1)
    }

    /// `true` if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Leaves in key order.
    pub fn values(&self) -> impl Iterator<Item = &L> + '_ {
        self.entries.iter().map(|(_, v)| v)
    }

    /// `(key, leaf)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &L)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The sorted entries as a slice.
    pub fn as_slice(&self) -> &[(String, L)] {
        &self.entries
    }

    /// Transform every leaf, keeping keys and order.
    pub fn map_leaves<M, F>(self, mut f: F) -> FlatMap<M>
    where
        F: FnMut(L) -> M,
    {
        FlatMap {
            entries: self
                .entries
                .into_iter()
                .map(|(k, v)| (k, f(v)))
                .collect(),
        }
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries
            .binary_search_by(|(k, _)| k.as_bytes().cmp(key.as_bytes()))
            .ok()
    }
}

impl<L: Clone> FlatMap<&L> {
    /// Detach the output from the input tree by cloning every leaf.
    pub fn cloned(self) -> FlatMap<L> {
        self.map_leaves(L::clone)
    }
}

impl<L> Default for FlatMap<L> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<L> IntoIterator for FlatMap<L> {
    type Item = (String, L);
    type IntoIter = alloc::vec::IntoIter<(String, L)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(feature = "serde")]
impl<L: serde::Serialize> serde::Serialize for FlatMap<L> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn collect(pairs: &[(&str, i32)]) -> FlatMap<i32> {
        let mut c = Collector::new();
        for &(k, v) in pairs {
            c.push(String::from(k), v).unwrap();
        }
        c.finish()
    }

    #[test]
    fn test_finish_sorts_bytewise() {
        let flat = collect(&[("b.c", 1), ("a", 3), ("b.a", 2)]);
        assert_eq!(flat.keys().collect::<Vec<_>>(), ["a", "b.a", "b.c"]);
        assert_eq!(flat.values().copied().collect::<Vec<_>>(), [3, 2, 1]);
    }

    #[test]
    fn test_separator_sorts_before_digits_and_letters() {
        // '.' (0x2E) < '0' (0x30) < 'B' (0x42) < 'a' (0x61)
        let flat = collect(&[("aB", 1), ("a0", 2), ("a.b", 3), ("B", 4)]);
        assert_eq!(flat.keys().collect::<Vec<_>>(), ["B", "a.b", "a0", "aB"]);
    }

    #[test]
    fn test_collision_keeps_later_arrival() {
        let flat = collect(&[("x", 1), ("a.b", 10), ("a.b", 20), ("a.b", 30)]);
        assert_eq!(flat.len(), 2);
        assert_eq!(flat.get("a.b"), Some(&30));
        assert_eq!(flat.get("x"), Some(&1));
    }

    #[test]
    fn test_get_and_contains() {
        let flat = collect(&[("k2", 2), ("k1", 1)]);
        assert_eq!(flat.get("k1"), Some(&1));
        assert!(flat.contains_key("k2"));
        assert!(!flat.contains_key("k3"));
        assert_eq!(flat.get(""), None);
    }

    #[test]
    fn test_empty_collector_gives_empty_map() {
        let c: Collector<i32> = Collector::default();
        assert!(c.is_empty());
        let flat = c.finish();
        assert!(flat.is_empty());
        assert_eq!(flat, FlatMap::default());
    }

    #[test]
    fn test_with_capacity_and_len() {
        let mut c = Collector::with_capacity(4).unwrap();
        c.push(String::from("a"), 1).unwrap();
        c.push(String::from("a"), 2).unwrap();
        assert_eq!(c.len(), 2);
        assert_eq!(c.finish().len(), 1);
    }

    #[test]
    fn test_cloned_detaches_leaves() {
        let leaves = vec![String::from("one"), String::from("two")];
        let mut c = Collector::new();
        c.push(String::from("b"), &leaves[1]).unwrap();
        c.push(String::from("a"), &leaves[0]).unwrap();
        let owned: FlatMap<String> = c.finish().cloned();
        drop(leaves);
        assert_eq!(
            owned.into_iter().collect::<Vec<_>>(),
            vec![
                (String::from("a"), String::from("one")),
                (String::from("b"), String::from("two")),
            ]
        );
    }

    #[test]
    fn test_map_leaves_keeps_order() {
        let flat = collect(&[("b", 2), ("a", 1)]).map_leaves(|v| v * 10);
        assert_eq!(
            flat.iter().collect::<Vec<_>>(),
            [("a", &10), ("b", &20)]
        );
        assert_eq!(flat.as_slice().len(), 2);
    }
}
