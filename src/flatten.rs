//! The public transform: traverse, collect, sort.

use log::debug;

use crate::collect::{Collector, FlatMap};
use crate::error::UnnestError;
use crate::traverse::Traverser;
use crate::value::{Mapping, MappingEntries, Tree, Value};

/// Flatten `tree` into a key-sorted [`FlatMap`] of dot-joined paths.
///
/// `tree` must be a mapping; a leaf root fails with
/// [`UnnestError::InvalidRoot`]. Every reachable leaf produces one entry keyed
/// by the `.`-joined chain of keys leading to it. Leaves are carried through
/// untouched. For borrowed models such as `&Value<L>` they come back as
/// references; see [`FlatMap::cloned`] or the [`Unnest`] trait for an owned
/// result.
///
/// ```
/// use hash_unnest::{unnest, Value};
///
/// let inner: Value<i32> = [("c", Value::Leaf(1)), ("a", Value::Leaf(2))]
///     .into_iter()
///     .collect();
/// let tree: Value<i32> = [("b", inner), ("a", Value::Leaf(3))].into_iter().collect();
///
/// let flat = unnest(&tree).unwrap();
/// assert_eq!(flat.keys().collect::<Vec<_>>(), ["a", "b.a", "b.c"]);
/// ```
pub fn unnest<T: Tree>(tree: T) -> Result<FlatMap<T::Leaf>, UnnestError> {
    unnest_with(Traverser::from_root(tree)?)
}

/// Flatten starting from a mapping's entries, for roots that are a bare
/// mapping type rather than a [`Tree`] handle.
pub(crate) fn unnest_entries<T: Tree>(root: T::Entries) -> Result<FlatMap<T::Leaf>, UnnestError> {
    unnest_with(Traverser::<T>::new(root)?)
}

fn unnest_with<T: Tree>(traverser: Traverser<T>) -> Result<FlatMap<T::Leaf>, UnnestError> {
    let mut collector = Collector::new();
    let stats = traverser.run(|path, leaf| collector.push(path, leaf))?;
    let flat = collector.finish();

    debug!(
        target: "hash_unnest",
        "unnested {} leaves into {} keys (max depth {})",
        stats.leaves,
        flat.len(),
        stats.max_depth
    );
    Ok(flat)
}

/// `value.unnest()` for owned host values, returning detached leaves.
pub trait Unnest {
    /// Leaf type of the produced map.
    type Leaf;

    /// Flatten `self`; see [`unnest`].
    fn unnest(&self) -> Result<FlatMap<Self::Leaf>, UnnestError>;
}

impl<L: Clone> Unnest for Value<L> {
    type Leaf = L;

    fn unnest(&self) -> Result<FlatMap<L>, UnnestError> {
        crate::unnest(self).map(FlatMap::cloned)
    }
}

impl<L: Clone> Unnest for Mapping<L> {
    type Leaf = L;

    fn unnest(&self) -> Result<FlatMap<L>, UnnestError> {
        unnest_entries::<&Value<L>>(MappingEntries::new(self)).map(FlatMap::cloned)
    }
}
