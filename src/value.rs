//! The tree model seen by the transform.
//!
//! Two layers live here:
//!
//! - [`Tree`] — the seam through which any host value model is presented to the
//!   core. A tree handle classifies itself as either a mapping (yielding
//!   `(key, child)` pairs) or a leaf. Children are handles of the same type,
//!   so a bare mapping root goes through [`crate::Unnest`] instead. The core
//!   never looks inside a leaf.
//! - [`Value`] — a native tagged tree with an opaque, generic leaf type, for
//!   callers that do not already have a host model.
//!
//! # Implementing for a host model
//!
//! ```rust,ignore
//! use hash_unnest::value::{Node, Tree};
//!
//! impl<'a> Tree for &'a MyDoc {
//!     type Key = &'a str;
//!     type Leaf = &'a MyScalar;
//!     type Entries = MyDocEntries<'a>;
//!
//!     fn classify(self) -> Node<Self::Entries, Self::Leaf> {
//!         match self {
//!             MyDoc::Object(fields) => Node::Mapping(MyDocEntries::new(fields)),
//!             MyDoc::Scalar(s) => Node::Leaf(s),
//!         }
//!     }
//! }
//! // `hash_unnest::unnest(&doc)` now works without converting `doc`.
//! ```

use alloc::string::String;

use hashbrown::HashMap;

/// An unordered mapping node: unique string keys to child values.
pub type Mapping<L> = HashMap<String, Value<L>>;

/// What a [`Tree`] handle turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<E, L> {
    /// A mapping node; `E` iterates its `(key, child)` pairs.
    Mapping(E),
    /// A leaf node carrying the opaque leaf handle.
    Leaf(L),
}

/// A handle onto one node of a host tree.
///
/// Handles are consumed by [`Tree::classify`], so implementations are usually
/// on references (`&'a Value<L>`) or on cheap ref-counted handles.
pub trait Tree: Sized {
    /// Mapping key as yielded by [`Tree::Entries`].
    type Key: AsRef<str>;
    /// Leaf handle carried into the output unchanged.
    type Leaf;
    /// Iterator over the `(key, child)` pairs of a mapping node.
    type Entries: Iterator<Item = (Self::Key, Self)>;

    /// Decide whether this node is a mapping or a leaf.
    fn classify(self) -> Node<Self::Entries, Self::Leaf>;
}

/// A nested key-value tree with opaque leaves.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value<L> {
    /// A nested mapping.
    Mapping(Mapping<L>),
    /// Any non-mapping value.
    Leaf(L),
}

impl<L> Value<L> {
    /// An empty mapping.
    pub fn empty() -> Self {
        Self::Mapping(Mapping::new())
    }

    /// `true` for the `Mapping` variant.
    pub fn is_mapping(&self) -> bool {
        matches!(self, Self::Mapping(_))
    }

    /// The mapping, if this is one.
    pub fn as_mapping(&self) -> Option<&Mapping<L>> {
        match self {
            Self::Mapping(m) => Some(m),
            Self::Leaf(_) => None,
        }
    }

    /// The leaf, if this is one.
    pub fn as_leaf(&self) -> Option<&L> {
        match self {
            Self::Leaf(l) => Some(l),
            Self::Mapping(_) => None,
        }
    }
}

impl<L> Default for Value<L> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<L> From<Mapping<L>> for Value<L> {
    fn from(mapping: Mapping<L>) -> Self {
        Self::Mapping(mapping)
    }
}

impl<L, K: Into<String>> FromIterator<(K, Value<L>)> for Value<L> {
    fn from_iter<I: IntoIterator<Item = (K, Value<L>)>>(iter: I) -> Self {
        Self::Mapping(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

// ─── Tree impls for the native model ────────────────────────────────────────

/// Borrowing iterator over a [`Mapping`]'s entries.
#[derive(Clone)]
pub struct MappingEntries<'a, L> {
    inner: hashbrown::hash_map::Iter<'a, String, Value<L>>,
}

impl<'a, L> MappingEntries<'a, L> {
    pub(crate) fn new(mapping: &'a Mapping<L>) -> Self {
        Self {
            inner: mapping.iter(),
        }
    }
}

impl<'a, L> Iterator for MappingEntries<'a, L> {
    type Item = (&'a str, &'a Value<L>);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.as_str(), v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, L> Tree for &'a Value<L> {
    type Key = &'a str;
    type Leaf = &'a L;
    type Entries = MappingEntries<'a, L>;

    fn classify(self) -> Node<Self::Entries, Self::Leaf> {
        match self {
            Value::Mapping(m) => Node::Mapping(MappingEntries::new(m)),
            Value::Leaf(l) => Node::Leaf(l),
        }
    }
}
