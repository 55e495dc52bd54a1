//! # hash-unnest
//!
//! Flatten an arbitrarily nested tree of key-value mappings into one flat map
//! whose keys are the dot-joined paths to each leaf, returned in sorted order.
//!
//! ```text
//! { "a": { "b": 1 }, "c": { "d": { "e": 2 } } }   →   { "a.b": 1, "c.d.e": 2 }
//! ```
//!
//! ## The pipeline
//!
//! ```text
//! Tree → Traverser → Collector → FlatMap
//!            ↕
//!       PathBuilder
//! ```
//!
//! The traverser walks the tree depth-first over an explicit work stack, so
//! nesting depth never touches the native call stack. The path builder keeps
//! the current key prefix in a single buffer and renders a key only when a leaf
//! is reached. The collector sorts everything byte-wise at the end and resolves
//! duplicate keys last-write-wins.
//!
//! ## Module overview
//!
//! | Module | Key types | What it does |
//! |--------|-----------|--------------|
//! | [`value`] | [`Value`], [`Tree`] | Native tree model; the seam for host models |
//! | [`path`] | [`PathBuilder`] | O(1)-amortized dot-joined path construction |
//! | [`traverse`] | [`Traverser`], [`leaf_count`] | Explicit-stack depth-first walk |
//! | [`collect`] | [`Collector`], [`FlatMap`] | Collision policy and sorted output |
//! | [`flatten`] | [`unnest`], [`Unnest`] | The public transform |
//! | `json` | — | `serde_json` adapters (requires `json` feature) |
//! | `ffi` | — | Python bindings (requires `python-ffi` feature) |
//!
//! ## Caveats
//!
//! Keys are joined verbatim. `{"a.b": 1}` and `{"a": {"b": 2}}` both flatten
//! to `"a.b"`; when both appear in one input, one of them silently wins.
//!
//! ## `no_std`
//!
//! The crate is `#![no_std]` (with `alloc`) unless `std`, `json` or
//! `python-ffi` is enabled. Enable `serde` for (de)serialization of [`Value`]
//! and serialization of [`FlatMap`].

#![cfg_attr(not(any(feature = "std", feature = "python-ffi")), no_std)]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

pub mod collect;
pub mod error;
pub mod flatten;
pub mod path;
pub mod traverse;
pub mod value;

#[cfg(feature = "json")]
pub mod json;

#[cfg(feature = "python-ffi")]
pub mod ffi;

pub use collect::{Collector, FlatMap};
pub use error::UnnestError;
pub use flatten::{unnest, Unnest};
pub use path::PathBuilder;
pub use traverse::{leaf_count, Traverser, WalkStats};
pub use value::{Mapping, Node, Tree, Value};
