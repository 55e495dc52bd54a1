//! Python bindings via PyO3.
//!
//! Exposes the transform to Python as a plain function over `dict` objects.
//! Nested `dict`s (subclasses included) are mappings; any other object is a
//! leaf and is placed in the output as-is, without copying.
//!
//! # Building the Python extension
//!
//! ```bash
//! pip install maturin
//! maturin develop --features extension-module
//! ```
//!
//! # Usage
//!
//! ```python
//! from hash_unnest import unnest, leaf_count
//!
//! doc = {"b": {"c": 1, "a": 2}, "a": [3]}
//! unnest(doc)      # {'a': [3], 'b.a': 2, 'b.c': 1}
//! leaf_count(doc)  # 3
//! ```
//!
//! Output dicts are built in sorted key order, so iterating them yields sorted
//! keys. Keys that are not `str` are rendered with `str(key)`; if that raises,
//! the exception propagates out of `unnest` / `leaf_count` unchanged.

use std::cell::RefCell;
use std::rc::Rc;

use pyo3::exceptions::{PyMemoryError, PyTypeError};
use pyo3::prelude::*;
use pyo3::types::iter::BoundDictIterator;
use pyo3::types::PyDict;

use crate::error::UnnestError;
use crate::value::{Node, Tree};

// ── Tree adapter ──────────────────────────────────────────────────────────────

// First key-rendering failure of a walk, shared by every handle of that walk.
type KeyError = Rc<RefCell<Option<PyErr>>>;

/// A Python object seen as a tree node.
///
/// All handles produced from one [`PyTree::root`] share a slot for the first
/// `str(key)` failure. Once it is set every mapping yields no further entries,
/// and [`PyTree::take_key_error`] hands the exception back to the caller.
pub struct PyTree<'py> {
    obj: Bound<'py, PyAny>,
    key_error: KeyError,
}

impl<'py> PyTree<'py> {
    /// Root handle with a fresh error slot.
    pub fn root(obj: Bound<'py, PyAny>) -> Self {
        Self {
            obj,
            key_error: Rc::new(RefCell::new(None)),
        }
    }

    /// Handle onto a different object that reports into the same slot.
    fn sibling(&self, obj: Bound<'py, PyAny>) -> Self {
        Self {
            obj,
            key_error: Rc::clone(&self.key_error),
        }
    }

    /// The exception raised while rendering a key, if any.
    pub fn take_key_error(&self) -> Option<PyErr> {
        self.key_error.borrow_mut().take()
    }
}

impl Clone for PyTree<'_> {
    fn clone(&self) -> Self {
        self.sibling(self.obj.clone())
    }
}

/// Iterator over a Python dict's items with keys rendered to strings.
pub struct DictEntries<'py> {
    inner: BoundDictIterator<'py>,
    parent: PyTree<'py>,
}

fn render_key(key: &Bound<'_, PyAny>) -> PyResult<String> {
    Ok(key.str()?.to_cow()?.into_owned())
}

impl<'py> Iterator for DictEntries<'py> {
    type Item = (String, PyTree<'py>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.parent.key_error.borrow().is_some() {
            return None;
        }
        let (key, child) = self.inner.next()?;
        match render_key(&key) {
            Ok(key) => Some((key, self.parent.sibling(child))),
            Err(err) => {
                *self.parent.key_error.borrow_mut() = Some(err);
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

impl<'py> Tree for PyTree<'py> {
    type Key = String;
    type Leaf = Bound<'py, PyAny>;
    type Entries = DictEntries<'py>;

    fn classify(self) -> Node<Self::Entries, Self::Leaf> {
        if let Ok(dict) = self.obj.downcast::<PyDict>() {
            let inner = dict.iter();
            return Node::Mapping(DictEntries {
                inner,
                parent: self,
            });
        }
        Node::Leaf(self.obj)
    }
}

impl From<UnnestError> for PyErr {
    fn from(err: UnnestError) -> Self {
        match err {
            UnnestError::InvalidRoot => PyTypeError::new_err("unnest() expects a dict"),
            UnnestError::ResourceExhausted(_) => PyMemoryError::new_err(err.to_string()),
        }
    }
}

// ── Functions ─────────────────────────────────────────────────────────────────

/// Flatten a nested dict into a dict keyed by dot-joined paths, sorted by key.
///
/// Raises:
///     TypeError: if `tree` is not a dict.
///     MemoryError: if the output cannot be allocated.
///     Any exception raised by `str(key)` for a non-`str` key.
#[pyfunction]
#[pyo3(name = "unnest")]
pub fn py_unnest<'py>(py: Python<'py>, tree: Bound<'py, PyAny>) -> PyResult<Bound<'py, PyDict>> {
    let root = PyTree::root(tree);
    let flat = crate::unnest(root.clone());
    if let Some(err) = root.take_key_error() {
        return Err(err);
    }
    let flat = flat?;
    let out = PyDict::new_bound(py);
    for (key, leaf) in flat {
        out.set_item(key, leaf)?;
    }
    Ok(out)
}

/// Number of non-dict values reachable from `tree`.
///
/// Raises:
///     TypeError: if `tree` is not a dict.
///     Any exception raised by `str(key)` for a non-`str` key.
#[pyfunction]
#[pyo3(name = "leaf_count")]
pub fn py_leaf_count(tree: Bound<'_, PyAny>) -> PyResult<usize> {
    let root = PyTree::root(tree);
    let count = crate::leaf_count(root.clone());
    if let Some(err) = root.take_key_error() {
        return Err(err);
    }
    Ok(count?)
}

// ── Module entry point ────────────────────────────────────────────────────────

/// hash_unnest — flatten nested dicts into sorted dot-joined keys.
#[pymodule]
pub fn hash_unnest(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_unnest, m)?)?;
    m.add_function(wrap_pyfunction!(py_leaf_count, m)?)?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add("SEPARATOR", crate::path::SEPARATOR.to_string())?;
    Ok(())
}
