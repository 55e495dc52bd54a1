//! Depth-first, pre-order traversal over an explicit work stack.
//!
//! Each stack frame is the entry iterator of one open mapping. The top frame is
//! advanced one entry at a time: a mapping child pushes a new frame, a leaf
//! child is emitted, and an exhausted frame is popped. Native stack usage is
//! constant no matter how deeply the input nests; heap usage is
//! `O(depth)` for the frames plus the current path.
//!
//! All growth goes through `try_reserve`, so running out of memory on
//! adversarial input surfaces as [`UnnestError::ResourceExhausted`] instead of
//! aborting the process.

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::UnnestError;
use crate::path::PathBuilder;
use crate::value::{Node, Tree};

/// Summary of one completed walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Leaves emitted.
    pub leaves: usize,
    /// Deepest mapping nesting seen; the root mapping is depth 1.
    pub max_depth: usize,
}

/// Walks a tree from its root mapping, emitting one `(path, leaf)` pair per
/// reachable leaf.
pub struct Traverser<T: Tree> {
    stack: Vec<T::Entries>,
    path: PathBuilder,
}

impl<T: Tree> Traverser<T> {
    /// Start a walk at the root mapping's entries.
    pub fn new(root: T::Entries) -> Result<Self, UnnestError> {
        let mut stack = Vec::new();
        stack.try_reserve(1)?;
        stack.push(root);
        Ok(Self {
            stack,
            path: PathBuilder::new(),
        })
    }

    /// Start a walk at `tree`, which must classify as a mapping.
    pub fn from_root(tree: T) -> Result<Self, UnnestError> {
        match tree.classify() {
            Node::Mapping(entries) => Self::new(entries),
            Node::Leaf(_) => Err(UnnestError::InvalidRoot),
        }
    }

    /// Drive the walk to completion, handing every leaf to `emit`.
    ///
    /// Visits each node exactly once. The order in which leaves arrive follows
    /// the host map's own iteration order and is not otherwise specified.
    pub fn run<F>(mut self, mut emit: F) -> Result<WalkStats, UnnestError>
    where
        F: FnMut(String, T::Leaf) -> Result<(), UnnestError>,
    {
        let mut stats = WalkStats {
            leaves: 0,
            max_depth: self.stack.len(),
        };

        while let Some(frame) = self.stack.last_mut() {
            let Some((key, child)) = frame.next() else {
                self.stack.pop();
                // The path is one segment shorter than the stack, so popping
                // the root frame pops nothing.
                self.path.pop();
                continue;
            };

            self.path.push(key.as_ref())?;
            match child.classify() {
                Node::Mapping(entries) => {
                    self.stack.try_reserve(1)?;
                    self.stack.push(entries);
                    stats.max_depth = stats.max_depth.max(self.stack.len());
                }
                Node::Leaf(leaf) => {
                    emit(self.path.render()?, leaf)?;
                    self.path.pop();
                    stats.leaves += 1;
                }
            }
        }

        Ok(stats)
    }
}

/// Count the leaves reachable from `tree` without rendering any paths.
///
/// Uses the same explicit-stack walk as [`Traverser`]. Empty nested mappings
/// contribute nothing.
pub fn leaf_count<T: Tree>(tree: T) -> Result<usize, UnnestError> {
    let Node::Mapping(root) = tree.classify() else {
        return Err(UnnestError::InvalidRoot);
    };

    let mut stack: Vec<T::Entries> = Vec::new();
    stack.try_reserve(1)?;
    stack.push(root);

    let mut count = 0usize;
    while let Some(frame) = stack.last_mut() {
        let Some((_, child)) = frame.next() else {
            stack.pop();
            continue;
        };
        match child.classify() {
            Node::Mapping(entries) => {
                stack.try_reserve(1)?;
                stack.push(entries);
            }
            Node::Leaf(_) => count += 1,
        }
    }
    Ok(count)
}
