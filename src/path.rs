//! Dot-joined path construction.
//!
//! [`PathBuilder`] keeps the rendered prefix in one growing buffer together
//! with a stack of truncation marks, so descending one level is a single
//! `push_str` and ascending is a `truncate`. The full key string is only
//! materialised by [`PathBuilder::render`], which the traverser calls once per
//! leaf.
//!
//! Segments are joined verbatim. A segment that itself contains `.` is not
//! escaped, so `["a.b"]` and `["a", "b"]` render identically.

use alloc::collections::TryReserveError;
use alloc::string::String;
use alloc::vec::Vec;

/// Segment separator used when joining paths.
pub const SEPARATOR: char = '.';

/// Incrementally built key path.
#[derive(Debug, Default, Clone)]
pub struct PathBuilder {
    buf: String,
    // Length of `buf` before each pushed segment.
    marks: Vec<usize>,
}

impl PathBuilder {
    /// An empty path (depth 0).
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a segment. Amortized O(len(segment)).
    ///
    /// The separator is placed based on depth rather than on buffer contents,
    /// so an empty segment still yields a separator: `["", "b"]` renders as
    /// `".b"`.
    pub fn push(&mut self, segment: &str) -> Result<(), TryReserveError> {
        let needs_separator = !self.marks.is_empty();
        self.marks.try_reserve(1)?;
        self.buf
            .try_reserve(segment.len() + usize::from(needs_separator))?;

        self.marks.push(self.buf.len());
        if needs_separator {
            self.buf.push(SEPARATOR);
        }
        self.buf.push_str(segment);
        Ok(())
    }

    /// Drop the most recently pushed segment. No-op at depth 0.
    pub fn pop(&mut self) {
        if let Some(mark) = self.marks.pop() {
            self.buf.truncate(mark);
        }
    }

    /// Number of segments currently pushed.
    pub fn depth(&self) -> usize {
        self.marks.len()
    }

    /// The current path as a borrowed string.
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Render the current path into a freshly allocated, exactly-sized string.
    pub fn render(&self) -> Result<String, TryReserveError> {
        let mut out = String::new();
        out.try_reserve_exact(self.buf.len())?;
        out.push_str(&self.buf);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_round_trip() {
        let mut path = PathBuilder::new();
        path.push("a").unwrap();
        path.push("b").unwrap();
        path.push("c").unwrap();
        assert_eq!(path.as_str(), "a.b.c");
        assert_eq!(path.depth(), 3);

        path.pop();
        assert_eq!(path.as_str(), "a.b");
        path.push("d").unwrap();
        assert_eq!(path.render().unwrap(), "a.b.d");

        path.pop();
        path.pop();
        path.pop();
        assert_eq!(path.as_str(), "");
        assert_eq!(path.depth(), 0);
    }

    #[test]
    fn test_pop_at_root_is_noop() {
        let mut path = PathBuilder::new();
        path.pop();
        assert_eq!(path.depth(), 0);
        assert_eq!(path.as_str(), "");
    }

    #[test]
    fn test_empty_segments_keep_separators() {
        let mut path = PathBuilder::new();
        path.push("").unwrap();
        path.push("b").unwrap();
        assert_eq!(path.as_str(), ".b");

        let mut path = PathBuilder::new();
        path.push("a").unwrap();
        path.push("").unwrap();
        assert_eq!(path.as_str(), "a.");
    }

    #[test]
    fn test_dotted_segment_is_not_escaped() {
        let mut joined = PathBuilder::new();
        joined.push("a.b").unwrap();

        let mut nested = PathBuilder::new();
        nested.push("a").unwrap();
        nested.push("b").unwrap();

        assert_eq!(joined.render().unwrap(), nested.render().unwrap());
    }

    #[test]
    fn test_render_is_detached_from_builder() {
        let mut path = PathBuilder::new();
        path.push("x").unwrap();
        let rendered = path.render().unwrap();
        path.push("y").unwrap();
        assert_eq!(rendered, "x");
        assert_eq!(path.as_str(), "x.y");
    }
}
