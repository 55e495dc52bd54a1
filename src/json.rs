//! `serde_json` adapters.
//!
//! JSON objects are mappings; every other JSON value (arrays included) is an
//! opaque leaf. `&serde_json::Value` is a [`Tree`] handle; a bare
//! `serde_json::Map` root is flattened through [`Unnest`]. Both borrow the
//! document, so no intermediate [`Value`](crate::Value) tree is built.
//!
//! ```
//! use hash_unnest::Unnest;
//! use serde_json::json;
//!
//! let doc = json!({ "a": { "b": 1 }, "c": [1, 2] });
//! let flat = doc.unnest().unwrap();
//! assert_eq!(flat.get("a.b"), Some(&json!(1)));
//! assert_eq!(flat.get("c"), Some(&json!([1, 2])));
//! ```

use serde_json::{Map, Value as JsonValue};

use crate::collect::FlatMap;
use crate::error::UnnestError;
use crate::flatten::{unnest_entries, Unnest};
use crate::value::{Node, Tree};

/// Borrowing iterator over a JSON object's members.
pub struct JsonEntries<'a> {
    inner: serde_json::map::Iter<'a>,
}

impl<'a> Iterator for JsonEntries<'a> {
    type Item = (&'a str, &'a JsonValue);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.as_str(), v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> Tree for &'a JsonValue {
    type Key = &'a str;
    type Leaf = &'a JsonValue;
    type Entries = JsonEntries<'a>;

    fn classify(self) -> Node<Self::Entries, Self::Leaf> {
        match self {
            JsonValue::Object(members) => Node::Mapping(JsonEntries {
                inner: members.iter(),
            }),
            other => Node::Leaf(other),
        }
    }
}

impl Unnest for JsonValue {
    type Leaf = JsonValue;

    fn unnest(&self) -> Result<FlatMap<JsonValue>, UnnestError> {
        crate::unnest(self).map(FlatMap::cloned)
    }
}

impl Unnest for Map<String, JsonValue> {
    type Leaf = JsonValue;

    fn unnest(&self) -> Result<FlatMap<JsonValue>, UnnestError> {
        unnest_entries::<&JsonValue>(JsonEntries { inner: self.iter() }).map(FlatMap::cloned)
    }
}

impl From<FlatMap<JsonValue>> for Map<String, JsonValue> {
    fn from(flat: FlatMap<JsonValue>) -> Self {
        flat.into_iter().collect()
    }
}
