//! Fully materialized view of a tree for display.
//!
//! [`Tree::debug`] copies a tree into plain nested maps of text. The copy
//! shares nothing with the live tree, so it can be printed, logged or
//! serialized while the original keeps changing.
//!
//! ```rust
//! use kvs_format::parse;
//!
//! let tree = parse("name=Alice;tags[=admin;]");
//! let snapshot = tree.debug();
//!
//! assert_eq!(
//!     snapshot.to_string(),
//!     "{\n    \"name\": \"Alice\",\n    \"tags\": {\n        \"0\": \"admin\"\n    }\n}"
//! );
//! ```

use crate::{Entry, Tree};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// A detached copy of a tree: text leaves and plain ordered maps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Snapshot {
    Text(String),
    Map(IndexMap<String, Snapshot>),
}

impl Snapshot {
    /// If this is a map, returns it. Otherwise returns `None`.
    #[must_use]
    pub fn as_map(&self) -> Option<&IndexMap<String, Snapshot>> {
        match self {
            Snapshot::Map(map) => Some(map),
            Snapshot::Text(_) => None,
        }
    }

    /// If this is text, returns it. Otherwise returns `None`.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Snapshot::Text(text) => Some(text),
            Snapshot::Map(_) => None,
        }
    }
}

/// A level being copied: its remaining entries and the map built so far.
struct Frame<'a> {
    source: indexmap::map::Iter<'a, String, Entry>,
    map: IndexMap<String, Snapshot>,
    key: Option<&'a String>,
}

impl<'a> Frame<'a> {
    fn new(tree: &'a Tree, key: Option<&'a String>) -> Self {
        Frame {
            source: tree.iter(),
            map: IndexMap::with_capacity(tree.len()),
            key,
        }
    }
}

impl Tree {
    /// Copies the tree into a [`Snapshot::Map`], at any depth.
    #[must_use]
    pub fn debug(&self) -> Snapshot {
        let mut stack = vec![Frame::new(self, None)];

        while let Some(top) = stack.last_mut() {
            match top.source.next() {
                Some((key, Entry::Leaf(text))) => {
                    top.map.insert(key.clone(), Snapshot::Text(text.clone()));
                }
                Some((key, Entry::Child(child))) => stack.push(Frame::new(child, Some(key))),
                None => {
                    let Some(done) = stack.pop() else {
                        break;
                    };
                    let snapshot = Snapshot::Map(done.map);
                    match (stack.last_mut(), done.key) {
                        (Some(parent), Some(key)) => {
                            parent.map.insert(key.clone(), snapshot);
                        }
                        _ => return snapshot,
                    }
                }
            }
        }
        Snapshot::Map(IndexMap::new())
    }
}

impl Drop for Snapshot {
    fn drop(&mut self) {
        let Snapshot::Map(map) = self else {
            return;
        };
        if map.is_empty() {
            return;
        }
        let mut pending = vec![std::mem::take(map)];
        while let Some(mut map) = pending.pop() {
            for (_, mut child) in map.drain(..) {
                if let Snapshot::Map(inner) = &mut child {
                    pending.push(std::mem::take(inner));
                }
            }
        }
    }
}

impl Serialize for Snapshot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Snapshot::Text(text) => serializer.serialize_str(text),
            Snapshot::Map(map) => map.serialize(serializer),
        }
    }
}

/// Indented JSON, four spaces per level.
impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.serialize(&mut serializer).map_err(|_| fmt::Error)?;
        f.write_str(&String::from_utf8_lossy(&buffer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    #[test]
    fn test_snapshot_structure() {
        let snapshot = parse("a=1;b[c=2;]").debug();
        let map = snapshot.as_map().unwrap();

        assert_eq!(map.get("a").and_then(Snapshot::as_str), Some("1"));
        let inner = map.get("b").and_then(Snapshot::as_map).unwrap();
        assert_eq!(inner.get("c"), Some(&Snapshot::Text("2".to_string())));
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut tree = parse("a[b=1;]");
        let snapshot = tree.debug();

        tree.set("changed", &["a", "b"]);
        tree.remove(&["a"]);

        let inner = snapshot.as_map().and_then(|m| m.get("a")).and_then(Snapshot::as_map);
        assert_eq!(inner.and_then(|m| m.get("b")).and_then(Snapshot::as_str), Some("1"));
    }

    #[test]
    fn test_empty_tree_display() {
        assert_eq!(Tree::new().debug().to_string(), "{}");
    }

    #[test]
    fn test_snapshot_of_deep_tree() {
        let depth = 50_000;
        let tree = parse(&format!("{}leaf=v;", "[".repeat(depth)));
        let snapshot = tree.debug();

        let mut level = &snapshot;
        for _ in 0..depth {
            level = level.as_map().and_then(|m| m.get("0")).unwrap();
        }
        let leaf = level.as_map().and_then(|m| m.get("leaf"));
        assert_eq!(leaf.and_then(Snapshot::as_str), Some("v"));
    }
}
