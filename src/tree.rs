//! Ordered key/value tree, the central data model of a KVS document.
//!
//! This module provides [`Tree`], a wrapper around [`IndexMap`] that maps
//! string keys to [`Entry`] values and keeps them in insertion order.
//!
//! ## Why IndexMap?
//!
//! Insertion order is load-bearing for KVS:
//!
//! - **Serialization order**: entries are written in the order they were added
//! - **Auto-keys**: unlabeled entries are numbered in the order they appear
//! - **Overwrites**: assigning an existing key replaces the value in place
//!
//! ## Examples
//!
//! ```rust
//! use kvs_format::Tree;
//!
//! let mut tree = Tree::new();
//! tree.insert("name", "Alice");
//! tree.insert("age", "30");
//!
//! assert_eq!(tree.len(), 2);
//! assert_eq!(tree.keys(), vec!["name", "age"]);
//! ```

use crate::de::Parser;
use crate::Entry;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// One level of a nested key/value document.
///
/// Each key maps to an [`Entry`]: either a text leaf or an owned child
/// `Tree`. Children are owned exclusively, so a tree is always a finite,
/// acyclic out-tree and `Clone` is a deep copy.
///
/// Besides the entries, a tree carries a private counter used by
/// [`Tree::add`] to hand out sequential integer keys (`"0"`, `"1"`, ...).
///
/// # Examples
///
/// ```rust
/// use kvs_format::Tree;
///
/// let mut tree = Tree::new();
/// tree.add("first");
/// tree.add("second");
///
/// // Iteration maintains insertion order
/// assert_eq!(tree.keys(), vec!["0", "1"]);
/// ```
#[derive(Debug, Default)]
pub struct Tree {
    entries: IndexMap<String, Entry>,
    auto_key: usize,
}

impl Tree {
    /// Creates an empty `Tree`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kvs_format::Tree;
    ///
    /// let tree = Tree::new();
    /// assert!(tree.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Tree::default()
    }

    /// Creates an empty `Tree` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Tree {
            entries: IndexMap::with_capacity(capacity),
            auto_key: 0,
        }
    }

    /// Inserts an entry at `key` on this level.
    ///
    /// If the key was already present its value is replaced in place (the
    /// key keeps its original position) and the old entry is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kvs_format::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert!(tree.insert("key", "1").is_none());
    /// assert!(tree.insert("key", "2").is_some());
    /// ```
    pub fn insert<K, V>(&mut self, key: K, value: V) -> Option<Entry>
    where
        K: Into<String>,
        V: Into<Entry>,
    {
        self.entries.insert(key.into(), value.into())
    }

    /// Returns the entry stored directly under `key` on this level.
    #[must_use]
    pub fn entry(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    pub(crate) fn entry_mut(&mut self, key: &str) -> Option<&mut Entry> {
        self.entries.get_mut(key)
    }

    /// Removes `key` from this level, keeping the order of the remaining entries.
    pub(crate) fn remove_key(&mut self, key: &str) -> Option<Entry> {
        self.entries.shift_remove(key)
    }

    /// Returns `true` if `key` is present on this level.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the number of entries on this level. Entries inside
    /// children are not counted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the tree contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns a snapshot of this level's keys, in insertion order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Returns a snapshot of this level's entries, in insertion order.
    #[must_use]
    pub fn values(&self) -> Vec<Entry> {
        self.entries.values().cloned().collect()
    }

    /// Returns an iterator over the key/entry pairs of this level, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Entry> {
        self.entries.iter()
    }

    /// Returns the first inserted key/entry pair, if any.
    #[must_use]
    pub fn first(&self) -> Option<(&String, &Entry)> {
        self.entries.first()
    }

    /// Returns the first inserted key, or an empty string if the tree is empty.
    #[must_use]
    pub fn first_key(&self) -> String {
        self.first().map(|(k, _)| k.clone()).unwrap_or_default()
    }

    /// Returns the first inserted entry, or an empty leaf if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kvs_format::{Entry, Tree};
    ///
    /// let tree = Tree::new();
    /// assert_eq!(tree.first_value(), Entry::Leaf(String::new()));
    /// ```
    #[must_use]
    pub fn first_value(&self) -> Entry {
        self.first().map(|(_, v)| v.clone()).unwrap_or_default()
    }

    /// Empties the tree in place and restarts auto-key numbering.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.auto_key = 0;
    }

    /// Appends a value under the next free auto-key.
    ///
    /// Keys are sequential integers rendered as text. Keys already taken by
    /// other entries are skipped, so `add` never overwrites.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kvs_format::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.set("taken", &["0"]);
    /// tree.add("a").add("b");
    ///
    /// assert_eq!(tree.keys(), vec!["0", "1", "2"]);
    /// assert_eq!(tree.get(&["1"]), "a");
    /// ```
    pub fn add<V: Into<Entry>>(&mut self, value: V) -> &mut Self {
        let mut key = self.auto_key.to_string();
        while self.entries.contains_key(&key) {
            self.auto_key += 1;
            key = self.auto_key.to_string();
        }
        self.entries.insert(key, value.into());
        self.auto_key += 1;
        self
    }

    /// Calls [`Tree::add`] for every value in order.
    pub fn add_all<I, V>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Entry>,
    {
        for value in values {
            self.add(value);
        }
        self
    }

    /// Parses `text` leniently into this tree.
    ///
    /// Top-level keys in `text` overwrite existing keys of the same name;
    /// all other existing entries are kept.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kvs_format::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.set("1", &["a"]).set("2", &["b"]);
    /// tree.read_str("b=3;c=4;");
    ///
    /// assert_eq!(tree.to_string(), "a=1;b=3;c=4;");
    /// ```
    pub fn read_str(&mut self, text: &str) -> &mut Self {
        Parser::new(text).parse_into(self);
        self
    }
}

// Clone, PartialEq and Drop walk nested levels with an explicit stack, so a
// tree of any depth can be copied, compared and freed.

/// A level being copied: its remaining source entries and the copy so far.
struct CloneFrame<'a> {
    source: indexmap::map::Iter<'a, String, Entry>,
    copy: Tree,
    key: Option<&'a String>,
}

impl<'a> CloneFrame<'a> {
    fn new(tree: &'a Tree, key: Option<&'a String>) -> Self {
        CloneFrame {
            source: tree.entries.iter(),
            copy: Tree {
                entries: IndexMap::with_capacity(tree.entries.len()),
                auto_key: tree.auto_key,
            },
            key,
        }
    }
}

impl Clone for Tree {
    /// Deep copy. The copy shares nothing with the original.
    fn clone(&self) -> Self {
        let mut stack = vec![CloneFrame::new(self, None)];

        while let Some(top) = stack.last_mut() {
            match top.source.next() {
                Some((key, Entry::Leaf(text))) => {
                    top.copy.entries.insert(key.clone(), Entry::Leaf(text.clone()));
                }
                Some((key, Entry::Child(child))) => stack.push(CloneFrame::new(child, Some(key))),
                None => {
                    let Some(done) = stack.pop() else {
                        break;
                    };
                    match (stack.last_mut(), done.key) {
                        (Some(parent), Some(key)) => {
                            parent.copy.entries.insert(key.clone(), Entry::Child(done.copy));
                        }
                        _ => return done.copy,
                    }
                }
            }
        }
        Tree::new()
    }
}

impl PartialEq for Tree {
    /// Trees are equal when they hold the same entries in the same order.
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];

        while let Some((left, right)) = pending.pop() {
            if left.entries.len() != right.entries.len() {
                return false;
            }
            for ((left_key, left_entry), (right_key, right_entry)) in
                left.entries.iter().zip(right.entries.iter())
            {
                if left_key != right_key {
                    return false;
                }
                match (left_entry, right_entry) {
                    (Entry::Leaf(a), Entry::Leaf(b)) if a == b => {}
                    (Entry::Child(a), Entry::Child(b)) => pending.push((a, b)),
                    _ => return false,
                }
            }
        }
        true
    }
}

impl Drop for Tree {
    fn drop(&mut self) {
        fn detach_children(tree: &mut Tree, pending: &mut Vec<Tree>) {
            for (_, entry) in tree.entries.drain(..) {
                if let Entry::Child(child) = entry {
                    pending.push(child);
                }
            }
        }

        let mut pending = Vec::new();
        detach_children(self, &mut pending);
        while let Some(mut tree) = pending.pop() {
            detach_children(&mut tree, &mut pending);
        }
    }
}

impl Eq for Tree {}

/// Compact KVS text.
impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::ser::Serializer::new(crate::KvsOptions::default()).serialize(self))
    }
}

/// Lenient parse; never fails.
impl FromStr for Tree {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Parser::new(s).parse_lenient())
    }
}

impl IntoIterator for Tree {
    type Item = (String, Entry);
    type IntoIter = indexmap::map::IntoIter<String, Entry>;

    fn into_iter(mut self) -> Self::IntoIter {
        std::mem::take(&mut self.entries).into_iter()
    }
}

impl<'a> IntoIterator for &'a Tree {
    type Item = (&'a String, &'a Entry);
    type IntoIter = indexmap::map::Iter<'a, String, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K: Into<String>, V: Into<Entry>> FromIterator<(K, V)> for Tree {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut tree = Tree::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Into<String>, V: Into<Entry>> Extend<(K, V)> for Tree {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl Serialize for Tree {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Tree {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;

        match Entry::deserialize(deserializer)? {
            Entry::Child(tree) => Ok(tree),
            Entry::Leaf(text) => Err(D::Error::custom(format!(
                "expected a map or sequence, found text {text:?}"
            ))),
        }
    }
}
