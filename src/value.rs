//! The entry type stored at every key of a [`Tree`].
//!
//! A KVS document only knows two kinds of values: plain text and nested
//! structures. [`Entry`] is the tagged union over those two, matched
//! exhaustively wherever the tree is traversed.
//!
//! ## Creating Entries
//!
//! ```rust
//! use kvs_format::{Entry, Tree};
//!
//! let leaf = Entry::from("hello");
//! let child = Entry::from(Tree::new());
//!
//! assert!(leaf.is_leaf());
//! assert!(child.is_child());
//! ```
//!
//! ## Extracting Values
//!
//! ```rust
//! use kvs_format::Entry;
//!
//! let entry = Entry::from("42");
//! assert_eq!(entry.as_str(), Some("42"));
//! assert!(entry.as_tree().is_none());
//! ```

use crate::Tree;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A value stored in a [`Tree`]: either a text leaf or an owned child tree.
///
/// # Examples
///
/// ```rust
/// use kvs_format::{Entry, Tree};
///
/// let mut inner = Tree::new();
/// inner.set("1", &["x"]);
///
/// match Entry::Child(inner) {
///     Entry::Leaf(text) => println!("text: {text}"),
///     Entry::Child(tree) => assert_eq!(tree.get(&["x"]), "1"),
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Entry {
    Leaf(String),
    Child(Tree),
}

impl Entry {
    /// Returns `true` if the entry holds text.
    #[inline]
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Entry::Leaf(_))
    }

    /// Returns `true` if the entry holds a nested tree.
    #[inline]
    #[must_use]
    pub const fn is_child(&self) -> bool {
        matches!(self, Entry::Child(_))
    }

    /// If the entry is a leaf, returns its text. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Entry::Leaf(s) => Some(s),
            Entry::Child(_) => None,
        }
    }

    /// If the entry is a child, returns a reference to the tree. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_tree(&self) -> Option<&Tree> {
        match self {
            Entry::Leaf(_) => None,
            Entry::Child(tree) => Some(tree),
        }
    }

    /// If the entry is a child, returns a mutable reference to the tree.
    #[inline]
    pub fn as_tree_mut(&mut self) -> Option<&mut Tree> {
        match self {
            Entry::Leaf(_) => None,
            Entry::Child(tree) => Some(tree),
        }
    }

    /// Consumes the entry, returning the tree if it was a child.
    #[must_use]
    pub fn into_tree(self) -> Option<Tree> {
        match self {
            Entry::Leaf(_) => None,
            Entry::Child(tree) => Some(tree),
        }
    }
}

impl Default for Entry {
    fn default() -> Self {
        Entry::Leaf(String::new())
    }
}

/// Leaves display as their raw text, children as compact KVS text.
impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Leaf(s) => f.write_str(s),
            Entry::Child(tree) => write!(f, "{tree}"),
        }
    }
}

impl From<&str> for Entry {
    fn from(value: &str) -> Self {
        Entry::Leaf(value.to_string())
    }
}

impl From<String> for Entry {
    fn from(value: String) -> Self {
        Entry::Leaf(value)
    }
}

impl From<&String> for Entry {
    fn from(value: &String) -> Self {
        Entry::Leaf(value.clone())
    }
}

impl From<Tree> for Entry {
    fn from(value: Tree) -> Self {
        Entry::Child(value)
    }
}

impl PartialEq<str> for Entry {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for Entry {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl Serialize for Entry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Entry::Leaf(s) => serializer.serialize_str(s),
            Entry::Child(tree) => tree.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Entry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct EntryVisitor;

        // Scalars are stored as text; sequences become auto-keyed children.
        impl<'de> Visitor<'de> for EntryVisitor {
            type Value = Entry;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string, scalar, sequence or map")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(Entry::Leaf(value.to_string()))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Entry::Leaf(value.to_string()))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                Ok(Entry::Leaf(value.to_string()))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Entry::Leaf(value.to_string()))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Entry::Leaf(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Entry::Leaf(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(Entry::Leaf(String::new()))
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(Entry::Leaf(String::new()))
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut tree = Tree::new();
                while let Some(elem) = seq.next_element::<Entry>()? {
                    tree.add(elem);
                }
                Ok(Entry::Child(tree))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut tree = Tree::new();
                while let Some((key, value)) = map.next_entry::<String, Entry>()? {
                    tree.insert(key, value);
                }
                Ok(Entry::Child(tree))
            }
        }

        deserializer.deserialize_any(EntryVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_checks() {
        let leaf = Entry::from("text");
        assert!(leaf.is_leaf());
        assert!(!leaf.is_child());
        assert_eq!(leaf.as_str(), Some("text"));
        assert!(leaf.as_tree().is_none());

        let child = Entry::from(Tree::new());
        assert!(child.is_child());
        assert!(child.as_str().is_none());
        assert!(child.into_tree().is_some());
    }

    #[test]
    fn test_display() {
        assert_eq!(Entry::from("a;b").to_string(), "a;b");

        let mut tree = Tree::new();
        tree.set("1", &["x"]);
        assert_eq!(Entry::Child(tree).to_string(), "x=1;");
    }

    #[test]
    fn test_default_is_empty_leaf() {
        assert_eq!(Entry::default(), Entry::Leaf(String::new()));
    }

    #[test]
    fn test_compare_with_str() {
        assert_eq!(Entry::from("abc"), "abc");
        assert_ne!(Entry::from(Tree::new()), "abc");
    }
}
