//! Path-based access to nested trees.
//!
//! Every operation here takes a path: a slice of keys walked from the tree
//! it is called on. A path never fails loudly. A missing segment, or a
//! segment that lands on a leaf while more keys remain, simply yields an
//! empty result or a no-op.
//!
//! | Operation | Mutates | Missing path |
//! |-----------|---------|--------------|
//! | [`Tree::get`], [`Tree::get_entry`], [`Tree::exists`] | no | `""` / `None` / `false` |
//! | [`Tree::get_or_create`] | yes (vivifies) | empty children are created |
//! | [`Tree::set`], [`Tree::set_default`] | yes | intermediate children are created |
//! | [`Tree::remove`] | yes | no-op |
//!
//! ## Examples
//!
//! ```rust
//! use kvs_format::Tree;
//!
//! let mut tree = Tree::new();
//! tree.set("Alice", &["user", "name"]);
//!
//! assert_eq!(tree.get(&["user", "name"]), "Alice");
//! assert!(tree.exists(&["user"]));
//! assert!(!tree.exists(&["user", "name", "first"]));
//!
//! tree.remove(&["user", "name"]);
//! assert_eq!(tree.get(&["user", "name"]), "");
//! ```

use crate::{Entry, Tree};
use indexmap::IndexMap;
use std::str::FromStr;

impl Tree {
    /// Returns the text at `path`, or an empty string.
    ///
    /// The result is an owned copy; it never aliases the tree. Absence,
    /// a child at the end of the path, and an existing empty leaf all
    /// read as `""`. Use [`Tree::exists`] or [`Tree::get_entry`] to tell
    /// them apart.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kvs_format::parse;
    ///
    /// let tree = parse("a[b=1;]");
    /// assert_eq!(tree.get(&["a", "b"]), "1");
    /// assert_eq!(tree.get(&["a", "b", "c"]), "");
    /// assert_eq!(tree.get(&["missing"]), "");
    /// ```
    #[must_use]
    pub fn get<K: AsRef<str>>(&self, path: &[K]) -> String {
        match self.get_entry(path) {
            Some(Entry::Leaf(text)) => text.clone(),
            Some(Entry::Child(_)) | None => String::new(),
        }
    }

    /// Returns the raw entry at `path`, borrowed immutably.
    ///
    /// An empty path yields `None`.
    #[must_use]
    pub fn get_entry<K: AsRef<str>>(&self, path: &[K]) -> Option<&Entry> {
        let (last, parents) = path.split_last()?;
        let mut level = self;
        for key in parents {
            level = level.entry(key.as_ref())?.as_tree()?;
        }
        level.entry(last.as_ref())
    }

    /// Returns `true` if `path` resolves to a leaf or a child.
    #[must_use]
    pub fn exists<K: AsRef<str>>(&self, path: &[K]) -> bool {
        self.get_entry(path).is_some()
    }

    /// Reads the leaf at `path` and parses it, ignoring surrounding whitespace.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kvs_format::parse;
    ///
    /// let tree = parse("port=8080;ratio= 0.5 ;name=x;");
    /// assert_eq!(tree.get_parsed::<u16, _>(&["port"]), Some(8080));
    /// assert_eq!(tree.get_parsed::<f64, _>(&["ratio"]), Some(0.5));
    /// assert_eq!(tree.get_parsed::<i32, _>(&["name"]), None);
    /// ```
    #[must_use]
    pub fn get_parsed<T: FromStr, K: AsRef<str>>(&self, path: &[K]) -> Option<T> {
        self.get_entry(path)?.as_str()?.trim().parse().ok()
    }

    /// Like [`Tree::get_parsed`], falling back to `default`.
    #[must_use]
    pub fn get_or<T: FromStr, K: AsRef<str>>(&self, default: T, path: &[K]) -> T {
        self.get_parsed(path).unwrap_or(default)
    }

    /// Reads `path` as a list of texts.
    ///
    /// A leaf gives a one-element list, a child gives the text of its
    /// immediate leaves in order, and a missing path gives an empty list.
    /// An empty path lists this tree's own leaves.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kvs_format::parse;
    ///
    /// let tree = parse("one=Peter;many[=Peter;=John;=Kyle;]");
    /// assert_eq!(tree.get_list(&["one"]), vec!["Peter"]);
    /// assert_eq!(tree.get_list(&["many"]), vec!["Peter", "John", "Kyle"]);
    /// assert!(tree.get_list(&["none"]).is_empty());
    /// ```
    #[must_use]
    pub fn get_list<K: AsRef<str>>(&self, path: &[K]) -> Vec<String> {
        let tree = if path.is_empty() {
            self
        } else {
            match self.get_entry(path) {
                Some(Entry::Leaf(text)) => return vec![text.clone()],
                Some(Entry::Child(tree)) => tree,
                None => return Vec::new(),
            }
        };
        tree.iter()
            .filter_map(|(_, entry)| entry.as_str())
            .map(str::to_string)
            .collect()
    }

    /// Reads `path` as a flat key/text map.
    ///
    /// Nested children are rendered as compact KVS text. A leaf gives a
    /// single entry under the empty key; a missing path gives an empty map.
    #[must_use]
    pub fn get_map<K: AsRef<str>>(&self, path: &[K]) -> IndexMap<String, String> {
        let tree = if path.is_empty() {
            self
        } else {
            match self.get_entry(path) {
                Some(Entry::Leaf(text)) => {
                    return IndexMap::from([(String::new(), text.clone())]);
                }
                Some(Entry::Child(tree)) => tree,
                None => return IndexMap::new(),
            }
        };
        tree.iter()
            .map(|(key, entry)| (key.clone(), entry.to_string()))
            .collect()
    }

    /// Read or vivify: returns the child tree at `path`, creating empty
    /// children for every missing segment.
    ///
    /// This mutates the receiver even when used only to read. If a segment
    /// already holds a leaf, the leaf is left untouched and `None` is
    /// returned; segments created before that point stay created. An empty
    /// path returns the receiver itself.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kvs_format::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.get_or_create(&["a", "b"]).unwrap().add("x");
    /// assert_eq!(tree.get(&["a", "b", "0"]), "x");
    ///
    /// tree.set("leaf", &["l"]);
    /// assert!(tree.get_or_create(&["l", "deeper"]).is_none());
    /// assert_eq!(tree.get(&["l"]), "leaf");
    /// ```
    pub fn get_or_create<K: AsRef<str>>(&mut self, path: &[K]) -> Option<&mut Tree> {
        let mut level = self;
        for key in path {
            let key = key.as_ref();
            if !level.contains_key(key) {
                level.insert(key, Tree::new());
            }
            level = level.entry_mut(key)?.as_tree_mut()?;
        }
        Some(level)
    }

    /// Stores `value` at `path`, creating intermediate children as needed
    /// and replacing whatever the final key held.
    ///
    /// If an intermediate segment is a leaf nothing is stored. An empty
    /// path is a no-op.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kvs_format::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.set("1", &["a", "b"]).set("2", &["a", "c"]);
    /// assert_eq!(tree.to_string(), "a[b=1;c=2;]");
    ///
    /// // Replaces a child with a leaf
    /// tree.set("flat", &["a"]);
    /// assert_eq!(tree.to_string(), "a=flat;");
    /// ```
    pub fn set<V: Into<Entry>, K: AsRef<str>>(&mut self, value: V, path: &[K]) -> &mut Self {
        if let Some((last, parents)) = path.split_last() {
            match self.get_or_create(parents) {
                Some(level) => {
                    level.insert(last.as_ref(), value);
                }
                None => tracing::trace!(
                    key = last.as_ref(),
                    "set skipped: a leaf blocks the path"
                ),
            }
        }
        self
    }

    /// Like [`Tree::set`], but keeps an existing value at the final key.
    pub fn set_default<V: Into<Entry>, K: AsRef<str>>(
        &mut self,
        value: V,
        path: &[K],
    ) -> &mut Self {
        if let Some((last, parents)) = path.split_last() {
            if let Some(level) = self.get_or_create(parents) {
                if !level.contains_key(last.as_ref()) {
                    level.insert(last.as_ref(), value);
                }
            }
        }
        self
    }

    /// Removes and returns the entry at `path`.
    ///
    /// Stops silently if any intermediate segment is missing or is a leaf;
    /// removing a missing key is a no-op.
    pub fn remove<K: AsRef<str>>(&mut self, path: &[K]) -> Option<Entry> {
        let (last, parents) = path.split_last()?;
        let mut level = self;
        for key in parents {
            level = level.entry_mut(key.as_ref())?.as_tree_mut()?;
        }
        level.remove_key(last.as_ref())
    }

    /// Merges `other` into this tree.
    ///
    /// Where both sides hold a child under the same key the children are
    /// merged recursively. Everywhere else `other`'s entry replaces the
    /// receiver's. Keys only present in the receiver are kept.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kvs_format::parse;
    ///
    /// let mut base = parse("a[y=2;]keep=1;");
    /// base.merge(parse("a[x=1;]"));
    /// assert_eq!(base.to_string(), "a[y=2;x=1;]keep=1;");
    /// ```
    pub fn merge(&mut self, other: Tree) -> &mut Self {
        // Children merged into are taken out of their parent, filled, then
        // put back under the same key, so the walk needs no recursion.
        struct Frame {
            target: Tree,
            source: indexmap::map::IntoIter<String, Entry>,
            key: String,
        }

        let mut stack = vec![Frame {
            target: std::mem::take(self),
            source: other.into_iter(),
            key: String::new(),
        }];

        while let Some(top) = stack.last_mut() {
            match top.source.next() {
                Some((key, Entry::Child(theirs))) => match top.target.entry_mut(&key) {
                    Some(Entry::Child(mine)) => {
                        let target = std::mem::take(mine);
                        stack.push(Frame {
                            target,
                            source: theirs.into_iter(),
                            key,
                        });
                    }
                    _ => {
                        top.target.insert(key, theirs);
                    }
                },
                Some((key, leaf)) => {
                    top.target.insert(key, leaf);
                }
                None => {
                    let Some(done) = stack.pop() else {
                        break;
                    };
                    match stack.last_mut() {
                        Some(parent) => {
                            parent.target.insert(done.key, done.target);
                        }
                        None => *self = done.target,
                    }
                }
            }
        }
        self
    }
}
