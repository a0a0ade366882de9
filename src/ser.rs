//! KVS serialization.
//!
//! This module provides the [`Serializer`] that walks a [`Tree`] in
//! insertion order and writes KVS text.
//!
//! ## Overview
//!
//! - **Leaves** are written as `key=value;` with every `;` in the value doubled
//! - **Children** are written as `key[` ... `]`
//! - **Pretty mode** adds newlines and indentation in key positions only,
//!   so the parsed data is unchanged
//! - **Wrapping** labels the whole document as `wrap[` ... `]`
//!
//! ## Usage
//!
//! Most users should use the functions in the crate root:
//!
//! ```rust
//! use kvs_format::{parse, to_string, to_string_pretty};
//!
//! let tree = parse("a=1;b[c=2;]");
//!
//! assert_eq!(to_string(&tree), "a=1;b[c=2;]");
//! assert_eq!(to_string_pretty(&tree), "a=1;\t\nb[\n\tc=2;\t\n]");
//! ```
//!
//! ## Direct Serializer Usage
//!
//! ```rust
//! use kvs_format::{KvsOptions, Serializer, Tree};
//!
//! let mut tree = Tree::new();
//! tree.add("x").add("y");
//!
//! let mut serializer = Serializer::new(KvsOptions::new().with_implicit_keys(true));
//! serializer.write_tree(&tree);
//! assert_eq!(serializer.into_inner(), "=x;=y;");
//! ```

use crate::{Entry, KvsOptions, Tree};

const STRUCT_KEY_COLOUR: &str = "\x1b[0;36m";
const LEAF_KEY_COLOUR: &str = "\x1b[0;97m";
const VALUE_COLOUR: &str = "\x1b[0;35m";
const NO_COLOUR: &str = "\x1b[0m";

/// The KVS serializer.
///
/// Created via [`Serializer::new`] with customizable options. Nesting depth
/// is tracked while walking the tree and only drives indentation.
pub struct Serializer {
    output: String,
    options: KvsOptions,
    depth: usize,
}

impl Serializer {
    pub fn new(options: KvsOptions) -> Self {
        Serializer {
            output: String::with_capacity(256),
            options,
            depth: 0,
        }
    }

    /// Serializes `tree` and returns the text.
    pub fn serialize(mut self, tree: &Tree) -> String {
        self.write_tree(tree);
        self.into_inner()
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Appends `tree` as a top-level document, applying the wrap option.
    pub fn write_tree(&mut self, tree: &Tree) {
        tracing::trace!(
            entries = tree.len(),
            pretty = self.options.pretty,
            wrap = self.options.wrap.as_deref(),
            "serializing KVS document"
        );

        match self.options.wrap.clone() {
            Some(wrap) => {
                self.write_key(&wrap, STRUCT_KEY_COLOUR);
                self.output.push('[');
                self.depth += 1;
                self.write_level(tree);
                self.depth -= 1;
                self.write_closing(tree);
            }
            None => self.write_level(tree),
        }
    }

    /// Writes every entry of `tree`, descending into children.
    ///
    /// Open children are kept on an explicit stack of `(entries, tree,
    /// auto_index)` frames, so output depth is not limited by the call stack.
    fn write_level(&mut self, tree: &Tree) {
        let mut stack = vec![(tree.iter(), tree, 0usize)];

        while let Some((entries, _, auto_index)) = stack.last_mut() {
            let Some((key, entry)) = entries.next() else {
                if let Some((_, done, _)) = stack.pop() {
                    if !stack.is_empty() {
                        self.depth -= 1;
                        self.write_closing(done);
                    }
                }
                continue;
            };

            self.write_newline();
            let key = if self.options.implicit_keys && *key == auto_index.to_string() {
                *auto_index += 1;
                ""
            } else {
                key.as_str()
            };

            match entry {
                Entry::Leaf(text) => {
                    self.write_key(key, LEAF_KEY_COLOUR);
                    self.output.push('=');
                    self.write_value(text);
                    self.output.push(';');
                    if self.options.pretty {
                        self.output.push_str(&self.options.indent);
                    }
                }
                Entry::Child(child) => {
                    self.write_key(key, STRUCT_KEY_COLOUR);
                    self.output.push('[');
                    self.depth += 1;
                    stack.push((child.iter(), child, 0));
                }
            }
        }
    }

    fn write_closing(&mut self, tree: &Tree) {
        if !tree.is_empty() {
            self.write_newline();
        }
        self.output.push(']');
    }

    /// Newline plus one indent unit per level. Nothing before the first token.
    fn write_newline(&mut self) {
        if self.options.pretty && !self.output.is_empty() {
            self.output.push('\n');
            for _ in 0..self.depth {
                self.output.push_str(&self.options.indent);
            }
        }
    }

    fn write_key(&mut self, key: &str, colour: &str) {
        if self.options.colour && !key.is_empty() {
            self.output.push_str(colour);
            self.output.push_str(key);
            self.output.push_str(NO_COLOUR);
        } else {
            self.output.push_str(key);
        }
    }

    #[inline]
    fn write_value(&mut self, text: &str) {
        let coloured = self.options.colour && !text.is_empty();
        if coloured {
            self.output.push_str(VALUE_COLOUR);
        }
        for ch in text.chars() {
            if ch == ';' {
                self.output.push_str(";;");
            } else {
                self.output.push(ch);
            }
        }
        if coloured {
            self.output.push_str(NO_COLOUR);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn serialize(tree: &Tree, options: KvsOptions) -> String {
        Serializer::new(options).serialize(tree)
    }

    #[test]
    fn test_compact_output() {
        let mut tree = Tree::new();
        tree.set("Alice", &["name"]);
        tree.set("admin", &["tags", "0"]);
        tree.set("eng", &["tags", "1"]);

        assert_eq!(
            serialize(&tree, KvsOptions::new()),
            "name=Alice;tags[0=admin;1=eng;]"
        );
    }

    #[test]
    fn test_semicolons_are_doubled() {
        let tree = parse("note=a;;b;");
        assert_eq!(serialize(&tree, KvsOptions::new()), "note=a;;b;");
    }

    #[test]
    fn test_empty_child() {
        let mut tree = Tree::new();
        tree.get_or_create(&["empty"]);
        assert_eq!(serialize(&tree, KvsOptions::new()), "empty[]");
        assert_eq!(serialize(&tree, KvsOptions::pretty()), "empty[]");
    }

    #[test]
    fn test_wrap() {
        let tree = parse("a=1;");
        assert_eq!(serialize(&tree, KvsOptions::new().with_wrap("doc")), "doc[a=1;]");
        assert_eq!(
            serialize(&tree, KvsOptions::pretty().with_wrap("doc")),
            "doc[\n\ta=1;\t\n]"
        );
    }

    #[test]
    fn test_pretty_nested_indentation() {
        let tree = parse("a[b[c=1;]]");
        assert_eq!(
            serialize(&tree, KvsOptions::pretty().with_indent("  ")),
            "a[\n  b[\n    c=1;  \n  ]\n]"
        );
    }

    #[test]
    fn test_pretty_parses_back_to_same_data() {
        let tree = parse("x=1;y[=a;=b;z[q=;;;]]w=2;");
        let pretty = serialize(&tree, KvsOptions::pretty());
        assert_eq!(parse(&pretty), tree);
    }

    #[test]
    fn test_implicit_keys() {
        let mut tree = Tree::new();
        tree.add("a");
        tree.set("b", &["name"]);
        tree.add("c");
        tree.get_or_create(&["5"]);

        let text = serialize(&tree, KvsOptions::new().with_implicit_keys(true));
        assert_eq!(text, "=a;name=b;=c;5[]");
        assert_eq!(parse(&text), tree);
    }

    #[test]
    fn test_colourful_output() {
        let tree = parse("name=Al;tags[=x;]");
        let text = serialize(&tree, KvsOptions::colourful().with_wrap("doc"));

        assert_eq!(
            text,
            "\x1b[0;36mdoc\x1b[0m[\n\t\x1b[0;97mname\x1b[0m=\x1b[0;35mAl\x1b[0m;\t\n\t\x1b[0;36mtags\x1b[0m[\n\t\t=\x1b[0;35mx\x1b[0m;\t\n\t]\n]"
        );
    }

    #[test]
    fn test_colour_off_by_default() {
        let tree = parse("a=1;");
        assert!(!serialize(&tree, KvsOptions::pretty()).contains('\x1b'));
    }

    #[test]
    fn test_deeply_nested_output() {
        let depth = 50_000;
        let tree = parse(&"[".repeat(depth));

        let text = serialize(&tree, KvsOptions::new());
        assert_eq!(text.len(), depth * 3);
        assert!(text.starts_with("0[0[") && text.ends_with("0[]]]"));
    }
}
