//! # kvs_format
//!
//! Parser, serializer and path-based tree API for the KVS text format.
//!
//! ## What is KVS?
//!
//! KVS is a compact, line-free text format for ordered key/value trees:
//!
//! ```text
//! name=Alice;age=30;tags[0=admin;1=eng;]
//! ```
//!
//! Values are plain text terminated by `;` (written `;;` when the value
//! itself contains one), nested structures are wrapped in `[` ... `]`, and
//! blank keys are numbered automatically so unlabeled entries behave like
//! an array. See the [`format`] module for the full grammar.
//!
//! ## Key Features
//!
//! - **Ordered**: insertion order is kept through parsing, mutation and output
//! - **Total parser**: any input produces a tree; a strict mode reports problems
//! - **Path API**: get, set, remove, merge and vivify nested values by key path
//! - **Serde Compatible**: [`Tree`] converts to and from any serde format
//! - **No Unsafe Code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! ```rust
//! use kvs_format::{parse, to_string};
//!
//! let mut tree = parse("name=Alice;age=30;tags[0=admin;1=eng;]");
//!
//! assert_eq!(tree.get(&["name"]), "Alice");
//! assert_eq!(tree.get(&["tags", "1"]), "eng");
//!
//! tree.set("Cape Town", &["address", "city"]);
//! tree.get_or_create(&["tags"]).unwrap().add("ops");
//!
//! assert_eq!(
//!     to_string(&tree),
//!     "name=Alice;age=30;tags[0=admin;1=eng;2=ops;]address[city=Cape Town;]"
//! );
//! ```
//!
//! ### Escaping
//!
//! ```rust
//! use kvs_format::{parse, to_string};
//!
//! let tree = parse("note=a;;b;");
//! assert_eq!(tree.get(&["note"]), "a;b");
//! assert_eq!(to_string(&tree), "note=a;;b;");
//! ```
//!
//! ### Strict Parsing
//!
//! ```rust
//! use kvs_format::{parse, parse_strict, Error};
//!
//! // Lenient parsing keeps whatever it can
//! assert_eq!(parse("a[b=1;").get(&["a", "b"]), "1");
//!
//! // Strict parsing reports the problem
//! assert!(matches!(
//!     parse_strict("a[b=1;"),
//!     Err(Error::UnterminatedStruct { .. })
//! ));
//! ```
//!
//! ### Building Trees with the kvs! Macro
//!
//! ```rust
//! use kvs_format::kvs;
//!
//! let tree = kvs!({
//!     "name" => "Alice",
//!     "tags" => ["rust", "kvs"]
//! });
//! assert_eq!(tree.to_string(), "name=Alice;tags[0=rust;1=kvs;]");
//! ```
//!
//! ## Concurrency
//!
//! A [`Tree`] has no internal synchronization. It is `Send + Sync` like any
//! plain owned data; share one across threads behind a lock. Each parse
//! owns its cursor, so concurrent parses never interfere.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - parse, read, write back
//! - **`macro.rs`** - building trees with the kvs! macro
//! - **`nested_paths.rs`** - get/set/remove/merge on nested paths
//! - **`dynamic_values.rs`** - walking entries and serde conversion
//! - **`custom_options.rs`** - pretty printing, wrapping, implicit keys
//!
//! Run any example with: `cargo run --example <name>`

pub mod cursor;
pub mod de;
pub mod error;
pub mod format;
pub mod macros;
pub mod options;
pub mod path;
pub mod ser;
pub mod snapshot;
pub mod tree;
pub mod value;

pub use de::Parser;
pub use error::{Error, Result};
pub use options::{KvsOptions, ParseMode};
pub use ser::Serializer;
pub use snapshot::Snapshot;
pub use tree::Tree;
pub use value::Entry;

use std::io;

/// Parses KVS text into a [`Tree`].
///
/// Parsing is total: malformed input is consumed best-effort and never
/// fails. Use [`parse_strict`] to have structural problems reported.
///
/// # Examples
///
/// ```rust
/// use kvs_format::parse;
///
/// let tree = parse("name=Alice;age=30;");
/// assert_eq!(tree.keys(), vec!["name", "age"]);
/// ```
#[must_use]
pub fn parse(text: &str) -> Tree {
    Parser::new(text).parse_lenient()
}

/// Parses KVS text, rejecting structurally malformed input.
///
/// # Examples
///
/// ```rust
/// use kvs_format::parse_strict;
///
/// assert!(parse_strict("a=1;b[c=2;]").is_ok());
/// assert!(parse_strict("a=1;]").is_err());
/// ```
///
/// # Errors
///
/// Returns the first of [`Error::UnexpectedStructEnd`],
/// [`Error::UnexpectedStructStart`], [`Error::UnterminatedStruct`] or
/// [`Error::UnterminatedValue`] found in the input.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_strict(text: &str) -> Result<Tree> {
    Parser::with_mode(text, ParseMode::Strict).parse()
}

/// Serializes a tree to compact KVS text.
///
/// # Examples
///
/// ```rust
/// use kvs_format::{to_string, Tree};
///
/// let mut tree = Tree::new();
/// tree.set("1", &["x"]).set("2", &["y"]);
/// assert_eq!(to_string(&tree), "x=1;y=2;");
/// ```
#[must_use]
pub fn to_string(tree: &Tree) -> String {
    to_string_with_options(tree, &KvsOptions::default())
}

/// Serializes a tree to indented, human-readable KVS text.
///
/// The output parses back to the same tree as the compact form.
#[must_use]
pub fn to_string_pretty(tree: &Tree) -> String {
    to_string_with_options(tree, &KvsOptions::pretty())
}

/// Serializes a tree with custom options.
///
/// # Examples
///
/// ```rust
/// use kvs_format::{to_string_with_options, KvsOptions, Tree};
///
/// let mut tree = Tree::new();
/// tree.add("a").add("b");
///
/// let options = KvsOptions::new().with_wrap("list").with_implicit_keys(true);
/// assert_eq!(to_string_with_options(&tree, &options), "list[=a;=b;]");
/// ```
#[must_use]
pub fn to_string_with_options(tree: &Tree, options: &KvsOptions) -> String {
    Serializer::new(options.clone()).serialize(tree)
}

/// Serializes a tree as compact KVS text into a writer.
///
/// # Examples
///
/// ```rust
/// use kvs_format::{parse, to_writer};
///
/// let tree = parse("a=1;");
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &tree).unwrap();
/// assert_eq!(buffer, b"a=1;");
/// ```
///
/// # Errors
///
/// Returns an error if writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W>(writer: W, tree: &Tree) -> Result<()>
where
    W: io::Write,
{
    to_writer_with_options(writer, tree, &KvsOptions::default())
}

/// Serializes a tree into a writer with custom options.
///
/// # Errors
///
/// Returns an error if writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W>(mut writer: W, tree: &Tree, options: &KvsOptions) -> Result<()>
where
    W: io::Write,
{
    let text = to_string_with_options(tree, options);
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Reads all of `reader` and parses it leniently.
///
/// # Examples
///
/// ```rust
/// use kvs_format::from_reader;
/// use std::io::Cursor;
///
/// let tree = from_reader(Cursor::new(b"a=1;b[c=2;]")).unwrap();
/// assert_eq!(tree.get(&["b", "c"]), "2");
/// ```
///
/// # Errors
///
/// Returns an error if reading fails or the input is not valid UTF-8.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(mut reader: R) -> Result<Tree>
where
    R: io::Read,
{
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    Ok(parse(&text))
}

/// Reads at most `item_count` top-level entries from `reader` and parses
/// them leniently.
///
/// Reading stops right after the last requested entry, leaving anything
/// that follows unread in `reader`, so several documents written back to
/// back (for example with [`KvsOptions::with_wrap`]) can be read one at a
/// time. A structure counts as one entry. Returns the tree and the number
/// of complete entries read.
///
/// # Examples
///
/// ```rust
/// use kvs_format::from_reader_items;
///
/// let mut stream: &[u8] = b"first[a=1;]second[b=2;]";
/// let (tree, count) = from_reader_items(&mut stream, 1).unwrap();
///
/// assert_eq!(count, 1);
/// assert_eq!(tree.get(&["first", "a"]), "1");
/// assert_eq!(stream, b"second[b=2;]");
/// ```
///
/// # Errors
///
/// Returns an error if reading fails, if the entries read are not valid
/// UTF-8, or if the stream ends before a single entry was read.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader_items<R>(mut reader: R, item_count: usize) -> Result<(Tree, usize)>
where
    R: io::BufRead,
{
    let (bytes, count) = read_items(&mut reader, item_count)?;
    if count == 0 && item_count > 0 {
        return Err(Error::io("stream ended before any entry was read"));
    }
    let text = String::from_utf8(bytes).map_err(Error::custom)?;
    tracing::debug!(
        requested = item_count,
        read = count,
        bytes = text.len(),
        "read KVS entries from stream"
    );
    Ok((parse(&text), count))
}

/// Collects the bytes of up to `item_count` top-level entries.
///
/// Only the structural bytes are tracked: bracket depth, and `;` at the top
/// level (a doubled `;;` is an escape, not a terminator). All of them are
/// ASCII, so multi-byte UTF-8 sequences pass through untouched.
fn read_items<R: io::BufRead>(reader: &mut R, item_count: usize) -> Result<(Vec<u8>, usize)> {
    let mut bytes = Vec::new();
    let mut count = 0;
    let mut depth = 0usize;

    while count < item_count {
        let Some(byte) = next_byte(reader)? else {
            break;
        };
        bytes.push(byte);
        match byte {
            b'[' => depth += 1,
            b']' if depth == 0 => break,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    count += 1;
                }
            }
            b';' if depth == 0 => {
                if peek_byte(reader)? == Some(b';') {
                    reader.consume(1);
                    bytes.push(b';');
                } else {
                    count += 1;
                }
            }
            _ => {}
        }
    }
    Ok((bytes, count))
}

fn peek_byte<R: io::BufRead>(reader: &mut R) -> io::Result<Option<u8>> {
    loop {
        match reader.fill_buf() {
            Ok(buffer) => return Ok(buffer.first().copied()),
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(err) => return Err(err),
        }
    }
}

fn next_byte<R: io::BufRead>(reader: &mut R) -> io::Result<Option<u8>> {
    let byte = peek_byte(reader)?;
    if byte.is_some() {
        reader.consume(1);
    }
    Ok(byte)
}

/// Parses KVS text from bytes, leniently.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(bytes: &[u8]) -> Result<Tree> {
    let text = std::str::from_utf8(bytes).map_err(Error::custom)?;
    Ok(parse(text))
}
