//! KVS Format Reference
//!
//! This module documents the KVS text format as implemented by this library.
//! It contains no code.
//!
//! # Overview
//!
//! KVS is a compact, line-free serialization format for ordered key/value
//! trees. All values are text; there is no numeric typing, no comments and
//! no quoting. Whitespace and newlines carry no meaning except inside values.
//!
//! # Grammar
//!
//! ```text
//! document   := entry*
//! entry      := key? ('~' metadata)? '=' (value | struct)
//!             | key? '[' document ']'
//! struct     := '[' document ']'
//! value      := (char | ';;')* ';'
//! metadata   := char*          # discarded
//! key        := char*          # whitespace-trimmed; empty -> auto index
//! ```
//!
//! ## Reserved Characters
//!
//! | Char | Role | Inside a value |
//! |------|------|----------------|
//! | `=` | ends a key | literal |
//! | `;` | ends a value | write `;;` for a literal `;` |
//! | `[` | starts a nested structure | structural (not escapable) |
//! | `]` | ends a nested structure | structural (not escapable) |
//! | `~` | starts a metadata segment | structural (not escapable) |
//!
//! `;` is the only escapable character. A value containing `[`, `]` or `~`
//! cannot be written losslessly.
//!
//! # Entries
//!
//! ```text
//! name=Alice;
//! age=30;
//! note=a;;b;            # value "a;b"
//! name~string=Alice;    # metadata "string" is discarded
//! ```
//!
//! # Nested Structures
//!
//! ```text
//! tags[0=admin;1=eng;]
//! tags=[0=admin;1=eng;]  # '=' before '[' is optional
//! ```
//!
//! # Auto-Keys
//!
//! A blank key is replaced by the next integer of the current structure's
//! own counter, starting at `0`. Each nesting level counts separately.
//!
//! ```text
//! =a;=b;[=c;]    # keys "0", "1", "2"; the child holds "0"
//! ```
//!
//! Explicit keys do not advance the counter, and a later auto-key may
//! overwrite an explicit numeric key with the same text.
//!
//! # Pretty Output
//!
//! Pretty output places every key on its own line, indented once per
//! nesting level, and pads after each leaf:
//!
//! ```text
//! name=Alice;
//! tags[
//!     0=admin;
//!     1=eng;
//! ]
//! ```
//!
//! The added whitespace only ever lands in key positions, where it is
//! trimmed, so compact and pretty output parse to the same tree.
//!
//! # Malformed Input
//!
//! The default parser never fails:
//!
//! | Input | Lenient result | Strict error |
//! |-------|----------------|--------------|
//! | value without `;` at end of input | committed | `UnterminatedValue` |
//! | value without `;` before `]` | dropped | `UnterminatedValue` |
//! | `[` never closed | open structures closed at end of input | `UnterminatedStruct` |
//! | `]` at top level | parsing stops | `UnexpectedStructEnd` |
//! | `[` after a partial value | value dropped, structure parsed | `UnexpectedStructStart` |
//! | key without `=` at end of input | dropped | none |
