//! KVS parsing.
//!
//! This module provides the [`Parser`], a single-pass, character-driven
//! state machine that turns KVS text into a [`Tree`].
//!
//! ## Overview
//!
//! - **Single pass**: every character is looked at once, no backtracking
//! - **Nested structures**: `[` pushes a level onto an explicit stack and
//!   `]` pops it, so arbitrarily deep input never exhausts the call stack
//! - **Total by default**: malformed input is consumed best-effort and
//!   always yields a tree
//! - **Strict mode**: the same grammar, but structural problems are returned
//!   as [`Error`]s with line/column information
//!
//! ## Usage
//!
//! Most users should use the functions in the crate root:
//!
//! ```rust
//! use kvs_format::parse;
//!
//! let tree = parse("name=Alice;tags[=admin;=eng;]");
//! assert_eq!(tree.get(&["tags", "1"]), "eng");
//! ```
//!
//! Collecting the problems a lenient parse recovered from:
//!
//! ```rust
//! use kvs_format::de::Parser;
//!
//! let (tree, issues) = Parser::new("a=1;b[c=2;").parse_with_diagnostics();
//! assert_eq!(tree.get(&["b", "c"]), "2");
//! assert_eq!(issues.len(), 1);
//! ```

use crate::cursor::Cursor;
use crate::options::ParseMode;
use crate::{Error, Result, Tree};

const KEY_TERMINATOR: char = '=';
const VALUE_TERMINATOR: char = ';';
const STRUCT_START: char = '[';
const STRUCT_END: char = ']';
const METADATA_MARKER: char = '~';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    ReadingKey,
    ReadingValue,
    ReadingMetadata,
}

/// One open structure: the tree being filled plus its in-progress entry.
///
/// Levels live on an explicit stack, so nesting depth is bounded by heap
/// memory rather than the call stack.
struct Level {
    tree: Tree,
    /// Key the finished tree is stored under in the enclosing level.
    slot: String,
    state: State,
    key: String,
    value: String,
    auto_index: usize,
}

impl Level {
    fn new(tree: Tree, slot: String) -> Self {
        Level {
            tree,
            slot,
            state: State::ReadingKey,
            key: String::new(),
            value: String::new(),
            auto_index: 0,
        }
    }

    fn push_char(&mut self, ch: char) {
        match self.state {
            State::ReadingKey => self.key.push(ch),
            State::ReadingValue => self.value.push(ch),
            State::ReadingMetadata => {}
        }
    }

    /// Stores the pending value as a leaf and starts a new entry.
    fn commit_value(&mut self) {
        let key = resolve_key(&self.key, &mut self.auto_index);
        self.tree.insert(key, std::mem::take(&mut self.value));
        self.reset();
    }

    /// Resolves the key a nested structure opened here will be stored under.
    fn open_slot(&mut self) -> String {
        let slot = resolve_key(&self.key, &mut self.auto_index);
        self.value.clear();
        self.reset();
        slot
    }

    fn reset(&mut self) {
        self.key.clear();
        self.state = State::ReadingKey;
    }
}

/// The KVS parser.
///
/// Created via [`Parser::new`] (lenient) or [`Parser::with_mode`].
pub struct Parser<'a> {
    input: &'a str,
    mode: ParseMode,
    issues: Vec<Error>,
}

impl<'a> Parser<'a> {
    /// Creates a lenient parser over `input`.
    pub fn new(input: &'a str) -> Self {
        Self::with_mode(input, ParseMode::Lenient)
    }

    pub fn with_mode(input: &'a str, mode: ParseMode) -> Self {
        Parser {
            input,
            mode,
            issues: Vec::new(),
        }
    }

    /// Parses the whole input.
    ///
    /// In [`ParseMode::Lenient`] this never fails. In [`ParseMode::Strict`]
    /// the first structural problem found is returned.
    ///
    /// # Errors
    ///
    /// Strict mode only: see [`Error`] for the reported conditions.
    pub fn parse(self) -> Result<Tree> {
        let mode = self.mode;
        let (tree, mut issues) = self.parse_with_diagnostics();
        if mode == ParseMode::Strict && !issues.is_empty() {
            return Err(issues.swap_remove(0));
        }
        Ok(tree)
    }

    /// Parses the whole input and returns the tree together with every
    /// structural problem that was recovered from, in input order.
    pub fn parse_with_diagnostics(mut self) -> (Tree, Vec<Error>) {
        let mut tree = Tree::new();
        self.run(&mut tree);
        (tree, self.issues)
    }

    /// Lenient parse straight into an existing tree, overwriting colliding keys.
    pub(crate) fn parse_into(mut self, tree: &mut Tree) {
        self.run(tree);
    }

    pub(crate) fn parse_lenient(self) -> Tree {
        self.parse_with_diagnostics().0
    }

    /// Reads the whole input into `tree`.
    ///
    /// `[` pushes a `Level`, `]` pops it into its parent. At end of input
    /// every open level is folded back down into the root.
    fn run(&mut self, tree: &mut Tree) {
        let input = self.input;
        let mut cursor = Cursor::new();
        let mut levels = vec![Level::new(std::mem::take(tree), String::new())];
        let mut stopped_early = false;

        while let Some(ch) = cursor.peek(input) {
            let depth = levels.len().saturating_sub(1);
            let Some(level) = levels.last_mut() else {
                break;
            };

            match ch {
                KEY_TERMINATOR => match level.state {
                    State::ReadingKey | State::ReadingMetadata => level.state = State::ReadingValue,
                    State::ReadingValue => level.value.push(ch),
                },
                METADATA_MARKER => level.state = State::ReadingMetadata,
                VALUE_TERMINATOR => {
                    if cursor.peek_next(input) == Some(VALUE_TERMINATOR) {
                        cursor.advance(input);
                        level.value.push(VALUE_TERMINATOR);
                    } else {
                        level.commit_value();
                    }
                }
                STRUCT_START => {
                    if level.state == State::ReadingValue && !level.value.is_empty() {
                        self.flag(Error::unexpected_struct_start(cursor.line(), cursor.column()));
                    }
                    let slot = level.open_slot();
                    levels.push(Level::new(Tree::new(), slot));
                }
                STRUCT_END => {
                    if level.state == State::ReadingValue {
                        self.flag(Error::unterminated_value(
                            cursor.line(),
                            cursor.column(),
                            level.key.trim(),
                        ));
                    }
                    if depth == 0 {
                        self.flag(Error::unexpected_struct_end(cursor.line(), cursor.column()));
                        stopped_early = true;
                        break;
                    }
                    close_level(&mut levels);
                }
                _ => level.push_char(ch),
            }
            cursor.advance(input);
        }

        if !stopped_early {
            self.finish_input(&cursor, &mut levels);
        }
        while levels.len() > 1 {
            close_level(&mut levels);
        }
        if let Some(root) = levels.pop() {
            *tree = root.tree;
        }

        tracing::debug!(
            input_len = input.len(),
            consumed = cursor.position(),
            mode = ?self.mode,
            entries = tree.len(),
            issues = self.issues.len(),
            stopped_early,
            "parsed KVS document"
        );
    }

    /// End of input: commit a pending value and report open structures.
    fn finish_input(&mut self, cursor: &Cursor, levels: &mut [Level]) {
        let depth = levels.len().saturating_sub(1);
        let Some(level) = levels.last_mut() else {
            return;
        };

        // A value with no terminator is still committed.
        if level.state == State::ReadingValue {
            self.flag(Error::unterminated_value(
                cursor.line(),
                cursor.column(),
                level.key.trim(),
            ));
            level.commit_value();
        } else if !level.key.trim().is_empty() {
            tracing::trace!(key = level.key.trim(), "dropping key without value at end of input");
        }

        if depth > 0 {
            self.flag(Error::unterminated_struct(cursor.line(), cursor.column(), depth));
        }
    }

    fn flag(&mut self, issue: Error) {
        if self.mode == ParseMode::Lenient {
            tracing::debug!(%issue, "recovered from malformed KVS input");
        }
        self.issues.push(issue);
    }
}

/// Pops the innermost level and stores its tree in the enclosing one.
fn close_level(levels: &mut Vec<Level>) {
    if levels.len() < 2 {
        return;
    }
    if let Some(child) = levels.pop() {
        if let Some(parent) = levels.last_mut() {
            parent.tree.insert(child.slot, child.tree);
        }
    }
}

/// Trims the accumulated key, or hands out the level's next auto-key when blank.
fn resolve_key(raw: &str, auto_index: &mut usize) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        let key = auto_index.to_string();
        *auto_index += 1;
        key
    } else {
        trimmed.to_string()
    }
}
