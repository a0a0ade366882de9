//! Scan position for a single parse.
//!
//! A [`Cursor`] is created once per parse and walks the input exactly once.
//! Every nesting level reads through the same cursor, so when a nested
//! structure closes the enclosing level resumes exactly where it stopped.

/// Byte offset into the input plus the human-facing line/column of that offset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cursor {
    position: usize,
    line: usize,
    column: usize,
}

impl Cursor {
    /// Creates a cursor at the start of the input (line 1, column 1).
    #[must_use]
    pub fn new() -> Self {
        Cursor {
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Byte offset of the next unread character.
    #[inline]
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[inline]
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    #[inline]
    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }

    /// Returns the character under the cursor without consuming it.
    #[inline]
    pub fn peek(&self, input: &str) -> Option<char> {
        input.get(self.position..)?.chars().next()
    }

    /// Returns the character after the one under the cursor.
    #[inline]
    pub fn peek_next(&self, input: &str) -> Option<char> {
        let mut chars = input.get(self.position..)?.chars();
        chars.next()?;
        chars.next()
    }

    /// Moves past the character under the cursor. No-op at end of input.
    pub fn advance(&mut self, input: &str) {
        if let Some(ch) = self.peek(input) {
            self.position += ch.len_utf8();
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    #[inline]
    #[must_use]
    pub fn at_end(&self, input: &str) -> bool {
        self.position >= input.len()
    }
}
