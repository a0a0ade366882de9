//! Error types for KVS parsing and I/O.
//!
//! The default parser is total: any input produces a [`Tree`](crate::Tree)
//! and never an error. Errors only surface from:
//!
//! - **Strict parsing** ([`parse_strict`](crate::parse_strict)), which reports
//!   structural problems with line/column information
//! - **I/O helpers** ([`from_reader`](crate::from_reader), [`to_writer`](crate::to_writer))
//! - **Serde conversions** of [`Tree`](crate::Tree) and [`Entry`](crate::Entry)
//!
//! ## Examples
//!
//! ```rust
//! use kvs_format::{parse_strict, Error};
//!
//! let result = parse_strict("a=1;]");
//! assert!(matches!(result, Err(Error::UnexpectedStructEnd { .. })));
//!
//! if let Err(err) = result {
//!     assert!(err.to_string().contains("line 1"));
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors produced by this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// A `]` appeared with no open structure
    #[error("Unexpected ']' at line {line}, column {col}: no structure is open")]
    UnexpectedStructEnd { line: usize, col: usize },

    /// A `[` appeared after a value had already started
    #[error("Unexpected '[' at line {line}, column {col}: structure cannot follow a partial value")]
    UnexpectedStructStart { line: usize, col: usize },

    /// The input ended inside an open structure
    #[error("Unterminated structure at line {line}, column {col}: {depth} structure(s) still open")]
    UnterminatedStruct {
        line: usize,
        col: usize,
        depth: usize,
    },

    /// The input ended while a value was still being read
    #[error("Unterminated value for key '{key}' at line {line}, column {col}: expected ';'")]
    UnterminatedValue {
        line: usize,
        col: usize,
        key: String,
    },

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an unexpected structure-end error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kvs_format::Error;
    ///
    /// let err = Error::unexpected_struct_end(3, 7);
    /// assert!(err.to_string().contains("line 3, column 7"));
    /// ```
    pub fn unexpected_struct_end(line: usize, col: usize) -> Self {
        Error::UnexpectedStructEnd { line, col }
    }

    /// Creates an unexpected structure-start error.
    pub fn unexpected_struct_start(line: usize, col: usize) -> Self {
        Error::UnexpectedStructStart { line, col }
    }

    /// Creates an unterminated structure error.
    pub fn unterminated_struct(line: usize, col: usize, depth: usize) -> Self {
        Error::UnterminatedStruct { line, col, depth }
    }

    /// Creates an unterminated value error for the given (trimmed) key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kvs_format::Error;
    ///
    /// let err = Error::unterminated_value(1, 9, "name");
    /// assert!(err.to_string().contains("'name'"));
    /// ```
    pub fn unterminated_value(line: usize, col: usize, key: &str) -> Self {
        Error::UnterminatedValue {
            line,
            col,
            key: key.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns the `(line, column)` a parse error points at, if any.
    #[must_use]
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            Error::UnexpectedStructEnd { line, col }
            | Error::UnexpectedStructStart { line, col }
            | Error::UnterminatedStruct { line, col, .. }
            | Error::UnterminatedValue { line, col, .. } => Some((*line, *col)),
            Error::Io(_) | Error::Custom(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::io(&err.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
