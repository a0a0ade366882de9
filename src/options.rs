//! Configuration options for KVS parsing and serialization.
//!
//! This module provides:
//!
//! - [`KvsOptions`]: how a [`Tree`](crate::Tree) is written out
//! - [`ParseMode`]: whether malformed input is tolerated or reported
//!
//! ## Examples
//!
//! ```rust
//! use kvs_format::{to_string_with_options, KvsOptions, Tree};
//!
//! let mut tree = Tree::new();
//! tree.set("Alice", &["name"]);
//!
//! // Label the whole document as a nested structure
//! let options = KvsOptions::new().with_wrap("user");
//! assert_eq!(to_string_with_options(&tree, &options), "user[name=Alice;]");
//! ```

/// How the parser treats structurally malformed input.
///
/// # Examples
///
/// ```rust
/// use kvs_format::ParseMode;
///
/// assert_eq!(ParseMode::default(), ParseMode::Lenient);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Consume everything best-effort and always produce a tree.
    #[default]
    Lenient,
    /// Report the first structural problem as an error.
    Strict,
}

/// Configuration options for KVS serialization.
///
/// # Examples
///
/// ```rust
/// use kvs_format::KvsOptions;
///
/// // Default compact options
/// let options = KvsOptions::new();
///
/// // Human-readable with tab indentation
/// let options = KvsOptions::pretty();
///
/// // Custom configuration
/// let options = KvsOptions::pretty()
///     .with_indent("  ")
///     .with_wrap("config")
///     .with_implicit_keys(true);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KvsOptions {
    /// Insert newlines and indentation between entries.
    pub pretty: bool,
    /// Indentation unit repeated once per nesting level in pretty mode.
    pub indent: String,
    /// Surround the whole document with `wrap[` ... `]`.
    pub wrap: Option<String>,
    /// Write sequential auto-keys (`"0"`, `"1"`, ...) as blank keys.
    pub implicit_keys: bool,
    /// Surround keys and values with ANSI colour codes for terminal display.
    /// Coloured output is for reading, not for parsing back.
    pub colour: bool,
}

impl Default for KvsOptions {
    fn default() -> Self {
        KvsOptions {
            pretty: false,
            indent: "\t".to_string(),
            wrap: None,
            implicit_keys: false,
            colour: false,
        }
    }
}

impl KvsOptions {
    /// Creates default options (compact, no wrap, explicit keys).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kvs_format::KvsOptions;
    ///
    /// let options = KvsOptions::new();
    /// assert!(!options.pretty);
    /// assert!(options.wrap.is_none());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for pretty-printed output.
    ///
    /// Pretty output only adds whitespace in key positions, which the parser
    /// trims, so it parses back to the same data.
    #[must_use]
    pub fn pretty() -> Self {
        KvsOptions {
            pretty: true,
            ..Default::default()
        }
    }

    /// Creates options for coloured, pretty-printed terminal output with
    /// implicit keys.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kvs_format::{parse, to_string_with_options, KvsOptions};
    ///
    /// let text = to_string_with_options(&parse("a=1;"), &KvsOptions::colourful());
    /// assert_eq!(text, "\x1b[0;97ma\x1b[0m=\x1b[0;35m1\x1b[0m;\t");
    /// ```
    #[must_use]
    pub fn colourful() -> Self {
        KvsOptions {
            pretty: true,
            implicit_keys: true,
            colour: true,
            ..Default::default()
        }
    }

    /// Sets the indentation unit. Default is a single tab.
    ///
    /// Only whitespace is accepted by the parser in key positions, so a
    /// non-whitespace indent would change the parsed keys.
    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Wraps the whole document under a synthetic key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kvs_format::KvsOptions;
    ///
    /// let options = KvsOptions::new().with_wrap("root");
    /// assert_eq!(options.wrap.as_deref(), Some("root"));
    /// ```
    #[must_use]
    pub fn with_wrap(mut self, wrap: impl Into<String>) -> Self {
        self.wrap = Some(wrap.into());
        self
    }

    /// Writes sequential auto-keys as blank keys, letting the parser
    /// regenerate them.
    #[must_use]
    pub fn with_implicit_keys(mut self, implicit_keys: bool) -> Self {
        self.implicit_keys = implicit_keys;
        self
    }

    /// Turns ANSI colouring of keys and values on or off.
    #[must_use]
    pub fn with_colour(mut self, colour: bool) -> Self {
        self.colour = colour;
        self
    }
}
