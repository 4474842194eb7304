//! Error taxonomy: one small `thiserror` enum per failure domain, the way
//! `atomic-types::AtomError` and `json_atomic::errors` keep lex/parse/seal
//! errors apart rather than one flattened type.

use thiserror::Error;

/// Errors raised while tokenizing GLYPH text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    /// A character that cannot begin any token.
    #[error("unexpected character {ch:?} at byte {pos}")]
    UnexpectedChar { pos: usize, ch: char },

    /// A `"..."` string literal with no closing quote.
    #[error("unterminated string literal starting at byte {pos}")]
    UnterminatedString { pos: usize },

    /// A `b64"..."` literal with no closing quote.
    #[error("unterminated bytes literal starting at byte {pos}")]
    UnterminatedBytes { pos: usize },

    /// A `\u` escape that is not exactly four hex digits, or not a valid
    /// code point.
    #[error("invalid \\u escape at byte {pos}")]
    BadUnicodeEscape { pos: usize },

    /// A `b64"..."` literal whose content is not valid standard base64.
    #[error("invalid base64 content in bytes literal at byte {pos}")]
    BadBase64 { pos: usize },

    /// An integer literal outside `i64`'s range.
    #[error("integer literal at byte {pos} overflows i64")]
    IntLiteralOverflow { pos: usize },
}

/// Errors raised while parsing a token stream into a [`crate::Value`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A lexical error while scanning the token stream.
    #[error(transparent)]
    Lex(#[from] LexError),

    /// A token where the grammar required something else.
    #[error("unexpected token {found} at byte {pos} (expected {expected})")]
    UnexpectedToken { pos: usize, found: String, expected: &'static str },

    /// A `[...]` list with no closing `]`.
    #[error("unterminated list starting at byte {pos}")]
    UnterminatedList { pos: usize },

    /// A `{...}` map with no closing `}`.
    #[error("unterminated map starting at byte {pos}")]
    UnterminatedMap { pos: usize },

    /// A `Name{...}` struct with no closing `}`.
    #[error("unterminated struct starting at byte {pos}")]
    UnterminatedStruct { pos: usize },

    /// A `|...|` tabular row with no closing `|`.
    #[error("unterminated tabular cell starting at byte {pos}")]
    UnterminatedCell { pos: usize },

    /// An `@name` directive other than `@tab`.
    #[error("unknown directive '@{name}' at byte {pos}")]
    UnknownDirective { pos: usize, name: String },

    /// An `@tab` block whose row section never reaches `@end`.
    #[error("missing @end for tabular block starting at byte {pos}")]
    MissingEnd { pos: usize },

    /// A tabular row with the wrong number of `|`-delimited cells, or a
    /// header line with no trailing newline.
    #[error("missing separator at byte {pos}")]
    MissingSeparator { pos: usize },
}

/// Raised when a typed accessor is invoked on the wrong [`crate::value::Kind`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("type error: expected {expected}, found {found}")]
    WrongVariant { expected: &'static str, found: &'static str },
}

impl TypeError {
    /// The variant name this accessor expected.
    #[must_use]
    pub fn expected(&self) -> &'static str {
        match self {
            TypeError::WrongVariant { expected, .. } => expected,
        }
    }

    /// The variant name actually found.
    #[must_use]
    pub fn found(&self) -> &'static str {
        match self {
            TypeError::WrongVariant { found, .. } => found,
        }
    }
}

/// Integer overflow and out-of-bounds errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RangeError {
    /// A value (a parsed literal or a JSON-bridge conversion) does not fit
    /// `i64`.
    #[error("integer value overflows i64")]
    IntOverflow,

    /// A [`crate::Value::index`] call with an out-of-range position.
    #[error("index {index} out of bounds for list of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}
