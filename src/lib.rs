//! GLYPH: a token-efficient, schema-optional textual codec with a single
//! canonical form per value.
//!
//! A [`Value`] is a twelve-variant universal data model — `Null`, `Bool`,
//! `Int`, `Float`, `Str`, `Bytes`, `Time`, `Id`, `List`, `Map`, `Struct`,
//! `Sum` — with one guaranteed canonical textual rendering per value, so
//! two equal values always produce byte-identical text (outside the
//! auto-tabular transform, which is display-only and does not affect
//! [`equal`] or [`fingerprint`]).
//!
//! ```
//! use glyph_codec::{parse, canonicalize, CanonOpts, Value};
//!
//! let v = Value::map(vec![("name".to_string(), Value::str("Arsenal"))]);
//! let text = canonicalize(&v, &CanonOpts::default());
//! assert_eq!(text, "{name=Arsenal}");
//! assert_eq!(parse(&text).unwrap(), v);
//! ```
//!
//! This crate performs no logging: it has no process lifecycle of its own,
//! only a pure text-in/value-out, value-in/text-out transform, so there is
//! nothing worth an operator's attention to emit.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod canon;
mod error;
mod fingerprint;
mod json;
mod lexer;
mod options;
mod parser;
mod value;

pub use canon::{canonicalize, canonicalize_no_tabular};
pub use error::{LexError, ParseError, RangeError, TypeError};
pub use fingerprint::{equal, fingerprint};
pub use json::{from_json, glyph_to_json, json_to_glyph, to_json};
pub use options::{CanonOpts, NullStyle};
pub use parser::parse;
pub use value::{Id, IndexError, Kind, Struct, Sum, Value};
