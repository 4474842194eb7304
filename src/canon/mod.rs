//! Canonical emission (§4): a `Value` tree maps to exactly one canonical
//! textual form, recursively assembled from the scalar (§4.B), composite
//! (§4.C) and tabular (§4.D) pieces.

mod composite;
mod scalar;
mod tabular;

pub use scalar::{canon_bool, canon_bytes, canon_float, canon_id, canon_int, canon_null, canon_string, canon_time, is_bare_safe, quote_string};

use crate::options::CanonOpts;
use crate::value::Value;

/// Canonicalizes `value` under `opts`. This is the single recursive
/// entry point every composite form's children go back through, so that a
/// `List` of `Map`s of `List`s canonicalizes consistently top to bottom.
#[must_use]
pub fn canonicalize_value(value: &Value, opts: &CanonOpts) -> String {
    match value {
        Value::Null => canon_null(opts.null_style).to_string(),
        Value::Bool(v) => canon_bool(*v).to_string(),
        Value::Int(v) => canon_int(*v),
        Value::Float(v) => canon_float(*v),
        Value::Str(v) => canon_string(v),
        Value::Bytes(v) => canon_bytes(v),
        Value::Time(v) => canon_time(v),
        Value::Id(v) => canon_id(v),
        Value::List(items) => {
            if let Some(tabular) = tabular::try_emit(items, opts, canonicalize_value) {
                tabular
            } else {
                composite::canon_list(items, opts, canonicalize_value)
            }
        }
        Value::Map(entries) => composite::canon_map(entries, opts, canonicalize_value),
        Value::Struct(s) => composite::canon_struct(s, opts, canonicalize_value),
        Value::Sum(s) => composite::canon_sum(s, opts, canonicalize_value),
    }
}

/// Top-level canonicalization entry point: `glyph::canonicalize`.
#[must_use]
pub fn canonicalize(value: &Value, opts: &CanonOpts) -> String {
    canonicalize_value(value, opts)
}

/// Canonicalizes with the auto-tabular transform forced off, regardless of
/// `opts`. Used internally by [`crate::fingerprint`] and [`crate::equal`],
/// and exposed directly for callers who want a table-free rendering without
/// building a whole new [`CanonOpts`].
#[must_use]
pub fn canonicalize_no_tabular(value: &Value) -> String {
    canonicalize_value(value, &CanonOpts::no_tabular())
}
