//! The auto-tabular engine (§4.D): detects homogeneous lists of
//! records and, when beneficial, emits them as a row-oriented table
//! instead of a bracketed list of maps/structs.
//!
//! Trigger is exactly the in-code rule from the reference implementation —
//! `len >= min_rows` and `1 <= union(keys) <= max_cols` — with no
//! additional "50% common keys" threshold, even though some external
//! fixtures assume one exists. See `DESIGN.md` for the record of this
//! decision.

use crate::options::CanonOpts;
use crate::value::Value;

use super::scalar::{canon_null, canon_string};

/// Fields of a single row, keyed by the column's raw (un-canonicalized)
/// name, if `v` is a `Map` or `Struct`.
fn row_fields(v: &Value) -> Option<&[(String, Value)]> {
    match v {
        Value::Map(entries) => Some(entries),
        Value::Struct(s) => Some(&s.fields),
        _ => None,
    }
}

/// Attempts the tabular transform over `items`; returns the emitted text on
/// success, or `None` if the trigger conditions are not met (caller should
/// fall back to an ordinary bracketed list).
pub(super) fn try_emit(items: &[Value], opts: &CanonOpts, canon_value: impl Fn(&Value, &CanonOpts) -> String) -> Option<String> {
    if !opts.auto_tabular || items.len() < opts.min_rows {
        return None;
    }

    let rows: Vec<&[(String, Value)]> = items.iter().map(row_fields).collect::<Option<_>>()?;

    let mut union: Vec<String> = Vec::new();
    for row in &rows {
        for (k, _) in *row {
            if !union.contains(k) {
                union.push(k.clone());
            }
        }
    }
    if union.is_empty() || union.len() > opts.max_cols {
        return None;
    }

    if !opts.allow_missing {
        for row in &rows {
            if row.len() != union.len() || !union.iter().all(|k| row.iter().any(|(rk, _)| rk == k)) {
                return None;
            }
        }
    }

    // Sort columns by the byte-sort rule: the canonical form of the key,
    // compared as bytes.
    union.sort_by(|a, b| canon_string(a).as_bytes().cmp(canon_string(b).as_bytes()));

    let mut out = String::new();
    out.push_str("@tab _ [");
    for (i, col) in union.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&canon_string(col));
    }
    out.push_str("]\n");

    for row in &rows {
        out.push('|');
        for (i, col) in union.iter().enumerate() {
            if i > 0 {
                out.push('|');
            }
            let cell = match row.iter().find(|(k, _)| k == col) {
                Some((_, v)) => canon_value(v, opts),
                None => canon_null(opts.null_style).to_string(),
            };
            out.push_str(&escape_cell(&cell));
        }
        out.push_str("|\n");
    }
    out.push_str("@end");

    Some(out)
}

/// Cell-escapes a canonical value's text for embedding between `|`
/// delimiters: `\` -> `\\`, `|` -> `\|`, newline -> `\n` (literal two
/// characters), applied in that order.
fn escape_cell(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '|' => out.push_str("\\|"),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out
}
