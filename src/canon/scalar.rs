//! Scalar canonicalization (§4.B): every scalar maps to exactly one
//! canonical textual form.

use base64::Engine as _;
use chrono::{DateTime, Utc};

#[cfg(feature = "unicode")]
use unicode_normalization::UnicodeNormalization;

use crate::options::NullStyle;
use crate::value::Id;

const RESERVED_WORDS: [&str; 7] = ["t", "f", "true", "false", "null", "nil", "_"];

fn is_bare_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '/' | '+' | '@')
}

fn is_bare_lead_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Whether `s` may be emitted unquoted as a bare string: non-empty, every
/// char in the bare charset, first char a letter/underscore, and not a
/// reserved word.
#[must_use]
pub fn is_bare_safe(s: &str) -> bool {
    if s.is_empty() || RESERVED_WORDS.contains(&s) {
        return false;
    }
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if is_bare_lead_char(c) => {}
        _ => return false,
    }
    chars.all(is_bare_char)
}

/// Whether `s` may be emitted unquoted as a bare *Id* component: same
/// charset/leading-char rule as [`is_bare_safe`], but without the
/// reserved-word exclusion (ids may be purely numeric, e.g. `^user:123`).
#[must_use]
fn is_bare_safe_id_part(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if is_bare_lead_char(c) => {}
        _ => return false,
    }
    chars.all(is_bare_char)
}

/// Quotes and escapes `s` per §4.B: `"`, `\`, newline, CR, tab, and any
/// code point below `0x20` become `\"`, `\\`, `\n`, `\r`, `\t`, `\u00XX`.
#[must_use]
pub fn quote_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Normalizes `s` to Unicode NFC when the `unicode` feature is enabled, so
/// that two byte-distinct-but-equivalent inputs (e.g. precomposed vs.
/// combining-character forms of the same text) produce the same canonical
/// form. A no-op otherwise.
#[must_use]
fn normalize(s: &str) -> String {
    #[cfg(feature = "unicode")]
    {
        s.nfc().collect()
    }
    #[cfg(not(feature = "unicode"))]
    {
        s.to_string()
    }
}

/// Canonical form of a string scalar: bare if safe, quoted otherwise.
/// Normalizes to NFC first (see [`normalize`]), so bare-safety is judged
/// on the normalized text.
#[must_use]
pub fn canon_string(s: &str) -> String {
    let s = normalize(s);
    if is_bare_safe(&s) {
        s
    } else {
        quote_string(&s)
    }
}

/// Canonical form of `Null`, per the configured [`NullStyle`].
#[must_use]
pub fn canon_null(style: NullStyle) -> &'static str {
    match style {
        NullStyle::Symbol => "\u{2205}",
        NullStyle::Underscore => "_",
    }
}

/// Canonical form of `Bool`: `t` / `f`.
#[must_use]
pub fn canon_bool(v: bool) -> &'static str {
    if v {
        "t"
    } else {
        "f"
    }
}

/// Canonical form of `Int`: decimal, no leading zeros, `-0` folds to `0`.
#[must_use]
pub fn canon_int(v: i64) -> String {
    v.to_string()
}

/// Canonical form of `Float`: shortest round-trip decimal, with
/// exponential notation outside `[1e-4, 1e15)`, lowercase `e`, a signed
/// exponent of at least two digits, and stripped trailing zeros.
#[must_use]
pub fn canon_float(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Inf".to_string() } else { "-Inf".to_string() };
    }
    if v == 0.0 {
        // Folds -0.0 -> 0 too, since -0.0 == 0.0.
        return "0".to_string();
    }
    let abs = v.abs();
    if abs < 1e-4 || abs >= 1e15 {
        canon_float_exp(v)
    } else {
        v.to_string()
    }
}

fn canon_float_exp(v: f64) -> String {
    // Rust's LowerExp uses the same shortest-round-trip digit generation
    // as Display; we only need to renormalize the exponent's presentation.
    let s = format!("{:e}", v);
    let (mantissa, exp) = s.split_once('e').expect("LowerExp always emits 'e'");
    let mantissa = if mantissa.contains('.') {
        mantissa.trim_end_matches('0').trim_end_matches('.')
    } else {
        mantissa
    };
    let exp_val: i32 = exp.parse().expect("LowerExp exponent is always a valid integer");
    let sign = if exp_val < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exp_val.unsigned_abs())
}

/// Canonical form of `Bytes`: `b64"<standard base64>"`.
#[must_use]
pub fn canon_bytes(v: &[u8]) -> String {
    format!("b64\"{}\"", base64::engine::general_purpose::STANDARD.encode(v))
}

/// Canonical form of `Time`: `YYYY-MM-DDTHH:MM:SS[.fff…]Z`, fractional
/// seconds with trailing zeros stripped, `Z` required.
#[must_use]
pub fn canon_time(v: &DateTime<Utc>) -> String {
    let nanos = v.timestamp_subsec_nanos();
    let base = v.format("%Y-%m-%dT%H:%M:%S").to_string();
    if nanos == 0 {
        return format!("{base}Z");
    }
    let frac = format!("{nanos:09}");
    let frac = frac.trim_end_matches('0');
    format!("{base}.{frac}Z")
}

/// Canonical form of `Id`: `^value`, `^prefix:value`, or (when either part
/// is not bare-safe) a single quoted combined form `^"prefix:value"`.
#[must_use]
pub fn canon_id(id: &Id) -> String {
    let prefix = normalize(&id.prefix);
    let value = normalize(&id.value);
    if prefix.is_empty() {
        if is_bare_safe_id_part(&value) {
            format!("^{value}")
        } else {
            format!("^{}", quote_string(&value))
        }
    } else if is_bare_safe_id_part(&prefix) && is_bare_safe_id_part(&value) {
        format!("^{prefix}:{value}")
    } else {
        format!("^{}", quote_string(&format!("{prefix}:{value}")))
    }
}
