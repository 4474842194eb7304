//! The JSON bridge (§4.H): a thin, separately-scoped adapter between
//! [`Value`] and `serde_json::Value`. It is deliberately lossy in both
//! directions — JSON has no `Bytes`/`Time`/`Id`/`Struct`/`Sum` variants, and
//! GLYPH's `Int` is a single 64-bit range rather than JSON's arbitrary
//! precision — so the mapping favors the common case (numbers, strings,
//! arrays, objects) and never invents structure the other side can't see.

use crate::canon::canonicalize_value;
use crate::error::{ParseError, RangeError};
use crate::options::CanonOpts;
use crate::parser::parse;
use crate::value::Value;

/// Converts a parsed `serde_json::Value` into a GLYPH [`Value`].
///
/// JSON objects become `Map`; JSON numbers become `Int` when they fit
/// exactly in `i64`, else `Float`. `Bytes`, `Time`, `Id`, `Struct`, and
/// `Sum` never arise from this conversion — JSON has no way to express
/// them.
///
/// # Errors
///
/// Returns [`RangeError::IntOverflow`] if a JSON number is an integer that
/// does not fit in `i64` (JSON's number range is otherwise unbounded).
pub fn from_json(json: &serde_json::Value) -> Result<Value, RangeError> {
    match json {
        serde_json::Value::Null => Ok(Value::Null),
        serde_json::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Int(i))
            } else if n.is_u64() {
                // A non-negative integer that doesn't fit i64's range.
                Err(RangeError::IntOverflow)
            } else if let Some(f) = n.as_f64() {
                Ok(Value::Float(f))
            } else {
                Err(RangeError::IntOverflow)
            }
        }
        serde_json::Value::String(s) => Ok(Value::Str(s.clone())),
        serde_json::Value::Array(items) => {
            let converted = items.iter().map(from_json).collect::<Result<Vec<_>, _>>()?;
            Ok(Value::List(converted))
        }
        serde_json::Value::Object(map) => {
            let mut entries = Vec::with_capacity(map.len());
            for (k, v) in map {
                entries.push((k.clone(), from_json(v)?));
            }
            Ok(Value::Map(entries))
        }
    }
}

/// Converts a GLYPH [`Value`] into a `serde_json::Value`.
///
/// `Bytes` becomes a base64 string, `Time` an ISO-8601 string, `Id` its
/// canonical `^prefix:value` string, `Struct` an object plus a `"$type"`
/// key, and `Sum` an object `{"$tag": ..., "$value": ...}` (`$value` is
/// `null` when the sum carries no payload) — these are display
/// conveniences, not a reversible encoding; round-tripping through
/// [`to_json`] then [`from_json`] does not recover the original variant.
#[must_use]
pub fn to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Int(i) => serde_json::Value::Number((*i).into()),
        Value::Float(f) => serde_json::Number::from_f64(*f).map_or(serde_json::Value::Null, serde_json::Value::Number),
        Value::Str(s) => serde_json::Value::String(s.clone()),
        Value::Bytes(b) => serde_json::Value::String(crate::canon::canon_bytes(b)),
        Value::Time(t) => serde_json::Value::String(crate::canon::canon_time(t)),
        Value::Id(id) => serde_json::Value::String(crate::canon::canon_id(id)),
        Value::List(items) => serde_json::Value::Array(items.iter().map(to_json).collect()),
        Value::Map(entries) => {
            let map: serde_json::Map<String, serde_json::Value> =
                entries.iter().map(|(k, v)| (k.clone(), to_json(v))).collect();
            serde_json::Value::Object(map)
        }
        Value::Struct(s) => {
            let mut map: serde_json::Map<String, serde_json::Value> =
                s.fields.iter().map(|(k, v)| (k.clone(), to_json(v))).collect();
            map.insert("$type".to_string(), serde_json::Value::String(s.type_name.clone()));
            serde_json::Value::Object(map)
        }
        Value::Sum(s) => {
            let mut map = serde_json::Map::new();
            map.insert("$tag".to_string(), serde_json::Value::String(s.tag.clone()));
            map.insert("$value".to_string(), s.value.as_deref().map_or(serde_json::Value::Null, to_json));
            serde_json::Value::Object(map)
        }
    }
}

/// Parses `json` and emits its canonical GLYPH text directly.
///
/// # Errors
///
/// Returns [`RangeError`] under the same conditions as [`from_json`].
pub fn json_to_glyph(json: &serde_json::Value, opts: &CanonOpts) -> Result<String, RangeError> {
    let value = from_json(json)?;
    Ok(canonicalize_value(&value, opts))
}

/// Parses GLYPH `text` and emits it as a `serde_json::Value`.
///
/// # Errors
///
/// Returns [`ParseError`] if `text` is not well-formed GLYPH.
pub fn glyph_to_json(text: &str) -> Result<serde_json::Value, ParseError> {
    let value = parse(text)?;
    Ok(to_json(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars() {
        assert_eq!(from_json(&json!(null)).unwrap(), Value::Null);
        assert_eq!(from_json(&json!(true)).unwrap(), Value::Bool(true));
        assert_eq!(from_json(&json!(42)).unwrap(), Value::Int(42));
        assert_eq!(from_json(&json!(3.5)).unwrap(), Value::Float(3.5));
        assert_eq!(from_json(&json!("hi")).unwrap(), Value::Str("hi".to_string()));
    }

    #[test]
    fn arrays_and_objects() {
        let v = from_json(&json!({"a": 1, "b": [1, 2, 3]})).unwrap();
        assert_eq!(v.get("a").unwrap(), &Value::Int(1));
        assert_eq!(v.get("b").unwrap(), &Value::List(vec![Value::int(1), Value::int(2), Value::int(3)]));
    }

    #[test]
    fn to_json_renders_bytes_and_id_as_their_canonical_strings() {
        let b = to_json(&Value::bytes(b"hi".to_vec()));
        assert_eq!(b, json!("b64\"aGk=\""));
        let id = to_json(&Value::id("user", "42"));
        assert_eq!(id, json!("^user:42"));
    }

    #[test]
    fn to_json_renders_struct_with_dollar_type() {
        let s = Value::struct_("Point", vec![("x".to_string(), Value::int(1))]);
        let j = to_json(&s);
        assert_eq!(j["$type"], json!("Point"));
        assert_eq!(j["x"], json!(1));
    }

    #[test]
    fn to_json_renders_sum() {
        assert_eq!(to_json(&Value::sum("None", None)), json!({"$tag": "None", "$value": null}));
        assert_eq!(to_json(&Value::sum("Some", Some(Value::int(7)))), json!({"$tag": "Some", "$value": 7}));
    }

    #[test]
    fn json_to_glyph_round_trip() {
        let j = json!({"name": "Arsenal", "wins": 3});
        let text = json_to_glyph(&j, &CanonOpts::default()).unwrap();
        let back = glyph_to_json(&text).unwrap();
        assert_eq!(back, j);
    }
}
