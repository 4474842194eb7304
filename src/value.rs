//! The universal value: a tagged sum with exactly twelve variants.
//!
//! This is a direct re-architecture of the Python reference's `GValue`
//! (one class with a slot per variant) into a Rust `enum`. Accessors become
//! pattern matches instead of runtime type checks; there is no vtable and
//! no inheritance.
//!
//! `Value` derives `serde::{Serialize, Deserialize}` for interop with the
//! broader serde ecosystem (e.g. embedding a `Value` in a larger struct
//! that itself derives `Serialize`). This is a separate, derive-default
//! representation — it has nothing to do with GLYPH's own canonical text
//! format, which is produced only by [`crate::canonicalize`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{RangeError, TypeError};

/// A reference token: `^prefix:value` or `^value` when `prefix` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Id {
    /// May be empty.
    pub prefix: String,
    /// Never empty.
    pub value: String,
}

impl Id {
    #[must_use]
    pub fn new(prefix: impl Into<String>, value: impl Into<String>) -> Self {
        Self { prefix: prefix.into(), value: value.into() }
    }
}

/// A named, keyed record. The type name is part of its canonical form and
/// part of its identity: a `Struct` is never `equal()` to a `Map` with the
/// same fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Struct {
    /// The struct's name, e.g. `Team` in `Team{name=Arsenal}`.
    pub type_name: String,
    /// The struct's fields, in construction order.
    pub fields: Vec<(String, Value)>,
}

/// A tagged union constructor: a tag name plus an optional payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sum {
    /// The constructor's name, e.g. `Some` in `Some(7)`.
    pub tag: String,
    /// The constructor's payload, if any.
    pub value: Option<Box<Value>>,
}

/// The discriminator returned by [`Value::kind`], mirroring `GType` in the
/// Python reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Kind {
    /// No value.
    Null,
    /// `true`/`false`.
    Bool,
    /// A signed integer, at least 64-bit range.
    Int,
    /// A binary64 floating-point number.
    Float,
    /// A Unicode string.
    Str,
    /// An opaque byte string.
    Bytes,
    /// A UTC instant.
    Time,
    /// A `{prefix, value}` reference token.
    Id,
    /// An ordered sequence of values.
    List,
    /// An ordered sequence of key/value pairs; order is not part of
    /// canonical identity.
    Map,
    /// A named, keyed record; the name is part of canonical identity.
    Struct,
    /// A tagged union constructor with an optional payload.
    Sum,
}

impl Kind {
    pub(crate) const fn name(self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Float => "float",
            Kind::Str => "str",
            Kind::Bytes => "bytes",
            Kind::Time => "time",
            Kind::Id => "id",
            Kind::List => "list",
            Kind::Map => "map",
            Kind::Struct => "struct",
            Kind::Sum => "sum",
        }
    }
}

/// Universal value container for GLYPH data.
///
/// `Map` and `Struct` entries are kept as an ordered sequence of pairs to
/// preserve construction order for debuggability; canonical emission always
/// re-sorts them, so no code may rely on the in-memory order surviving a
/// round trip through canonical text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// No value.
    Null,
    /// `true`/`false`.
    Bool(bool),
    /// At least 64-bit signed range, per the data model.
    Int(i64),
    /// A binary64 float; `NaN`/`Inf`/`-Inf` canonicalize but do not parse.
    Float(f64),
    /// A Unicode string.
    Str(String),
    /// An opaque byte string.
    Bytes(Vec<u8>),
    /// Always normalized to UTC.
    Time(DateTime<Utc>),
    /// A `^prefix:value` reference token.
    Id(Id),
    /// An ordered sequence of values.
    List(Vec<Value>),
    /// An ordered sequence of key/value pairs.
    Map(Vec<(String, Value)>),
    /// A named, keyed record.
    Struct(Struct),
    /// A tagged union constructor.
    Sum(Sum),
}

macro_rules! accessor {
    ($name:ident, $variant:ident, $ty:ty, $kind:expr) => {
        /// Returns the payload if this value is
        #[doc = concat!("`Value::", stringify!($variant), "`.")]
        ///
        /// # Errors
        ///
        /// Returns [`TypeError`] if this value holds a different variant.
        pub fn $name(&self) -> Result<&$ty, TypeError> {
            match self {
                Value::$variant(v) => Ok(v),
                other => Err(TypeError::WrongVariant {
                    expected: $kind.name(),
                    found: other.kind().name(),
                }),
            }
        }
    };
}

impl Value {
    // ------------------------------------------------------------------
    // Constructors
    // ------------------------------------------------------------------

    #[must_use]
    pub fn null() -> Self {
        Value::Null
    }

    #[must_use]
    pub fn bool_(v: bool) -> Self {
        Value::Bool(v)
    }

    #[must_use]
    pub fn int(v: i64) -> Self {
        Value::Int(v)
    }

    #[must_use]
    pub fn float(v: f64) -> Self {
        Value::Float(v)
    }

    #[must_use]
    pub fn str(v: impl Into<String>) -> Self {
        Value::Str(v.into())
    }

    #[must_use]
    pub fn bytes(v: impl Into<Vec<u8>>) -> Self {
        Value::Bytes(v.into())
    }

    #[must_use]
    pub fn time(v: DateTime<Utc>) -> Self {
        Value::Time(v)
    }

    #[must_use]
    pub fn id(prefix: impl Into<String>, value: impl Into<String>) -> Self {
        Value::Id(Id::new(prefix, value))
    }

    #[must_use]
    pub fn list(values: impl Into<Vec<Value>>) -> Self {
        Value::List(values.into())
    }

    #[must_use]
    pub fn map(entries: impl Into<Vec<(String, Value)>>) -> Self {
        Value::Map(entries.into())
    }

    #[must_use]
    pub fn struct_(type_name: impl Into<String>, fields: impl Into<Vec<(String, Value)>>) -> Self {
        Value::Struct(Struct { type_name: type_name.into(), fields: fields.into() })
    }

    #[must_use]
    pub fn sum(tag: impl Into<String>, value: Option<Value>) -> Self {
        Value::Sum(Sum { tag: tag.into(), value: value.map(Box::new) })
    }

    // ------------------------------------------------------------------
    // Discriminator
    // ------------------------------------------------------------------

    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Float(_) => Kind::Float,
            Value::Str(_) => Kind::Str,
            Value::Bytes(_) => Kind::Bytes,
            Value::Time(_) => Kind::Time,
            Value::Id(_) => Kind::Id,
            Value::List(_) => Kind::List,
            Value::Map(_) => Kind::Map,
            Value::Struct(_) => Kind::Struct,
            Value::Sum(_) => Kind::Sum,
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    // ------------------------------------------------------------------
    // Typed accessors
    // ------------------------------------------------------------------

    accessor!(as_bool, Bool, bool, Kind::Bool);
    accessor!(as_int, Int, i64, Kind::Int);
    accessor!(as_float, Float, f64, Kind::Float);
    accessor!(as_str, Str, String, Kind::Str);
    accessor!(as_bytes, Bytes, Vec<u8>, Kind::Bytes);
    accessor!(as_time, Time, DateTime<Utc>, Kind::Time);
    accessor!(as_id, Id, Id, Kind::Id);
    accessor!(as_list, List, Vec<Value>, Kind::List);
    accessor!(as_map, Map, Vec<(String, Value)>, Kind::Map);
    accessor!(as_struct, Struct, Struct, Kind::Struct);
    accessor!(as_sum, Sum, Sum, Kind::Sum);

    /// Numeric value regardless of whether it is stored as `Int` or `Float`.
    /// No implicit coercion happens elsewhere: `Int` and `Float` never
    /// compare equal across variants.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError`] if this value is neither `Int` nor `Float`.
    pub fn as_number(&self) -> Result<f64, TypeError> {
        match self {
            Value::Int(n) => Ok(*n as f64),
            Value::Float(f) => Ok(*f),
            other => Err(TypeError::WrongVariant { expected: "int or float", found: other.kind().name() }),
        }
    }

    /// Structural lookup on `Map`/`Struct` by key. Returns the first match
    /// in source order; duplicate keys have no defined retention policy.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            Value::Struct(s) => s.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Positional lookup on `List`.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError`] if this value is not a `List`, or
    /// [`RangeError`] if `i` is out of bounds.
    pub fn index(&self, i: usize) -> Result<&Value, IndexError> {
        match self {
            Value::List(items) => items
                .get(i)
                .ok_or(IndexError::Range(RangeError::IndexOutOfBounds { index: i, len: items.len() })),
            other => Err(IndexError::Type(TypeError::WrongVariant { expected: "list", found: other.kind().name() })),
        }
    }

    /// Length of `List`/`Map`/`Struct`; `0` for every other variant.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Value::List(items) => items.len(),
            Value::Map(entries) => entries.len(),
            Value::Struct(s) => s.fields.len(),
            _ => 0,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ------------------------------------------------------------------
    // Mutators — allowed on Map/Struct/List; canonical output never
    // depends on the order these leave entries in.
    // ------------------------------------------------------------------

    /// Sets (or appends) a field on `Map`/`Struct`.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError`] if this value is neither `Map` nor `Struct`.
    pub fn set(&mut self, key: impl Into<String>, value: Value) -> Result<(), TypeError> {
        let key = key.into();
        match self {
            Value::Map(entries) => {
                if let Some(entry) = entries.iter_mut().find(|(k, _)| *k == key) {
                    entry.1 = value;
                } else {
                    entries.push((key, value));
                }
                Ok(())
            }
            Value::Struct(s) => {
                if let Some(entry) = s.fields.iter_mut().find(|(k, _)| *k == key) {
                    entry.1 = value;
                } else {
                    s.fields.push((key, value));
                }
                Ok(())
            }
            other => Err(TypeError::WrongVariant { expected: "map or struct", found: other.kind().name() }),
        }
    }

    /// Appends to `List`.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError`] if this value is not a `List`.
    pub fn append(&mut self, value: Value) -> Result<(), TypeError> {
        match self {
            Value::List(items) => {
                items.push(value);
                Ok(())
            }
            other => Err(TypeError::WrongVariant { expected: "list", found: other.kind().name() }),
        }
    }
}

/// Either a wrong-variant or an out-of-bounds error from [`Value::index`].
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error(transparent)]
    Type(#[from] TypeError),
    #[error(transparent)]
    Range(#[from] RangeError),
}
