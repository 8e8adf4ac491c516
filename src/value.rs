//! Value model.
//!
//! A closed representation of the six JSON kinds. Values are built from an
//! already-parsed `serde_json::Value` (or by hand) and never mutated after.
//! Objects keep their members in declaration order so diagnostics that walk
//! them are deterministic.
pub mod number;

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{Result, SchemaError};

pub use number::Number;

pub type Map = IndexMap<String, Value>;

/// The kind of a `Value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl Kind {
    pub const ALL: [Kind; 6] = [
        Kind::Null,
        Kind::Boolean,
        Kind::Number,
        Kind::String,
        Kind::Array,
        Kind::Object,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Boolean => "boolean",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Object => "object",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    Object(Map),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Boolean,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Result<bool> {
        match self {
            Value::Bool(b) => Ok(*b),
            other => Err(SchemaError::mismatch(Kind::Boolean, other.kind())),
        }
    }

    pub fn as_number(&self) -> Result<&Number> {
        match self {
            Value::Number(n) => Ok(n),
            other => Err(SchemaError::mismatch(Kind::Number, other.kind())),
        }
    }

    pub fn as_str(&self) -> Result<&str> {
        match self {
            Value::String(s) => Ok(s),
            other => Err(SchemaError::mismatch(Kind::String, other.kind())),
        }
    }

    pub fn as_array(&self) -> Result<&[Value]> {
        match self {
            Value::Array(xs) => Ok(xs),
            other => Err(SchemaError::mismatch(Kind::Array, other.kind())),
        }
    }

    pub fn as_object(&self) -> Result<&Map> {
        match self {
            Value::Object(m) => Ok(m),
            other => Err(SchemaError::mismatch(Kind::Object, other.kind())),
        }
    }

    /// Member lookup; `None` for missing names and for non-object values.
    pub fn get(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Object(m) => m.get(name),
            _ => None,
        }
    }

    /// Presence check. A member holding `null` is present.
    pub fn has(&self, name: &str) -> bool {
        match self {
            Value::Object(m) => m.contains_key(name),
            _ => false,
        }
    }

    /// Object members in declaration order.
    pub fn entries(&self) -> Result<impl Iterator<Item = (&str, &Value)>> {
        Ok(self.as_object()?.iter().map(|(k, v)| (k.as_str(), v)))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// CONVERSIONS
// ————————————————————————————————————————————————————————————————————————————

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        use serde_json::Value as Json;
        match v {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => Value::Number(Number::from(&n)),
            Json::String(s) => Value::String(s),
            Json::Array(xs) => Value::Array(xs.into_iter().map(Value::from).collect()),
            Json::Object(m) => Value::Object(
                m.into_iter().map(|(k, v)| (k, Value::from(v))).collect()
            ),
        }
    }
}

impl From<&serde_json::Value> for Value {
    fn from(v: &serde_json::Value) -> Self {
        Value::from(v.clone())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self { Value::Bool(b) }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self { Value::String(s.to_owned()) }
}

impl From<String> for Value {
    fn from(s: String) -> Self { Value::String(s) }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self { Value::Number(n) }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self { Value::Number(u.into()) }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self { Value::Number(i.into()) }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self { Value::Number(i.into()) }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self { Value::Number(f.into()) }
}

impl From<Vec<Value>> for Value {
    fn from(xs: Vec<Value>) -> Self { Value::Array(xs) }
}

impl From<Map> for Value {
    fn from(m: Map) -> Self { Value::Object(m) }
}
