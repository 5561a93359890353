use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Declared kind of a field on a target type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Bool,
    Short,
    Int,
    Long,
    Text,
    Timestamp,
}

impl FieldKind {
    /// Whether values of this kind can be mapped onto a linear scale and
    /// sampled from a range.
    pub fn is_rangeable(self) -> bool {
        matches!(
            self,
            FieldKind::Short | FieldKind::Int | FieldKind::Long | FieldKind::Timestamp
        )
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Bool => "bool",
            FieldKind::Short => "short",
            FieldKind::Int => "int",
            FieldKind::Long => "long",
            FieldKind::Text => "text",
            FieldKind::Timestamp => "timestamp",
        };
        f.write_str(name)
    }
}

/// Runtime representation of one generated field value.
///
/// `Eq + Hash` so exclusive strategies can track claimed values in a set;
/// floating-point kinds are deliberately absent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    Bool(bool),
    Short(i16),
    Int(i32),
    Long(i64),
    Text(String),
    Timestamp(NaiveDateTime),
}

impl Value {
    pub fn kind(&self) -> FieldKind {
        match self {
            Value::Bool(_) => FieldKind::Bool,
            Value::Short(_) => FieldKind::Short,
            Value::Int(_) => FieldKind::Int,
            Value::Long(_) => FieldKind::Long,
            Value::Text(_) => FieldKind::Text,
            Value::Timestamp(_) => FieldKind::Timestamp,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Integral view of the value; short and int widen to i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Short(value) => Some(*value as i64),
            Value::Int(value) => Some(*value as i64),
            Value::Long(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            Value::Timestamp(value) => Some(*value),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Value::Short(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Long(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Value::Timestamp(value)
    }
}

/// Checked conversion from a generated [`Value`] into a concrete field type.
///
/// Implementations declare the [`FieldKind`] a field of that type carries in
/// the catalog. Widening is the only implicit conversion: a short value
/// assigns to int and long fields, an int value to long fields. Everything
/// else must match the declared kind exactly.
pub trait Scalar: Sized {
    const KIND: FieldKind;

    /// Returns `None` when the value's kind cannot assign to this type.
    fn from_value(value: &Value) -> Option<Self>;
}

impl Scalar for bool {
    const KIND: FieldKind = FieldKind::Bool;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl Scalar for i16 {
    const KIND: FieldKind = FieldKind::Short;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Short(value) => Some(*value),
            _ => None,
        }
    }
}

impl Scalar for i32 {
    const KIND: FieldKind = FieldKind::Int;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Short(value) => Some(*value as i32),
            Value::Int(value) => Some(*value),
            _ => None,
        }
    }
}

impl Scalar for i64 {
    const KIND: FieldKind = FieldKind::Long;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_i64()
    }
}

impl Scalar for String {
    const KIND: FieldKind = FieldKind::Text;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(|value| value.to_string())
    }
}

impl Scalar for NaiveDateTime {
    const KIND: FieldKind = FieldKind::Timestamp;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_timestamp()
    }
}
