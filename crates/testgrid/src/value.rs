//! Coerced cell values
//!
//! Every cell slot of a sheet maps to exactly one [`Value`]:
//!
//! | slot                      | value                  |
//! |---------------------------|------------------------|
//! | string cell               | `Value::Text(content)` |
//! | numeric cell              | `Value::Number(n)`     |
//! | blank cell (exists)       | `Value::Text("")`      |
//! | no cell at that position  | `Value::Absent`        |
//!
//! Blank and absent stay distinguishable: a typed column can tell an
//! emptied cell from one that was never there.

use std::fmt;

use testgrid_core::{CellKind, CellValue};

/// A cell value after coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Number(f64),
    /// No cell exists at this position
    Absent,
}

impl Value {
    /// Create a text value
    pub fn text<S: Into<String>>(s: S) -> Self {
        Value::Text(s.into())
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// Coerce one cell slot.
///
/// `None` is a position with no cell. Boolean, error and formula cells have
/// no coerced form; the `Err` carries their kind so the caller can report
/// where it was found.
pub fn coerce(cell: Option<&CellValue>) -> std::result::Result<Value, CellKind> {
    match cell {
        None => Ok(Value::Absent),
        Some(CellValue::String(s)) => Ok(Value::Text(s.clone())),
        Some(CellValue::Number(n)) => Ok(Value::Number(*n)),
        Some(CellValue::Blank) => Ok(Value::Text(String::new())),
        Some(other @ (CellValue::Boolean(_) | CellValue::Error(_) | CellValue::Formula { .. })) => {
            Err(other.kind())
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Number(n) => write!(f, "{}", n),
            Value::Absent => Ok(()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Text(s.clone())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Absent, Into::into)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Value {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Text(s) => serializer.serialize_str(s),
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::Absent => serializer.serialize_none(),
        }
    }
}
