//! Cell value types

use std::fmt;

/// The value stored in a cell that exists.
///
/// A position with no cell at all is modelled as `Option::None` by the
/// accessors on [`Row`](crate::Row), never as a variant here.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Cell exists but holds no value (e.g. a style-only cell)
    Blank,

    /// String value
    String(String),

    /// Numeric value (all numbers stored as f64, including dates)
    Number(f64),

    /// Boolean value (TRUE/FALSE)
    Boolean(bool),

    /// Error value as written in the file (e.g. `#DIV/0!`)
    Error(String),

    /// Formula with its cached result, if the file carried one
    Formula {
        text: String,
        cached_value: Option<Box<CellValue>>,
    },
}

/// The declared kind of a cell, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    Blank,
    String,
    Numeric,
    Boolean,
    Error,
    Formula,
}

impl CellValue {
    /// Create a new string value
    pub fn string<S: Into<String>>(s: S) -> Self {
        CellValue::String(s.into())
    }

    /// Create a new formula value without a cached result
    pub fn formula<S: Into<String>>(text: S) -> Self {
        CellValue::Formula {
            text: text.into(),
            cached_value: None,
        }
    }

    pub fn kind(&self) -> CellKind {
        match self {
            CellValue::Blank => CellKind::Blank,
            CellValue::String(_) => CellKind::String,
            CellValue::Number(_) => CellKind::Numeric,
            CellValue::Boolean(_) => CellKind::Boolean,
            CellValue::Error(_) => CellKind::Error,
            CellValue::Formula { .. } => CellKind::Formula,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, CellValue::Blank)
    }

    /// Try to get the value as a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get the value as a string
    pub fn as_string(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Blank
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Blank => Ok(()),
            CellValue::String(s) => f.write_str(s),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Boolean(b) => f.write_str(if *b { "TRUE" } else { "FALSE" }),
            CellValue::Error(e) => f.write_str(e),
            CellValue::Formula {
                cached_value: Some(v),
                ..
            } => write!(f, "{}", v),
            CellValue::Formula { text, .. } => write!(f, "={}", text),
        }
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CellKind::Blank => "blank",
            CellKind::String => "string",
            CellKind::Numeric => "numeric",
            CellKind::Boolean => "boolean",
            CellKind::Error => "error",
            CellKind::Formula => "formula",
        };
        f.write_str(name)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::string(s)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}
