use std::fmt;

use serde::{Deserialize, Serialize};

/// Missing-value sentinel for text fields.
pub const TEXT_MISSING_VALUE: &str = "";

/// Missing-value sentinel for integer fields.
pub const INTEGER_MISSING_VALUE: i32 = -99;

/// Missing-value sentinel for real fields.
///
/// Stored on disk as-is; never NaN or infinite.
pub const REAL_MISSING_VALUE: f64 = -1.0e34;

/// Relative tolerance used when comparing a real value against
/// [`REAL_MISSING_VALUE`].
pub const REAL_MISSING_TOLERANCE: f64 = 1.0e-6;

/// Storage kind of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Integer,
    Real,
}

impl FieldKind {
    /// The kind's missing-value sentinel as a [`Value`].
    pub fn missing_value(self) -> Value {
        match self {
            Self::Text => Value::Text(TEXT_MISSING_VALUE.to_string()),
            Self::Integer => Value::Integer(INTEGER_MISSING_VALUE),
            Self::Real => Value::Real(REAL_MISSING_VALUE),
        }
    }

    /// Whether a real value should be treated as missing.
    ///
    /// Non-finite values and anything within relative tolerance of the
    /// sentinel count as missing.
    pub fn is_missing_real(value: f64) -> bool {
        if !value.is_finite() {
            return true;
        }
        let scale = value.abs().max(REAL_MISSING_VALUE.abs());
        (value - REAL_MISSING_VALUE).abs() <= REAL_MISSING_TOLERANCE * scale
    }

    /// Whether `value` is this kind's sentinel (or a variant of it).
    pub fn is_missing(self, value: &Value) -> bool {
        match (self, value) {
            (Self::Text, Value::Text(text)) => text.is_empty(),
            (Self::Integer, Value::Integer(number)) => *number == INTEGER_MISSING_VALUE,
            (Self::Real, Value::Real(number)) => Self::is_missing_real(*number),
            _ => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Real => "real",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single typed cell or attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Value {
    Text(String),
    Integer(i32),
    Real(f64),
}

impl Value {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Text(_) => FieldKind::Text,
            Self::Integer(_) => FieldKind::Integer,
            Self::Real(_) => FieldKind::Real,
        }
    }

    /// Whether this value is the sentinel for its own kind.
    pub fn is_missing(&self) -> bool {
        self.kind().is_missing(self)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i32> {
        match self {
            Self::Integer(number) => Some(*number),
            _ => None,
        }
    }

    /// Numeric view of the value; integers widen to `f64`.
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Self::Integer(number) => Some(f64::from(*number)),
            Self::Real(number) => Some(*number),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Integer(number) => write!(f, "{number}"),
            Self::Real(number) => write!(f, "{number}"),
        }
    }
}
