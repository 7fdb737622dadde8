//! Common primitives shared by all models.

use std::fmt;

/// Represents a floating point type used across the crate.
pub type Float = f64;

/// Represents a timestamp: hours elapsed since the beginning of a weather series.
pub type Timestamp = Float;

/// Represents a time duration in hours.
pub type Duration = Float;

/// Specifies cost value.
pub type Cost = Float;

/// Amount of hours in one day, day-rates are pro-rated with it.
pub const HOURS_PER_DAY: Float = 24.;

/// A value of a candidate field or a rule constant.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A numeric value.
    Number(Float),
    /// A textual value, e.g. a vessel kind.
    Text(String),
}

impl Value {
    /// Returns a number if the value is numeric.
    pub fn as_number(&self) -> Option<Float> {
        match self {
            Value::Number(value) => Some(*value),
            Value::Text(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(value) => write!(f, "{value}"),
            Value::Text(value) => write!(f, "'{value}'"),
        }
    }
}

impl From<Float> for Value {
    fn from(value: Float) -> Self {
        Value::Number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}
