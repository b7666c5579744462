//! Field data types and conversion of raw column text into typed values

use super::Value;
use crate::error::{DatError, Result};

/// The type a header field or row column stores its value as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    /// Free text
    Text,
    /// Whole number
    Int,
    /// Real number
    Float,
    /// Keyword restricted to a fixed list of choices
    Constant,
}

impl DataType {
    /// Parse raw column text into a typed value.
    ///
    /// Surrounding whitespace is stripped first. A blank numeric column is a
    /// parse fault, not a zero.
    pub fn parse(self, raw: &str) -> Result<Value> {
        let raw = raw.trim();
        match self {
            DataType::Text | DataType::Constant => Ok(Value::Text(raw.to_string())),
            DataType::Int => raw
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| DatError::Parse(format!("Unable to parse '{}' as an integer", raw))),
            DataType::Float => raw
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| DatError::Parse(format!("Unable to parse '{}' as a float", raw))),
        }
    }

    /// Convert a programmatically supplied value to this type.
    ///
    /// Integers widen to floats and numeric text is parsed; anything else
    /// that does not fit is an [`DatError::InvalidValue`].
    pub fn coerce(self, value: Value) -> Result<Value> {
        match (self, value) {
            (DataType::Text | DataType::Constant, v) => Ok(Value::Text(v.to_string())),
            (DataType::Int, Value::Int(v)) => Ok(Value::Int(v)),
            (DataType::Float, Value::Float(v)) => Ok(Value::Float(v)),
            (DataType::Float, Value::Int(v)) => Ok(Value::Float(v as f64)),
            (dtype, Value::Text(s)) => dtype
                .parse(&s)
                .map_err(|_| DatError::InvalidValue(format!("'{}' is not a valid {:?} value", s, dtype))),
            (dtype, v) => Err(DatError::InvalidValue(format!(
                "{} is not a valid {:?} value",
                v, dtype
            ))),
        }
    }

    /// Check if values of this type can be ordered numerically
    pub fn is_numeric(self) -> bool {
        matches!(self, DataType::Int | DataType::Float)
    }
}
