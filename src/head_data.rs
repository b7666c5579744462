//! Fixed-position header fields
//!
//! A [`HeadDataItem`] is one typed scalar that lives at a known
//! (line, column) position inside a unit's block of header lines. It knows
//! how to parse itself from the raw column text and how to render itself
//! back into a fixed-width column.

use crate::error::{DatError, Result};
use crate::types::{DataType, FieldFormat, Value};

/// A single typed header value with its output template and position.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadDataItem {
    value: Value,
    format: FieldFormat,
    line: usize,
    column: usize,
    dtype: DataType,
    decimals: Option<usize>,
    choices: Option<&'static [&'static str]>,
}

impl HeadDataItem {
    /// Create a field holding the default value for its type
    pub fn new(dtype: DataType, format: FieldFormat, line: usize, column: usize) -> Self {
        let value = match dtype {
            DataType::Int => Value::Int(0),
            DataType::Float => Value::Float(0.0),
            DataType::Text | DataType::Constant => Value::Text(String::new()),
        };
        HeadDataItem {
            value,
            format,
            line,
            column,
            dtype,
            decimals: None,
            choices: None,
        }
    }

    /// Create a field by parsing raw column text
    pub fn from_raw(
        raw: &str,
        format: FieldFormat,
        position: (usize, usize),
        dtype: DataType,
        decimals: Option<usize>,
    ) -> Result<Self> {
        let mut item = HeadDataItem::new(dtype, format, position.0, position.1);
        item.decimals = decimals;
        item.set_raw(raw)?;
        Ok(item)
    }

    /// Set the number of decimal places floats are written with
    pub fn with_decimals(mut self, decimals: usize) -> Self {
        self.decimals = Some(decimals);
        self
    }

    /// Restrict the field to a fixed list of keywords
    pub fn with_choices(mut self, choices: &'static [&'static str]) -> Self {
        self.choices = Some(choices);
        self
    }

    /// Set the initial value without validation.
    ///
    /// Only for defaults known to fit the field's type and choices.
    pub(crate) fn with_initial(mut self, value: Value) -> Self {
        self.value = value;
        self
    }

    /// Replace the initial value, validating it
    pub fn with_value(mut self, value: impl Into<Value>) -> Result<Self> {
        self.set_value(value)?;
        Ok(self)
    }

    /// The stored typed value
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The stored value as a float, if numeric
    pub fn as_f64(&self) -> Option<f64> {
        self.value.as_f64()
    }

    /// The stored value as text, if textual
    pub fn as_str(&self) -> Option<&str> {
        self.value.as_str()
    }

    /// Set the value from a typed value, converting it to the field type
    pub fn set_value(&mut self, value: impl Into<Value>) -> Result<()> {
        let value = self.dtype.coerce(value.into())?;
        self.check_choice(&value)?;
        self.value = value;
        Ok(())
    }

    /// Set the value by parsing raw column text
    pub fn set_raw(&mut self, raw: &str) -> Result<()> {
        let value = self.dtype.parse(raw)?;
        self.check_choice(&value)?;
        self.value = value;
        Ok(())
    }

    fn check_choice(&self, value: &Value) -> Result<()> {
        if let (Some(choices), Value::Text(s)) = (self.choices, value) {
            if !choices.contains(&s.as_str()) {
                return Err(DatError::InvalidValue(format!(
                    "'{}' is not one of {:?}",
                    s, choices
                )));
            }
        }
        Ok(())
    }

    /// The field's data type
    pub fn dtype(&self) -> DataType {
        self.dtype
    }

    /// (line, column) position of the field within its unit block
    pub fn position(&self) -> (usize, usize) {
        (self.line, self.column)
    }

    /// Allowed keywords, for constant fields
    pub fn choices(&self) -> Option<&'static [&'static str]> {
        self.choices
    }

    /// Render the value into its fixed-width column
    pub fn format(&self) -> String {
        self.format.render(&self.value, self.decimals)
    }

    /// Render the value, prefixed with a line break when the field opens a
    /// new physical line.
    ///
    /// Joining the output of consecutive fields and splitting on `'\n'`
    /// rebuilds the unit's lines.
    pub fn format_with_break(&self) -> String {
        if self.line > 0 && self.column == 0 {
            format!("\n{}", self.format())
        } else {
            self.format()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_float() {
        let item = HeadDataItem::from_raw("   0.750", FieldFormat::RIGHT_10, (2, 1), DataType::Float, Some(3))
            .unwrap();
        assert_eq!(item.value(), &Value::Float(0.75));
        assert_eq!(item.format(), "     0.750");
        assert_eq!(item.position(), (2, 1));
    }

    #[test]
    fn test_from_raw_bad_int() {
        let result = HeadDataItem::from_raw("x", FieldFormat::RIGHT_10, (2, 0), DataType::Int, None);
        assert!(matches!(result, Err(DatError::Parse(_))));
    }

    #[test]
    fn test_format_with_break() {
        let first = HeadDataItem::from_raw("136", FieldFormat::RIGHT_10, (2, 0), DataType::Int, None).unwrap();
        let second = HeadDataItem::from_raw("0.9", FieldFormat::RIGHT_10, (2, 1), DataType::Float, Some(3)).unwrap();
        let title = HeadDataItem::from_raw("Model", FieldFormat::NONE, (0, 0), DataType::Text, None).unwrap();
        assert_eq!(first.format_with_break(), "\n       136");
        assert_eq!(second.format_with_break(), "     0.900");
        assert_eq!(title.format_with_break(), "Model");
    }

    #[test]
    fn test_choices_enforced() {
        let mut item = HeadDataItem::new(DataType::Constant, FieldFormat::RIGHT_10, 2, 2)
            .with_choices(&["LINEAR", "SPLINE"])
            .with_value("LINEAR")
            .unwrap();
        assert!(item.set_raw("SPLINE").is_ok());
        assert!(matches!(item.set_value("CUBIC"), Err(DatError::InvalidValue(_))));
        assert_eq!(item.as_str(), Some("SPLINE"));
    }

    #[test]
    fn test_set_value_coerces() {
        let mut item = HeadDataItem::new(DataType::Float, FieldFormat::RIGHT_10, 3, 0).with_decimals(3);
        item.set_value(10).unwrap();
        assert_eq!(item.format(), "    10.000");
    }
}
