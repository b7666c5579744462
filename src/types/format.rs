//! Fixed-width column formatting

use super::Value;

/// Side of the column a value is padded towards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    /// Pad on the right (`{:<N}`)
    Left,
    /// Pad on the left (`{:>N}`)
    Right,
}

/// Output template for one fixed-width column.
///
/// A width of zero writes the value unpadded. Values wider than the column
/// are never truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldFormat {
    /// Column width in characters
    pub width: usize,
    /// Padding side
    pub alignment: Alignment,
}

impl FieldFormat {
    /// Unpadded output
    pub const NONE: FieldFormat = FieldFormat {
        width: 0,
        alignment: Alignment::Left,
    };

    /// The standard `.dat` numeric column: right-justified in 10 characters
    pub const RIGHT_10: FieldFormat = FieldFormat::right(10);

    /// Right-justified column of the given width
    pub const fn right(width: usize) -> Self {
        FieldFormat {
            width,
            alignment: Alignment::Right,
        }
    }

    /// Left-justified column of the given width
    pub const fn left(width: usize) -> Self {
        FieldFormat {
            width,
            alignment: Alignment::Left,
        }
    }

    /// Pad already-rendered text to the column width
    pub fn pad(&self, text: &str) -> String {
        let width = self.width;
        match self.alignment {
            Alignment::Left => format!("{:<width$}", text),
            Alignment::Right => format!("{:>width$}", text),
        }
    }

    /// Render a value, applying `decimals` to floats, and pad it
    pub fn render(&self, value: &Value, decimals: Option<usize>) -> String {
        let text = match (value, decimals) {
            (Value::Float(v), Some(dps)) => format!("{:.*}", dps, v),
            (v, _) => v.to_string(),
        };
        self.pad(&text)
    }
}

impl Default for FieldFormat {
    fn default() -> Self {
        FieldFormat::NONE
    }
}
