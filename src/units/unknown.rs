//! Unknown unit for round-trip preservation.
//!
//! Any block of the file with no dedicated unit type is held here verbatim
//! and written back byte for byte. The unit understands nothing about the
//! text it carries.

use super::{DatUnit, UnitCommon};
use crate::error::{DatError, Result};
use crate::types::UnitIdGenerator;

/// A block of `.dat` text whose unit type is not supported.
#[derive(Debug, Clone)]
pub struct UnknownUnit {
    /// Common unit data
    pub common: UnitCommon,
    lines: Vec<String>,
}

impl UnknownUnit {
    /// Unit type name
    pub const UNIT_TYPE: &'static str = "unknown";
    /// Unit category name
    pub const UNIT_CATEGORY: &'static str = "unknown";

    /// Create an empty unknown unit named `unknown_<n>`.
    ///
    /// The raw text carries no usable label, so the name is drawn from the
    /// session generator.
    pub fn new(ids: &mut UnitIdGenerator) -> Self {
        UnknownUnit {
            common: UnitCommon::with_name(ids.next_name("unknown")),
            lines: Vec::new(),
        }
    }

    /// The preserved lines
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl DatUnit for UnknownUnit {
    fn common(&self) -> &UnitCommon { &self.common }
    fn common_mut(&mut self) -> &mut UnitCommon { &mut self.common }
    fn unit_type(&self) -> &'static str { Self::UNIT_TYPE }
    fn unit_category(&self) -> &'static str { Self::UNIT_CATEGORY }

    /// Store every line from `cursor` to the end of `lines`
    fn read(&mut self, lines: &[String], cursor: usize) -> Result<usize> {
        let remaining = lines.get(cursor..).ok_or_else(|| {
            DatError::Parse(format!(
                "Unknown unit cursor {} is past the end of {} lines",
                cursor,
                lines.len()
            ))
        })?;
        self.lines = remaining.to_vec();
        Ok(lines.len())
    }

    fn write(&self) -> Vec<String> {
        self.lines.clone()
    }
}
