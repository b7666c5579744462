//! Global parameters block at the top of a `.dat` file

use super::{column, DatUnit, UnitCommon};
use crate::error::{DatError, Result};
use crate::head_data::HeadDataItem;
use crate::types::{DataType, FieldFormat, Value};
use std::collections::HashMap;

/// Layout of one header field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderField {
    /// Field name
    pub name: &'static str,
    /// Line within the header block
    pub line: usize,
    /// Column index within the line
    pub column: usize,
    /// Character range, or `None` for the whole line
    pub chars: Option<(usize, usize)>,
    /// Value type
    pub dtype: DataType,
    /// Decimal places for floats
    pub decimals: Option<usize>,
}

const fn field(
    name: &'static str,
    line: usize,
    column: usize,
    chars: Option<(usize, usize)>,
    dtype: DataType,
    decimals: Option<usize>,
) -> HeaderField {
    HeaderField { name, line, column, chars, dtype, decimals }
}

/// Header fields in write order
pub const HEADER_FIELDS: [HeaderField; 16] = [
    field("name", 0, 0, None, DataType::Text, None),
    field("revision", 1, 0, None, DataType::Text, None),
    field("node_count", 2, 0, Some((0, 10)), DataType::Int, None),
    field("fr_lower", 2, 1, Some((10, 20)), DataType::Float, Some(3)),
    field("fr_upper", 2, 2, Some((20, 30)), DataType::Float, Some(3)),
    field("min_depth", 2, 3, Some((30, 40)), DataType::Float, Some(3)),
    field("direct_method", 2, 4, Some((40, 50)), DataType::Float, Some(3)),
    field("unknown", 2, 5, Some((50, 60)), DataType::Text, None),
    field("water_temp", 3, 0, Some((0, 10)), DataType::Float, Some(3)),
    field("flow", 3, 1, Some((10, 20)), DataType::Float, Some(3)),
    field("head", 3, 2, Some((20, 30)), DataType::Float, Some(3)),
    field("math_damp", 3, 3, Some((30, 40)), DataType::Float, Some(3)),
    field("pivot", 3, 4, Some((40, 50)), DataType::Float, Some(3)),
    field("relax", 3, 5, Some((50, 60)), DataType::Float, Some(3)),
    field("dummy", 3, 6, Some((60, 70)), DataType::Float, Some(3)),
    field("roughness", 5, 0, None, DataType::Text, None),
];

/// Name of the field written after the `RAD FILE` marker
const ROUGHNESS: &str = "roughness";

/// Number of lines in the header block
pub const HEADER_LINES: usize = 7;

impl HeaderField {
    fn format(&self) -> FieldFormat {
        if self.name == "name" {
            FieldFormat::NONE
        } else {
            FieldFormat::RIGHT_10
        }
    }

    fn item(&self, raw: &str) -> Result<HeadDataItem> {
        HeadDataItem::from_raw(raw, self.format(), (self.line, self.column), self.dtype, self.decimals)
    }
}

/// The single global-parameters unit at the top of every `.dat` file.
///
/// Holds the model title, node count, matrix coefficients, water temperature
/// and the roughness file path.
#[derive(Debug, Clone)]
pub struct HeaderUnit {
    /// Common unit data
    pub common: UnitCommon,
    fields: HashMap<&'static str, HeadDataItem>,
}

impl HeaderUnit {
    /// Unit type name
    pub const UNIT_TYPE: &'static str = "header";
    /// Unit category name
    pub const UNIT_CATEGORY: &'static str = "meta";

    /// Create a header with every field at its type default
    pub fn new() -> Self {
        let fields = HEADER_FIELDS
            .iter()
            .map(|f| {
                let mut item = HeadDataItem::new(f.dtype, f.format(), f.line, f.column);
                if let Some(dps) = f.decimals {
                    item = item.with_decimals(dps);
                }
                (f.name, item)
            })
            .collect();
        HeaderUnit {
            common: UnitCommon::with_name("header"),
            fields,
        }
    }

    /// Field by name
    pub fn field(&self, name: &str) -> Result<&HeadDataItem> {
        self.fields.get(name).ok_or_else(|| unknown_field(name))
    }

    /// Mutable field by name
    pub fn field_mut(&mut self, name: &str) -> Result<&mut HeadDataItem> {
        self.fields.get_mut(name).ok_or_else(|| unknown_field(name))
    }

    /// Set a field from a typed value
    pub fn set_field(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        self.field_mut(name)?.set_value(value)
    }

    /// Fields in write order
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &HeadDataItem)> + '_ {
        HEADER_FIELDS
            .iter()
            .filter_map(move |f| self.fields.get(f.name).map(|item| (f.name, item)))
    }

    /// Model title from the first line
    pub fn title(&self) -> &str {
        self.fields
            .get("name")
            .and_then(HeadDataItem::as_str)
            .unwrap_or_default()
    }

    /// Number of nodes in the model
    pub fn node_count(&self) -> i64 {
        self.fields
            .get("node_count")
            .and_then(|f| f.value().as_i64())
            .unwrap_or_default()
    }

    /// Water temperature
    pub fn water_temp(&self) -> f64 {
        self.fields
            .get("water_temp")
            .and_then(HeadDataItem::as_f64)
            .unwrap_or_default()
    }

    /// Path of the roughness file
    pub fn roughness(&self) -> &str {
        self.fields
            .get(ROUGHNESS)
            .and_then(HeadDataItem::as_str)
            .unwrap_or_default()
    }
}

impl Default for HeaderUnit {
    fn default() -> Self {
        Self::new()
    }
}

fn unknown_field(name: &str) -> DatError {
    tracing::warn!(key = name, "Key {} does not exist in header", name);
    DatError::UnknownField(name.to_string())
}

impl DatUnit for HeaderUnit {
    fn common(&self) -> &UnitCommon { &self.common }
    fn common_mut(&mut self) -> &mut UnitCommon { &mut self.common }
    fn unit_type(&self) -> &'static str { Self::UNIT_TYPE }
    fn unit_category(&self) -> &'static str { Self::UNIT_CATEGORY }

    fn read(&mut self, lines: &[String], cursor: usize) -> Result<usize> {
        let block = lines.get(cursor..cursor + HEADER_LINES).ok_or_else(|| {
            DatError::Parse(format!(
                "Header needs {} lines from line {} but the file has {}",
                HEADER_LINES,
                cursor,
                lines.len()
            ))
        })?;

        let mut fields = HashMap::with_capacity(HEADER_FIELDS.len());
        for f in &HEADER_FIELDS {
            let line = &block[f.line];
            let raw = match f.chars {
                Some((start, end)) => column(line, start, end),
                None => line.clone(),
            };
            let item = f.item(&raw).map_err(|e| {
                DatError::Parse(format!("Header field {} on line {}: {}", f.name, cursor + f.line, e))
            })?;
            fields.insert(f.name, item);
        }
        self.fields = fields;
        Ok(cursor + HEADER_LINES)
    }

    fn write(&self) -> Vec<String> {
        let joined: String = self
            .fields()
            .filter(|(name, _)| *name != ROUGHNESS)
            .map(|(_, item)| item.format_with_break())
            .collect();

        let mut out: Vec<String> = joined.split('\n').map(str::to_string).collect();
        out.push("RAD FILE".to_string());
        out.push(self.fields.get(ROUGHNESS).map(HeadDataItem::format).unwrap_or_default());
        out.push("END GENERAL".to_string());
        out
    }
}
