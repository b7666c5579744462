//! `.dat` unit types and the contract they share
//!
//! Every block of a `.dat` file is modelled as a unit implementing
//! [`DatUnit`]. A unit is created empty, populated once by
//! [`DatUnit::read`], edited through the row accessors, and written back
//! with [`DatUnit::write`].

use crate::error::{DatError, Result};
use crate::row_data::{RowDataCollection, RowDataObject, RowMutation, RowValues};
use crate::types::Value;
use indexmap::IndexMap;
use std::fmt;

pub mod comment;
pub mod header;
pub mod htbdy;
pub mod unknown;

pub use comment::CommentUnit;
pub use header::{HeaderField, HeaderUnit, HEADER_FIELDS};
pub use htbdy::HtbdyUnit;
pub use unknown::UnknownUnit;

/// Key of the row collection most units keep their rows in
pub const MAIN_ROWS: &str = "main";

/// Row collections of a unit, keyed by collection name
pub type RowData = IndexMap<String, RowDataCollection>;

/// Base trait for all `.dat` units
pub trait DatUnit: fmt::Debug {
    /// Shared identity and row storage
    fn common(&self) -> &UnitCommon;

    /// Mutable shared identity and row storage
    fn common_mut(&mut self) -> &mut UnitCommon;

    /// Unit type, e.g. `"htbdy"`
    fn unit_type(&self) -> &'static str;

    /// Unit category, e.g. `"boundary_ds"` for an HTBDY unit
    fn unit_category(&self) -> &'static str;

    /// Read the unit from `lines`, starting at `cursor`.
    ///
    /// Returns the index of the line immediately after the last line the
    /// unit consumed.
    fn read(&mut self, lines: &[String], cursor: usize) -> Result<usize>;

    /// Lines representing the current state, formatted for the `.dat` file
    fn write(&self) -> Vec<String>;

    /// Independent deep copy of the unit
    fn copy(&self) -> Self
    where
        Self: Sized + Clone,
    {
        self.clone()
    }

    /// Unit label
    fn name(&self) -> &str {
        &self.common().name
    }

    /// Set the unit label
    fn set_name(&mut self, name: String) {
        self.common_mut().name = name;
    }

    /// Downstream unit label
    fn name_ds(&self) -> &str {
        &self.common().name_ds
    }

    /// Set the downstream unit label
    fn set_name_ds(&mut self, name: String) {
        self.common_mut().name_ds = name;
    }

    /// Initial condition labels carried by the unit
    fn ic_labels(&self) -> Vec<String> {
        Vec::new()
    }

    /// Check if the unit carries initial condition labels
    fn has_ic_labels(&self) -> bool {
        !self.ic_labels().is_empty()
    }

    /// Check if the unit holds any row collections
    fn has_row_data(&self) -> bool {
        !self.common().row_data.is_empty()
    }

    /// Row collection by key
    fn row_collection(&self, collection_key: &str) -> Result<&RowDataCollection> {
        if !self.has_row_data() {
            return Err(not_applicable(self.unit_type()));
        }
        self.common()
            .row_data
            .get(collection_key)
            .ok_or_else(|| DatError::UnknownCollection(collection_key.to_string()))
    }

    /// Mutable row collection by key
    fn row_collection_mut(&mut self, collection_key: &str) -> Result<&mut RowDataCollection> {
        if !self.has_row_data() {
            return Err(not_applicable(self.unit_type()));
        }
        self.common_mut()
            .row_data
            .get_mut(collection_key)
            .ok_or_else(|| DatError::UnknownCollection(collection_key.to_string()))
    }

    /// Column of a row collection
    fn row_data_object(&self, field_key: &str, collection_key: &str) -> Result<&RowDataObject> {
        self.row_collection(collection_key)?.data_object(field_key)
    }

    /// Value of one column at `index`
    fn row_value(&self, field_key: &str, index: usize, collection_key: &str) -> Result<Value> {
        self.row_collection(collection_key)?
            .value(field_key, index)
            .cloned()
    }

    /// Every value of one column, in row order
    fn row_values(&self, field_key: &str, collection_key: &str) -> Result<Vec<Value>> {
        self.row_collection(collection_key)?.values(field_key)
    }

    /// Snapshot of one row across all columns
    fn row(&self, index: usize, collection_key: &str) -> Result<RowValues> {
        self.row_collection(collection_key)?.row(index)
    }

    /// Number of rows in a collection
    fn number_of_rows(&self, collection_key: &str) -> Result<usize> {
        Ok(self.row_collection(collection_key)?.number_of_rows())
    }

    /// Remove the row at `index`
    fn delete_row(&mut self, index: usize, collection_key: &str) -> Result<()> {
        self.row_collection_mut(collection_key)?.delete_row(index)
    }

    /// Insert a row before `index`; `None` or an index past the last row
    /// appends.
    fn add_row(&mut self, values: &RowValues, collection_key: &str, index: Option<usize>) -> Result<()> {
        self.row_collection_mut(collection_key)?.add_row(values, index)
    }

    /// Replace the given columns of the row at `index`
    fn update_row(&mut self, values: &RowValues, index: usize, collection_key: &str) -> Result<()> {
        self.row_collection_mut(collection_key)?.update_row(values, index)
    }
}

fn not_applicable(unit_type: &str) -> DatError {
    DatError::NotApplicable {
        unit_type: unit_type.to_string(),
    }
}

/// Identity and row storage shared by all units
#[derive(Debug, Clone)]
pub struct UnitCommon {
    /// Unit label
    pub name: String,
    /// Downstream unit label
    pub name_ds: String,
    /// Row collections; empty when the unit has no rows
    pub row_data: RowData,
}

impl UnitCommon {
    /// Create common data with the placeholder labels
    pub fn new() -> Self {
        UnitCommon {
            name: "unknown".to_string(),
            name_ds: "unknown".to_string(),
            row_data: RowData::new(),
        }
    }

    /// Create with a specific label
    pub fn with_name(name: impl Into<String>) -> Self {
        UnitCommon {
            name: name.into(),
            ..Self::new()
        }
    }
}

impl Default for UnitCommon {
    fn default() -> Self {
        Self::new()
    }
}

/// Check that `value` may be inserted at `index` of an ordering column.
///
/// The value must be strictly greater than the value before `index` and
/// strictly less than the value currently at `index`. `None` checks the
/// append position, where only the previous value applies.
pub fn check_increases(column: &RowDataObject, value: &Value, index: Option<usize>) -> Result<()> {
    let index = index.unwrap_or(column.len());
    increasing_callback(column, value, RowMutation::Insert(index))
}

/// Update callback keeping a column strictly increasing.
///
/// Install with [`RowDataObject::with_update_callback`].
pub fn increasing_callback(column: &RowDataObject, value: &Value, mutation: RowMutation) -> Result<()> {
    let v = value.as_f64().ok_or_else(|| {
        DatError::InvalidValue(format!("Ordering value {} of {} is not numeric", value, column.key()))
    })?;
    if !v.is_finite() {
        return Err(DatError::InvalidValue(format!(
            "Ordering value {} of {} is not finite",
            v,
            column.key()
        )));
    }
    let neighbors = column.neighbors(mutation);
    let previous = neighbors.previous.and_then(Value::as_f64);
    let next = neighbors.next.and_then(Value::as_f64);

    if matches!(previous, Some(p) if p.is_nan() || v <= p)
        || matches!(next, Some(n) if n.is_nan() || v >= n)
    {
        tracing::debug!(column = column.key(), value = v, "rejected ordering value");
        return Err(DatError::OrderingViolation {
            value: v,
            previous,
            next,
        });
    }
    Ok(())
}

/// Characters `start..end` of a line; columns past the end are empty.
pub(crate) fn column(line: &str, start: usize, end: usize) -> String {
    line.chars().skip(start).take(end.saturating_sub(start)).collect()
}

/// Line at `index`, or a parse error naming the unit being read
pub(crate) fn line_at<'a>(lines: &'a [String], index: usize, unit: &str) -> Result<&'a str> {
    lines.get(index).map(String::as_str).ok_or_else(|| {
        DatError::Parse(format!(
            "Unexpected end of file reading {} unit at line {}",
            unit, index
        ))
    })
}

/// Enumeration of all unit types for type-safe storage
#[derive(Debug, Clone)]
pub enum Unit {
    /// Global parameters at the top of the file
    Header(HeaderUnit),
    /// Free text comment block
    Comment(CommentUnit),
    /// Head-time boundary
    Htbdy(HtbdyUnit),
    /// Block with no dedicated unit type
    Unknown(UnknownUnit),
}

impl Unit {
    /// Get a reference to the unit trait object
    pub fn as_unit(&self) -> &dyn DatUnit {
        match self {
            Unit::Header(u) => u,
            Unit::Comment(u) => u,
            Unit::Htbdy(u) => u,
            Unit::Unknown(u) => u,
        }
    }

    /// Get a mutable reference to the unit trait object
    pub fn as_unit_mut(&mut self) -> &mut dyn DatUnit {
        match self {
            Unit::Header(u) => u,
            Unit::Comment(u) => u,
            Unit::Htbdy(u) => u,
            Unit::Unknown(u) => u,
        }
    }
}

impl From<HeaderUnit> for Unit {
    fn from(unit: HeaderUnit) -> Self {
        Unit::Header(unit)
    }
}

impl From<CommentUnit> for Unit {
    fn from(unit: CommentUnit) -> Self {
        Unit::Comment(unit)
    }
}

impl From<HtbdyUnit> for Unit {
    fn from(unit: HtbdyUnit) -> Self {
        Unit::Htbdy(unit)
    }
}

impl From<UnknownUnit> for Unit {
    fn from(unit: UnknownUnit) -> Self {
        Unit::Unknown(unit)
    }
}
