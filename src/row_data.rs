//! Columnar row data held by units
//!
//! A [`RowDataCollection`] is an ordered set of equally long columns
//! ([`RowDataObject`]), e.g. the elevation/time pairs of a boundary unit.
//! Columns may carry an update callback that is run against every candidate
//! value before the collection mutates; this is how ordering keys such as
//! chainage or time stay strictly increasing.

use crate::error::{DatError, Result};
use crate::types::{DataType, FieldFormat, Value};
use indexmap::IndexMap;
use std::fmt;

/// Values for one row, keyed by column
pub type RowValues = IndexMap<String, Value>;

/// Build a [`RowValues`] map from `(key, value)` pairs.
pub fn row_values<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> RowValues
where
    K: Into<String>,
    V: Into<Value>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Where a candidate value is about to be placed in a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowMutation {
    /// Inserted before the given index (index == len appends)
    Insert(usize),
    /// Replaces the value at the given index
    Replace(usize),
}

/// Values adjacent to a mutation position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbors<'a> {
    /// Value that will precede the candidate
    pub previous: Option<&'a Value>,
    /// Value that will follow the candidate
    pub next: Option<&'a Value>,
}

/// Check run on a candidate value before it is stored in a column
pub type UpdateCallback = fn(&RowDataObject, &Value, RowMutation) -> Result<()>;

/// One typed column of row data
#[derive(Clone)]
pub struct RowDataObject {
    key: String,
    dtype: DataType,
    format: FieldFormat,
    decimals: Option<usize>,
    default: Option<Value>,
    update_callback: Option<UpdateCallback>,
    values: Vec<Value>,
}

impl RowDataObject {
    /// Create an empty column
    pub fn new(key: impl Into<String>, dtype: DataType, format: FieldFormat) -> Self {
        RowDataObject {
            key: key.into(),
            dtype,
            format,
            decimals: None,
            default: None,
            update_callback: None,
            values: Vec::new(),
        }
    }

    /// Float column right-justified in 10 characters
    pub fn float(key: impl Into<String>, decimals: usize) -> Self {
        Self::new(key, DataType::Float, FieldFormat::RIGHT_10).with_decimals(decimals)
    }

    /// Integer column right-justified in 10 characters
    pub fn int(key: impl Into<String>) -> Self {
        Self::new(key, DataType::Int, FieldFormat::RIGHT_10)
    }

    /// Text column right-justified in 10 characters
    pub fn text(key: impl Into<String>) -> Self {
        Self::new(key, DataType::Text, FieldFormat::RIGHT_10)
    }

    /// Set the number of decimals floats are written with
    pub fn with_decimals(mut self, decimals: usize) -> Self {
        self.decimals = Some(decimals);
        self
    }

    /// Value used when a new row does not supply this column
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Install the check run before any value is set
    pub fn with_update_callback(mut self, callback: UpdateCallback) -> Self {
        self.update_callback = Some(callback);
        self
    }

    /// Column key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Column data type
    pub fn dtype(&self) -> DataType {
        self.dtype
    }

    /// Number of values in the column
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the column holds no values
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at `index`, if present
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Value at `index`
    pub fn value(&self, index: usize) -> Result<&Value> {
        self.values.get(index).ok_or(DatError::IndexOutOfRange {
            index,
            len: self.values.len(),
        })
    }

    /// All values in row order
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Check if the column validates values before they are set
    pub fn has_update_callback(&self) -> bool {
        self.update_callback.is_some()
    }

    /// Values either side of a mutation position.
    ///
    /// For an insert the candidate sits between `index - 1` and the value
    /// currently at `index`; for a replace it sits between `index - 1` and
    /// `index + 1`.
    pub fn neighbors(&self, mutation: RowMutation) -> Neighbors<'_> {
        let (index, next) = match mutation {
            RowMutation::Insert(i) => (i, self.values.get(i)),
            RowMutation::Replace(i) => (i, self.values.get(i + 1)),
        };
        let previous = index.checked_sub(1).and_then(|i| self.values.get(i));
        Neighbors { previous, next }
    }

    /// Value at `index` rendered into its fixed-width column
    pub fn format_value(&self, index: usize) -> Result<String> {
        let value = self.value(index)?;
        Ok(self.format.render(value, self.decimals))
    }

    /// Coerce a candidate and run the update callback against it
    fn validate(&self, value: Value, mutation: RowMutation) -> Result<Value> {
        let value = self.dtype.coerce(value)?;
        if let Some(callback) = self.update_callback {
            callback(self, &value, mutation)?;
        }
        Ok(value)
    }
}

impl fmt::Debug for RowDataObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowDataObject")
            .field("key", &self.key)
            .field("dtype", &self.dtype)
            .field("format", &self.format)
            .field("decimals", &self.decimals)
            .field("default", &self.default)
            .field("update_callback", &self.update_callback.is_some())
            .field("values", &self.values)
            .finish()
    }
}

/// Ordered collection of equally long columns
#[derive(Debug, Clone, Default)]
pub struct RowDataCollection {
    columns: IndexMap<String, RowDataObject>,
}

impl RowDataCollection {
    /// Create an empty collection with no columns
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collection from column definitions, in output order
    pub fn bulk_init(columns: impl IntoIterator<Item = RowDataObject>) -> Self {
        RowDataCollection {
            columns: columns
                .into_iter()
                .map(|c| (c.key.clone(), c))
                .collect(),
        }
    }

    /// Column keys in output order
    pub fn column_keys(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Number of rows
    pub fn number_of_rows(&self) -> usize {
        self.columns.values().map(RowDataObject::len).max().unwrap_or(0)
    }

    /// Column by key
    pub fn data_object(&self, key: &str) -> Result<&RowDataObject> {
        self.columns.get(key).ok_or_else(|| unknown_field(key))
    }

    /// Value of one column at `index`
    pub fn value(&self, key: &str, index: usize) -> Result<&Value> {
        self.data_object(key)?.value(index)
    }

    /// Every value of one column, in row order
    pub fn values(&self, key: &str) -> Result<Vec<Value>> {
        Ok(self.data_object(key)?.values().to_vec())
    }

    /// Snapshot of one row across all columns
    pub fn row(&self, index: usize) -> Result<RowValues> {
        self.check_index(index)?;
        self.columns
            .iter()
            .map(|(key, column)| Ok((key.clone(), column.value(index)?.clone())))
            .collect()
    }

    /// Insert a row before `index`, or append when `index` is `None` or past
    /// the last row.
    ///
    /// Every candidate value is validated before any column changes, so a
    /// rejected row leaves the collection untouched.
    pub fn add_row(&mut self, values: &RowValues, index: Option<usize>) -> Result<()> {
        self.check_keys(values)?;
        let rows = self.number_of_rows();
        let index = match index {
            Some(i) if i < rows => i,
            _ => rows,
        };

        let mut staged = Vec::with_capacity(self.columns.len());
        for (key, column) in &self.columns {
            let candidate = match values.get(key).or(column.default.as_ref()) {
                Some(v) => v.clone(),
                None => {
                    return Err(DatError::InvalidValue(format!(
                        "No value given for column {}",
                        key
                    )))
                }
            };
            staged.push(column.validate(candidate, RowMutation::Insert(index))?);
        }

        for (column, value) in self.columns.values_mut().zip(staged) {
            column.values.insert(index, value);
        }
        Ok(())
    }

    /// Replace the supplied columns of the row at `index`.
    ///
    /// Columns missing from `values` keep their current value. Validation is
    /// atomic as for [`RowDataCollection::add_row`].
    pub fn update_row(&mut self, values: &RowValues, index: usize) -> Result<()> {
        self.check_keys(values)?;
        self.check_index(index)?;

        let mut staged = Vec::with_capacity(values.len());
        for (key, value) in values {
            let column = self.data_object(key)?;
            staged.push((key, column.validate(value.clone(), RowMutation::Replace(index))?));
        }

        for (key, value) in staged {
            if let Some(column) = self.columns.get_mut(key) {
                column.values[index] = value;
            }
        }
        Ok(())
    }

    /// Remove the row at `index`
    pub fn delete_row(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        for column in self.columns.values_mut() {
            column.values.remove(index);
        }
        Ok(())
    }

    /// Append raw column text to one column without running callbacks.
    ///
    /// Used while reading trusted file content; callers must push one value
    /// to every column per row.
    pub fn push_raw(&mut self, key: &str, raw: &str) -> Result<()> {
        let column = self.columns.get_mut(key).ok_or_else(|| unknown_field(key))?;
        let value = column.dtype.parse(raw)?;
        column.values.push(value);
        Ok(())
    }

    /// Row at `index` formatted as one line of fixed-width columns
    pub fn printable_row(&self, index: usize) -> Result<String> {
        self.check_index(index)?;
        self.columns
            .values()
            .map(|column| column.format_value(index))
            .collect()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        let len = self.number_of_rows();
        if index >= len {
            return Err(DatError::IndexOutOfRange { index, len });
        }
        Ok(())
    }

    fn check_keys(&self, values: &RowValues) -> Result<()> {
        match values.keys().find(|k| !self.columns.contains_key(k.as_str())) {
            Some(key) => Err(unknown_field(key)),
            None => Ok(()),
        }
    }
}

fn unknown_field(key: &str) -> DatError {
    tracing::warn!(key, "Key {} does not exist in collection", key);
    DatError::UnknownField(key.to_string())
}
