//! HTBDY (head-time boundary) unit

use super::{column, increasing_callback, line_at, DatUnit, UnitCommon, MAIN_ROWS};
use crate::error::{DatError, Result};
use crate::head_data::HeadDataItem;
use crate::row_data::{RowDataCollection, RowDataObject, RowValues};
use crate::types::{DataType, FieldFormat, Value};
use nom::branch::alt;
use nom::bytes::complete::{is_not, tag};
use nom::character::complete::{digit1, space0, space1};
use nom::combinator::{eof, map_res, opt};
use nom::sequence::preceded;
use nom::IResult;

/// Time units an HTBDY series may be given in
pub const TIME_UNITS: [&str; 12] = [
    "SECONDS",
    "MINUTES",
    "HOURS",
    "DAYS",
    "WEEKS",
    "FORTNIGHTS",
    "LUNAR MONTHS",
    "MONTHS",
    "QUARTERS",
    "YEARS",
    "DECADES",
    "USER SET",
];

/// How the series is continued past its last time
pub const EXTENDING_METHODS: [&str; 3] = ["EXTEND", "NOEXTEND", "REPEAT"];

/// Interpolation between series points
pub const INTERPOLATIONS: [&str; 2] = ["LINEAR", "SPLINE"];

const USER_SET: &str = "USER SET";
const LUNAR_MONTHS: &str = "LUNAR MONTHS";

/// Tokens of the third HTBDY line
#[derive(Debug, PartialEq)]
struct ParameterLine<'a> {
    rows: usize,
    time_units: Option<&'a str>,
    extending_method: Option<&'a str>,
    interpolation: Option<&'a str>,
}

fn token(input: &str) -> IResult<&str, &str> {
    is_not(" \t")(input)
}

fn parameter_line(input: &str) -> IResult<&str, ParameterLine<'_>> {
    let (input, rows) = preceded(space0, map_res(digit1, |s: &str| s.parse::<usize>()))(input)?;
    let (input, time_units) = opt(preceded(space1, alt((tag(LUNAR_MONTHS), token))))(input)?;
    let (input, extending_method) = opt(preceded(space1, token))(input)?;
    let (input, interpolation) = opt(preceded(space1, token))(input)?;
    let (input, _) = space0(input)?;
    let (input, _) = eof(input)?;
    Ok((
        input,
        ParameterLine {
            rows,
            time_units,
            extending_method,
            interpolation,
        },
    ))
}

/// Downstream boundary giving water level against time.
///
/// ```text
/// HTBDY #comment
/// DS_BDY
///          3          HOURS    EXTEND    LINEAR
///      2.500     0.000
///      3.100     1.000
///      2.800     2.000
/// ```
#[derive(Debug, Clone)]
pub struct HtbdyUnit {
    /// Common unit data
    pub common: UnitCommon,
    comment: HeadDataItem,
    multiplier: HeadDataItem,
    time_units: HeadDataItem,
    extending_method: HeadDataItem,
    interpolation: HeadDataItem,
}

impl HtbdyUnit {
    /// Unit type name
    pub const UNIT_TYPE: &'static str = "htbdy";
    /// Unit category name
    pub const UNIT_CATEGORY: &'static str = "boundary_ds";
    /// Keyword opening the block
    pub const FILE_KEY: &'static str = "HTBDY";
    /// Water level column
    pub const ELEVATION: &'static str = "elevation";
    /// Time column, strictly increasing
    pub const TIME: &'static str = "time";

    /// Create an empty boundary with the default settings
    /// (hours, extend, linear)
    pub fn new() -> Self {
        let mut common = UnitCommon::with_name("Htbd");
        common.row_data.insert(MAIN_ROWS.to_string(), Self::rows());

        HtbdyUnit {
            common,
            comment: HeadDataItem::new(DataType::Text, FieldFormat::NONE, 0, 1),
            multiplier: HeadDataItem::new(DataType::Float, FieldFormat::RIGHT_10, 2, 1)
                .with_decimals(3)
                .with_initial(Value::Float(1.0)),
            time_units: constant(2, 1, &TIME_UNITS, "HOURS"),
            extending_method: constant(2, 2, &EXTENDING_METHODS, "EXTEND"),
            interpolation: constant(2, 3, &INTERPOLATIONS, "LINEAR"),
        }
    }

    fn rows() -> RowDataCollection {
        RowDataCollection::bulk_init([
            RowDataObject::float(Self::ELEVATION, 3),
            RowDataObject::float(Self::TIME, 3).with_update_callback(increasing_callback),
        ])
    }

    /// Comment text following the keyword
    pub fn comment(&self) -> &str {
        self.comment.as_str().unwrap_or_default()
    }

    /// Set the comment text
    pub fn set_comment(&mut self, comment: &str) -> Result<()> {
        self.comment.set_value(comment.trim())
    }

    /// Time units, or `USER SET` when a multiplier is used
    pub fn time_units(&self) -> &str {
        self.time_units.as_str().unwrap_or_default()
    }

    /// Set the time units; must be one of [`TIME_UNITS`]
    pub fn set_time_units(&mut self, units: &str) -> Result<()> {
        self.time_units.set_value(units)
    }

    /// Time multiplier applied when the units are `USER SET`
    pub fn multiplier(&self) -> f64 {
        self.multiplier.as_f64().unwrap_or(1.0)
    }

    /// Use a custom time multiplier, switching the units to `USER SET`
    pub fn set_multiplier(&mut self, multiplier: f64) -> Result<()> {
        self.multiplier.set_value(multiplier)?;
        self.time_units.set_value(USER_SET)
    }

    /// Extending method
    pub fn extending_method(&self) -> &str {
        self.extending_method.as_str().unwrap_or_default()
    }

    /// Set the extending method; must be one of [`EXTENDING_METHODS`]
    pub fn set_extending_method(&mut self, method: &str) -> Result<()> {
        self.extending_method.set_value(method)
    }

    /// Interpolation method
    pub fn interpolation(&self) -> &str {
        self.interpolation.as_str().unwrap_or_default()
    }

    /// Set the interpolation method; must be one of [`INTERPOLATIONS`]
    pub fn set_interpolation(&mut self, interpolation: &str) -> Result<()> {
        self.interpolation.set_value(interpolation)
    }

    fn read_parameters(&mut self, line: &str, line_no: usize) -> Result<usize> {
        let bad_line = |detail: String| {
            DatError::Parse(format!("HTBDY parameter line {}: {}", line_no, detail))
        };
        let params = match parameter_line(line) {
            Ok((_, params)) => params,
            Err(_) => return Err(bad_line(format!("cannot parse '{}'", line.trim()))),
        };

        if let Some(units) = params.time_units {
            if units.parse::<f64>().is_ok() {
                self.multiplier.set_raw(units).map_err(|e| bad_line(e.to_string()))?;
                self.time_units.set_raw(USER_SET).map_err(|e| bad_line(e.to_string()))?;
            } else {
                self.time_units.set_raw(units).map_err(|e| bad_line(e.to_string()))?;
            }
        }
        if let Some(method) = params.extending_method {
            self.extending_method.set_raw(method).map_err(|e| bad_line(e.to_string()))?;
        }
        if let Some(interpolation) = params.interpolation {
            self.interpolation.set_raw(interpolation).map_err(|e| bad_line(e.to_string()))?;
        }
        Ok(params.rows)
    }
}

fn constant(line: usize, column: usize, choices: &'static [&'static str], default: &str) -> HeadDataItem {
    HeadDataItem::new(DataType::Constant, FieldFormat::RIGHT_10, line, column)
        .with_choices(choices)
        .with_initial(Value::from(default))
}

impl Default for HtbdyUnit {
    fn default() -> Self {
        Self::new()
    }
}

impl DatUnit for HtbdyUnit {
    fn common(&self) -> &UnitCommon { &self.common }
    fn common_mut(&mut self) -> &mut UnitCommon { &mut self.common }
    fn unit_type(&self) -> &'static str { Self::UNIT_TYPE }
    fn unit_category(&self) -> &'static str { Self::UNIT_CATEGORY }

    fn read(&mut self, lines: &[String], cursor: usize) -> Result<usize> {
        let keyword_line = line_at(lines, cursor, Self::UNIT_TYPE)?;
        let comment = keyword_line
            .trim_start()
            .strip_prefix(Self::FILE_KEY)
            .ok_or_else(|| {
                DatError::Parse(format!(
                    "Expected HTBDY at line {}, found '{}'",
                    cursor, keyword_line
                ))
            })?;
        self.comment.set_raw(comment)?;

        let label_line = line_at(lines, cursor + 1, Self::UNIT_TYPE)?;
        self.common.name = column(label_line, 0, 12).trim().to_string();

        let param_line = line_at(lines, cursor + 2, Self::UNIT_TYPE)?;
        let row_count = self.read_parameters(param_line, cursor + 2)?;

        let start = cursor + 3;
        let end = start.checked_add(row_count).ok_or_else(|| {
            DatError::Parse(format!(
                "HTBDY at line {} declares {} rows, more than a file can hold",
                cursor, row_count
            ))
        })?;
        let mut rows = Self::rows();
        for index in start..end {
            let line = line_at(lines, index, Self::UNIT_TYPE)?;
            rows.push_raw(Self::ELEVATION, &column(line, 0, 10))
                .and_then(|_| rows.push_raw(Self::TIME, &column(line, 10, 20)))
                .map_err(|e| DatError::Parse(format!("HTBDY row at line {}: {}", index, e)))?;
        }
        self.common.row_data.insert(MAIN_ROWS.to_string(), rows);

        Ok(end)
    }

    fn write(&self) -> Vec<String> {
        let mut out = Vec::new();
        out.push(format!("{} {}", Self::FILE_KEY, self.comment()).trim_end().to_string());
        out.push(FieldFormat::left(12).pad(self.name()));

        // The written count equals the number of rows that follow it.
        let printed: Vec<String> = self
            .common
            .row_data
            .get(MAIN_ROWS)
            .map(|rows| {
                (0..rows.number_of_rows())
                    .map_while(|i| rows.printable_row(i).ok())
                    .collect()
            })
            .unwrap_or_default();

        let units = match self.time_units() {
            USER_SET => self.multiplier.format(),
            LUNAR_MONTHS => FieldFormat::right(12).pad(LUNAR_MONTHS),
            _ => self.time_units.format(),
        };
        out.push(format!(
            "{}{}{}{}{}",
            FieldFormat::RIGHT_10.pad(&printed.len().to_string()),
            FieldFormat::left(10).pad(""),
            units,
            self.extending_method.format(),
            self.interpolation.format()
        ));
        out.extend(printed);
        out
    }

    /// Insert a row; `time` may be omitted and is then extrapolated from the
    /// two rows before the insertion point.
    fn add_row(&mut self, values: &RowValues, collection_key: &str, index: Option<usize>) -> Result<()> {
        if !values.contains_key(Self::ELEVATION) {
            return Err(DatError::InvalidValue("HTBDY row must contain an elevation value".into()));
        }
        let rows = self.row_collection_mut(collection_key)?;
        if values.contains_key(Self::TIME) {
            return rows.add_row(values, index);
        }

        let count = rows.number_of_rows();
        let position = index.filter(|i| *i < count).unwrap_or(count);
        if position < 2 {
            return Err(DatError::InvalidValue(
                "Cannot determine time step with fewer than two previous rows".into(),
            ));
        }
        let time_at = |i: usize| -> Result<f64> {
            rows.value(Self::TIME, i)?
                .as_f64()
                .ok_or_else(|| DatError::InvalidValue("HTBDY time is not numeric".into()))
        };
        let t1 = time_at(position - 1)?;
        let t2 = time_at(position - 2)?;

        let mut values = values.clone();
        values.insert(Self::TIME.to_string(), Value::Float(t1 + (t1 - t2)));
        rows.add_row(&values, index)
    }
}
