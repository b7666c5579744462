//! COMMENT unit

use super::{line_at, DatUnit, UnitCommon};
use crate::error::{DatError, Result};
use crate::types::{FieldFormat, UnitIdGenerator};

/// Free text block of the `.dat` file.
///
/// ```text
/// COMMENT
///          2
/// first line of text
/// second line of text
/// ```
///
/// The second line is the number of text lines that follow. That count, not
/// the number of stored lines, decides how many lines are written: lines
/// beyond the count are dropped by [`DatUnit::write`]. Use
/// [`CommentUnit::add_comment_text`] to keep the two in step.
#[derive(Debug, Clone)]
pub struct CommentUnit {
    /// Common unit data
    pub common: UnitCommon,
    row_count: usize,
    lines: Vec<String>,
}

impl CommentUnit {
    /// Unit type name
    pub const UNIT_TYPE: &'static str = "comment";
    /// Unit category name
    pub const UNIT_CATEGORY: &'static str = "meta";
    /// Keyword opening the block
    pub const FILE_KEY: &'static str = "COMMENT";

    /// Create an empty comment named `comment_<n>`
    pub fn new(ids: &mut UnitIdGenerator) -> Self {
        CommentUnit {
            common: UnitCommon::with_name(ids.next_name("comment")),
            row_count: 0,
            lines: Vec::new(),
        }
    }

    /// Create a comment holding `text`
    pub fn with_text(ids: &mut UnitIdGenerator, text: &str) -> Self {
        let mut unit = Self::new(ids);
        if !text.trim().is_empty() {
            unit.add_comment_text(text);
        }
        unit
    }

    /// Append text, one stored line per line of `text`, and set the row
    /// count to the new number of lines.
    pub fn add_comment_text(&mut self, text: &str) {
        self.lines.extend(text.split('\n').map(|l| l.trim().to_string()));
        self.row_count = self.lines.len();
    }

    /// Stored lines
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Mutable stored lines; the row count is not updated
    pub fn lines_mut(&mut self) -> &mut Vec<String> {
        &mut self.lines
    }

    /// Stored lines joined with newlines
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Row count written on the second line
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Override the row count written on the second line
    pub fn set_row_count(&mut self, count: usize) {
        self.row_count = count;
    }
}

impl DatUnit for CommentUnit {
    fn common(&self) -> &UnitCommon { &self.common }
    fn common_mut(&mut self) -> &mut UnitCommon { &mut self.common }
    fn unit_type(&self) -> &'static str { Self::UNIT_TYPE }
    fn unit_category(&self) -> &'static str { Self::UNIT_CATEGORY }

    fn read(&mut self, lines: &[String], cursor: usize) -> Result<usize> {
        let count_line = line_at(lines, cursor + 1, Self::UNIT_TYPE)?;
        let count = count_line.trim().parse::<usize>().map_err(|_| {
            DatError::Parse(format!(
                "Invalid COMMENT row count '{}' at line {}",
                count_line.trim(),
                cursor + 1
            ))
        })?;

        let start = cursor + 2;
        let text = start
            .checked_add(count)
            .and_then(|end| lines.get(start..end))
            .ok_or_else(|| {
                DatError::Parse(format!(
                    "COMMENT at line {} declares {} rows but only {} lines remain",
                    cursor,
                    count,
                    lines.len().saturating_sub(start)
                ))
            })?;

        self.row_count = count;
        self.lines = text.iter().map(|l| l.trim_end().to_string()).collect();
        Ok(start + count)
    }

    fn write(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.lines.len() + 2);
        out.push(FieldFormat::left(10).pad(Self::FILE_KEY));
        out.push(FieldFormat::RIGHT_10.pad(&self.row_count.to_string()));
        out.extend(self.lines.iter().cloned());
        out.truncate(self.row_count + 2);
        out
    }
}
