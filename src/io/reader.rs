//! `.dat` file reader
//!
//! The reader owns the file's lines and a cursor into them. Units are
//! consumed one at a time; each unit reads from the cursor and reports where
//! the next unit starts.

use crate::error::{DatError, Result};
use crate::types::UnitIdGenerator;
use crate::units::{CommentUnit, DatUnit, HeaderUnit, HtbdyUnit, UnknownUnit};
use encoding_rs::{Encoding, WINDOWS_1252};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Configuration for the `.dat` reader.
#[derive(Debug, Clone, Copy)]
pub struct DatReaderConfiguration {
    /// Encoding used when the source bytes are not valid UTF-8.
    ///
    /// Default: Windows-1252.
    pub encoding: &'static Encoding,
}

impl Default for DatReaderConfiguration {
    fn default() -> Self {
        Self {
            encoding: WINDOWS_1252,
        }
    }
}

impl DatReaderConfiguration {
    /// Decode raw file bytes, trying UTF-8 first
    pub fn decode(&self, bytes: &[u8]) -> String {
        match std::str::from_utf8(bytes) {
            Ok(text) => text.strip_prefix('\u{feff}').unwrap_or(text).to_string(),
            Err(_) => {
                let (decoded, _, had_errors) = self.encoding.decode(bytes);
                if had_errors {
                    tracing::warn!(
                        encoding = self.encoding.name(),
                        "replaced undecodable bytes in .dat source"
                    );
                }
                decoded.into_owned()
            }
        }
    }
}

/// `.dat` file reader
#[derive(Debug)]
pub struct DatReader {
    lines: Vec<String>,
    raw: Option<Vec<u8>>,
    position: usize,
    ids: UnitIdGenerator,
    config: DatReaderConfiguration,
}

impl DatReader {
    /// Create a reader over lines already split from a file
    pub fn from_lines(lines: Vec<String>) -> Self {
        Self {
            lines,
            raw: None,
            position: 0,
            ids: UnitIdGenerator::new(),
            config: DatReaderConfiguration::default(),
        }
    }

    /// Create a reader over decoded text; `\n` and `\r\n` both end a line
    pub fn from_text(text: &str) -> Self {
        Self::from_lines(split_lines(text))
    }

    /// Create a reader over raw file bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let config = DatReaderConfiguration::default();
        let lines = split_lines(&config.decode(&bytes));
        Self {
            raw: Some(bytes),
            ..Self::from_lines(lines)
        }
    }

    /// Create a reader from any reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut bytes = Vec::new();
        BufReader::new(reader).read_to_end(&mut bytes)?;
        Ok(Self::from_bytes(bytes))
    }

    /// Create a reader from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Set the reader configuration.
    ///
    /// Byte sources are decoded again with the new encoding and the cursor
    /// returns to the first line.
    pub fn with_configuration(mut self, config: DatReaderConfiguration) -> Self {
        self.config = config;
        if let Some(raw) = &self.raw {
            self.lines = split_lines(&config.decode(raw));
            self.position = 0;
        }
        self
    }

    /// Current configuration
    pub fn configuration(&self) -> &DatReaderConfiguration {
        &self.config
    }

    /// All lines of the source
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Index of the next unread line
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of unread lines
    pub fn remaining(&self) -> usize {
        self.lines.len().saturating_sub(self.position)
    }

    /// Check if every line has been consumed
    pub fn is_finished(&self) -> bool {
        self.remaining() == 0
    }

    /// Next unread line without consuming it
    pub fn peek_line(&self) -> Option<&str> {
        self.lines.get(self.position).map(String::as_str)
    }

    /// Name generator for units created by this reader
    pub fn ids_mut(&mut self) -> &mut UnitIdGenerator {
        &mut self.ids
    }

    /// Read `unit` from the current position and move past it
    pub fn consume_next<U: DatUnit>(&mut self, mut unit: U) -> Result<U> {
        let start = self.position;
        let next = unit.read(&self.lines, start)?;
        self.advance(unit.unit_type(), start, next)?;
        Ok(unit)
    }

    /// Read the header block
    pub fn consume_header(&mut self) -> Result<HeaderUnit> {
        self.consume_next(HeaderUnit::new())
    }

    /// Read a comment block
    pub fn consume_comment(&mut self) -> Result<CommentUnit> {
        let unit = CommentUnit::new(&mut self.ids);
        self.consume_next(unit)
    }

    /// Read a head-time boundary block
    pub fn consume_htbdy(&mut self) -> Result<HtbdyUnit> {
        self.consume_next(HtbdyUnit::new())
    }

    /// Keep the next `line_count` lines verbatim as an unknown unit
    pub fn consume_unknown(&mut self, line_count: usize) -> Result<UnknownUnit> {
        let start = self.position;
        let end = start + line_count;
        if line_count == 0 || end > self.lines.len() {
            return Err(DatError::Parse(format!(
                "Cannot take {} lines for unknown unit at line {}, {} remain",
                line_count,
                start,
                self.remaining()
            )));
        }

        let mut unit = UnknownUnit::new(&mut self.ids);
        let next = unit.read(&self.lines[..end], start)?;
        self.advance(unit.unit_type(), start, next)?;
        Ok(unit)
    }

    fn advance(&mut self, unit_type: &str, start: usize, next: usize) -> Result<()> {
        if next <= start || next > self.lines.len() {
            return Err(DatError::Parse(format!(
                "{} unit read from line {} returned invalid position {}",
                unit_type, start, next
            )));
        }
        tracing::debug!(unit_type, start, next, "consumed unit");
        self.position = next;
        Ok(())
    }
}

fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}
