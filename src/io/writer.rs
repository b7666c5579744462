//! `.dat` file writer

use crate::error::Result;
use crate::units::Unit;
use encoding_rs::{Encoding, UTF_8};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Line terminator written after every line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// `\r\n`, as written by the modelling software
    #[default]
    CrLf,
    /// `\n`
    Lf,
}

impl LineEnding {
    /// Terminator text
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::CrLf => "\r\n",
            LineEnding::Lf => "\n",
        }
    }
}

/// Configuration for the `.dat` writer.
#[derive(Debug, Clone, Copy)]
pub struct DatWriterConfiguration {
    /// Line terminator. Default: `\r\n`.
    pub line_ending: LineEnding,
    /// Output encoding. Default: UTF-8.
    pub encoding: &'static Encoding,
}

impl Default for DatWriterConfiguration {
    fn default() -> Self {
        Self {
            line_ending: LineEnding::CrLf,
            encoding: UTF_8,
        }
    }
}

/// `.dat` file writer
#[derive(Debug, Default)]
pub struct DatWriter {
    config: DatWriterConfiguration,
}

impl DatWriter {
    /// Create a writer with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the writer configuration.
    pub fn with_configuration(mut self, config: DatWriterConfiguration) -> Self {
        self.config = config;
        self
    }

    /// Lines of every unit, in order
    pub fn write_lines(&self, units: &[Unit]) -> Vec<String> {
        units.iter().flat_map(|u| u.as_unit().write()).collect()
    }

    /// Write to any writer
    pub fn write_to_writer<W: Write>(&self, units: &[Unit], mut writer: W) -> Result<()> {
        let ending = self.config.line_ending.as_str();
        let mut text = String::new();
        for line in self.write_lines(units) {
            text.push_str(&line);
            text.push_str(ending);
        }

        let (bytes, _, had_errors) = self.config.encoding.encode(&text);
        if had_errors {
            tracing::warn!(
                encoding = self.config.encoding.name(),
                "replaced unmappable characters in .dat output"
            );
        }
        writer.write_all(&bytes)?;
        writer.flush()?;
        Ok(())
    }

    /// Write to a byte vector (useful for testing)
    pub fn write_to_vec(&self, units: &[Unit]) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write_to_writer(units, &mut buffer)?;
        Ok(buffer)
    }

    /// Write to a file
    pub fn write_to_file<P: AsRef<Path>>(&self, units: &[Unit], path: P) -> Result<()> {
        let file = File::create(path)?;
        self.write_to_writer(units, BufWriter::new(file))
    }
}
