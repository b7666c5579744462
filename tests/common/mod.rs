//! Shared test utilities for isisdat integration tests.
//!
//! Sample `.dat` blocks and a few helpers that every test crate imports via
//! `mod common;`.

#![allow(dead_code)]

use isisdat::{DatReader, DatUnit, Unit};

/// Seven-line header block
pub fn header_lines() -> Vec<String> {
    lines(&[
        "Example river model",
        "#REVISION#1",
        "        12     0.750     0.900     0.100     0.001      12SI",
        "    10.000     0.010     0.010     0.700     0.100     0.700     0.000",
        "RAD FILE",
        "..\\rough.rad",
        "END GENERAL",
    ])
}

/// Two-line comment block
pub fn comment_lines() -> Vec<String> {
    lines(&[
        "COMMENT   ",
        "         2",
        "Calibrated against the 2019 flood event",
        "Roughness from survey",
    ])
}

/// Head-time boundary with three rows
pub fn htbdy_lines() -> Vec<String> {
    lines(&[
        "HTBDY #tidal",
        "DS_BDY      ",
        "         3               HOURS    EXTEND    LINEAR",
        "     2.500     0.000",
        "     3.100     1.000",
        "     2.800     2.000",
    ])
}

/// A river section block, which has no dedicated unit type
pub fn river_lines() -> Vec<String> {
    lines(&[
        "RIVER  weir reach",
        "SECTION",
        "CS_001      CS_002",
        "  1000.000",
        "         2",
        "     0.000    10.000     0.035",
        "    10.000     9.500     0.035",
    ])
}

/// Header, comment, boundary then an unsupported block
pub fn model_lines() -> Vec<String> {
    let mut out = header_lines();
    out.extend(comment_lines());
    out.extend(htbdy_lines());
    out.extend(river_lines());
    out
}

/// Read every unit of [`model_lines`]
pub fn read_model(reader: &mut DatReader) -> isisdat::Result<Vec<Unit>> {
    let header = reader.consume_header()?;
    let comment = reader.consume_comment()?;
    let htbdy = reader.consume_htbdy()?;
    let rest = reader.consume_unknown(reader.remaining())?;
    Ok(vec![header.into(), comment.into(), htbdy.into(), rest.into()])
}

/// Concatenated output of all units
pub fn write_all(units: &[Unit]) -> Vec<String> {
    units.iter().flat_map(|u| u.as_unit().write()).collect()
}

pub fn lines(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}
