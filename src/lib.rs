//! # isisdat
//!
//! A pure Rust library for reading, editing and writing ISIS / Flood Modeller
//! `.dat` river model files.
//!
//! A `.dat` file is a sequence of fixed-column text blocks called units. Each
//! supported unit type parses its block into typed header fields and row
//! collections and writes it back in the same layout. Blocks without a
//! dedicated type are kept verbatim so an untouched file round-trips exactly.
//!
//! ## Features
//!
//! - Header (global parameters), COMMENT and HTBDY units
//! - Verbatim preservation of unsupported units
//! - Typed row editing with strict ordering checks on ordering columns
//! - UTF-8 and legacy code page input
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use isisdat::{DatReader, DatWriter, DatUnit, Unit};
//!
//! let mut reader = DatReader::from_file("model.dat")?;
//! let header = reader.consume_header()?;
//! println!("Model: {} ({} nodes)", header.title(), header.node_count());
//!
//! let comment = reader.consume_comment()?;
//! let rest = reader.consume_unknown(reader.remaining())?;
//!
//! let units: Vec<Unit> = vec![header.into(), comment.into(), rest.into()];
//! DatWriter::new().write_to_file(&units, "copy.dat")?;
//! # Ok::<(), isisdat::error::DatError>(())
//! ```
//!
//! ## Architecture
//!
//! - `DatUnit` - Base trait for all units
//! - `HeadDataItem` - Fixed-position typed header field
//! - `RowDataCollection` - Named, typed, equal-length columns
//! - `DatReader` / `DatWriter` - Cursor-driven reading and file output

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod head_data;
pub mod io;
pub mod row_data;
pub mod types;
pub mod units;

// Re-export commonly used types
pub use error::{DatError, Result};
pub use types::{Alignment, DataType, FieldFormat, UnitIdGenerator, Value};

pub use head_data::HeadDataItem;
pub use row_data::{row_values, RowDataCollection, RowDataObject, RowMutation, RowValues};

// Re-export unit types
pub use units::{
    check_increases, increasing_callback, CommentUnit, DatUnit, HeaderUnit, HtbdyUnit, Unit,
    UnitCommon, UnknownUnit, MAIN_ROWS,
};

// Re-export I/O types
pub use io::{DatReader, DatReaderConfiguration, DatWriter, DatWriterConfiguration, LineEnding};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
