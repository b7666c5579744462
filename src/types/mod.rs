//! Core value types shared by header fields and row collections

mod data_type;
mod format;
mod unit_id;
mod value;

pub use data_type::DataType;
pub use format::{Alignment, FieldFormat};
pub use unit_id::UnitIdGenerator;
pub use value::Value;
