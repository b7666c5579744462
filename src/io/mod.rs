//! I/O module for reading and writing `.dat` files

pub mod reader;
pub mod writer;

pub use reader::{DatReader, DatReaderConfiguration};
pub use writer::{DatWriter, DatWriterConfiguration, LineEnding};
