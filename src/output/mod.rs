//! Output module
//!
//! Writes CSV files and reads them back. The delimiter, quoting and line
//! terminator come from the `csv` section of the settings; the fields
//! themselves are produced by the transform stage.

mod reader;
mod writer;

pub use reader::read_csv;
pub use writer::{output_path, write_csv, CsvWriter, CsvWriterConfig};
