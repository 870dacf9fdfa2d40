//! CSV file reader
//!
//! Reads back files produced by the writer, for the total builder and the
//! validator.

use crate::error::{Error, Result};
use std::fs::File;
use std::path::Path;

/// Read every line of a CSV file, header included, as raw records
///
/// Rows may have different widths; checking them is up to the caller.
pub fn read_csv(path: impl AsRef<Path>, delimiter: u8) -> Result<Vec<csv::StringRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let records = reader.records().collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(records)
}
