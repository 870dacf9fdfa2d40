//! CSV file writer
//!
//! Writes a header line followed by [`OutputRow`]s using the delimiter,
//! quoting and line ending from the settings file.

use crate::error::{Error, Result};
use crate::settings::CsvSettings;
use crate::types::{LineTerminator, OutputRow, QuoteStyle};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration for the CSV writer
#[derive(Debug, Clone, Copy)]
pub struct CsvWriterConfig {
    delimiter: u8,
    quote_style: QuoteStyle,
    terminator: LineTerminator,
}

impl Default for CsvWriterConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote_style: QuoteStyle::default(),
            terminator: LineTerminator::default(),
        }
    }
}

impl CsvWriterConfig {
    /// Create a new config with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the writer config from the `csv` settings section
    pub fn from_settings(csv: &CsvSettings) -> Result<Self> {
        let delimiter = u8::try_from(csv.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                Error::invalid_value(
                    "csv.delimiter",
                    format!("'{}' is not an ASCII character", csv.delimiter),
                )
            })?;

        Ok(Self {
            delimiter,
            quote_style: csv.quote_style,
            terminator: csv.line_terminator,
        })
    }

    /// Set the field delimiter
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the quoting style
    #[must_use]
    pub fn with_quote_style(mut self, style: QuoteStyle) -> Self {
        self.quote_style = style;
        self
    }

    /// Set the line terminator
    #[must_use]
    pub fn with_terminator(mut self, terminator: LineTerminator) -> Self {
        self.terminator = terminator;
        self
    }

    /// Get the field delimiter
    #[must_use]
    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    fn builder(&self) -> csv::WriterBuilder {
        let mut builder = csv::WriterBuilder::new();
        builder
            .delimiter(self.delimiter)
            .quote_style(self.quote_style.into())
            .terminator(self.terminator.into())
            .flexible(true);
        builder
    }
}

/// CSV file writer
pub struct CsvWriter {
    writer: csv::Writer<File>,
    path: PathBuf,
    rows_written: usize,
}

impl CsvWriter {
    /// Create (or truncate) the file at `path`
    pub fn new(path: impl AsRef<Path>, config: &CsvWriterConfig) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)
            .map_err(|e| Error::write(&path, format!("Failed to create file: {e}")))?;

        Ok(Self {
            writer: config.builder().from_writer(file),
            path,
            rows_written: 0,
        })
    }

    /// Write the header line
    pub fn write_header<S: AsRef<str>>(&mut self, header: &[S]) -> Result<()> {
        self.writer
            .write_record(header.iter().map(|name| AsRef::<str>::as_ref(name)))
            .map_err(|e| Error::write(&self.path, format!("Failed to write header: {e}")))
    }

    /// Write one data row
    pub fn write_row(&mut self, row: &OutputRow) -> Result<()> {
        self.writer
            .write_record(row.fields())
            .map_err(|e| Error::write(&self.path, format!("Failed to write row: {e}")))?;
        self.rows_written += 1;
        Ok(())
    }

    /// Write raw fields, e.g. rows copied from another CSV file
    pub fn write_fields<I, S>(&mut self, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        self.writer
            .write_record(fields)
            .map_err(|e| Error::write(&self.path, format!("Failed to write row: {e}")))?;
        self.rows_written += 1;
        Ok(())
    }

    /// Get the number of data rows written so far
    #[must_use]
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flush and close the file
    pub fn close(mut self) -> Result<usize> {
        self.writer
            .flush()
            .map_err(|e| Error::write(&self.path, format!("Failed to flush: {e}")))?;
        Ok(self.rows_written)
    }
}

/// Path of the output file for `period`: `<dir>/<period><suffix>`
pub fn output_path(dir: impl AsRef<Path>, period: &str, suffix: &str) -> PathBuf {
    dir.as_ref().join(format!("{period}{suffix}"))
}

/// Write a complete CSV file: header line, then every row in order
///
/// The parent directory is created when missing. An existing file at
/// `path` is replaced.
pub fn write_csv<S: AsRef<str>>(
    path: impl AsRef<Path>,
    header: &[S],
    rows: &[OutputRow],
    config: &CsvWriterConfig,
) -> Result<usize> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            Error::write(parent, format!("Failed to create output directory: {e}"))
        })?;
    }

    let mut writer = CsvWriter::new(path, config)?;
    writer.write_header(header)?;
    for row in rows {
        writer.write_row(row)?;
    }
    let written = writer.close()?;

    debug!("Wrote {} rows to {}", written, path.display());
    Ok(written)
}
