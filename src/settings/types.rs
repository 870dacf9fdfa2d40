//! Settings types
//!
//! Structures deserialized from the converter's YAML settings file.

use crate::decode::DecoderFormat;
use crate::types::{
    LineTerminator, MissingConsumption, QuoteStyle, RecordErrorPolicy, RoundingMode,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ============================================================================
// Top-Level Settings
// ============================================================================

/// Complete converter settings loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Data directory layout
    pub directories: Directories,

    /// File-name suffixes for input and output files
    pub paths: PathSettings,

    /// CSV output formatting
    pub csv: CsvSettings,

    /// Numeric processing
    #[serde(default)]
    pub processing: ProcessingSettings,

    /// Where records live inside the input documents
    #[serde(default)]
    pub records: RecordSettings,
}

impl Settings {
    /// Input directory: `<base>/<data>/<input>`
    pub fn input_dir(&self, base: &Path) -> PathBuf {
        base.join(&self.directories.data)
            .join(&self.directories.input)
    }

    /// Output directory: `<base>/<data>/<output>`
    pub fn output_dir(&self, base: &Path) -> PathBuf {
        base.join(&self.directories.data)
            .join(&self.directories.output)
    }

    /// Input file-name suffix
    pub fn input_suffix(&self) -> &str {
        &self.paths.input.json_file_suffix
    }

    /// Output file-name suffix
    pub fn output_suffix(&self) -> &str {
        &self.paths.output.csv_file_suffix
    }

    /// Header line fields: configured names followed by the empty columns
    pub fn header_row(&self) -> Vec<String> {
        let mut header = self.csv.header.clone();
        header.extend(std::iter::repeat(String::new()).take(self.csv.empty_columns));
        header
    }

    /// Number of fields on every output line
    pub fn row_width(&self) -> usize {
        self.csv.header.len() + self.csv.empty_columns
    }
}

// ============================================================================
// Directories
// ============================================================================

/// Directory layout; none of these have defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Directories {
    /// Data root, relative to the base directory
    pub data: PathBuf,
    /// Input directory below the data root
    pub input: PathBuf,
    /// Output directory below the data root
    pub output: PathBuf,
}

// ============================================================================
// File-Name Suffixes
// ============================================================================

/// Input and output file naming
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSettings {
    /// Input naming
    pub input: InputPaths,

    /// Output naming
    #[serde(default)]
    pub output: OutputPaths,
}

/// Input file naming
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputPaths {
    /// Suffix every input file ends with, e.g. `-Verbrauch.json`
    #[serde(alias = "json_file_prefix")]
    pub json_file_suffix: String,
}

/// Output file naming
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputPaths {
    /// Suffix appended to the period identifier, e.g. `-consumption.csv`
    #[serde(alias = "csv_file_prefix", default = "default_csv_suffix")]
    pub csv_file_suffix: String,

    /// Name of the merged yearly file written by the total builder
    #[serde(default = "default_total_file")]
    pub total_file: String,
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            csv_file_suffix: default_csv_suffix(),
            total_file: default_total_file(),
        }
    }
}

fn default_csv_suffix() -> String {
    "-consumption.csv".to_string()
}

fn default_total_file() -> String {
    "year-consumption.csv".to_string()
}

// ============================================================================
// CSV Settings
// ============================================================================

/// CSV output formatting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvSettings {
    /// Column names: timestamp column, consumption column
    pub header: Vec<String>,

    /// chrono strftime pattern for the timestamp column
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Character written instead of `.` in numbers
    #[serde(default = "default_decimal_separator")]
    pub decimal_separator: char,

    /// Number of empty columns appended to every line
    #[serde(default)]
    pub empty_columns: usize,

    /// Field delimiter
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// Field quoting
    #[serde(default)]
    pub quote_style: QuoteStyle,

    /// Line ending
    #[serde(default)]
    pub line_terminator: LineTerminator,
}

fn default_date_format() -> String {
    "%Y-%m-%d %H:%M:%S".to_string()
}

fn default_decimal_separator() -> char {
    '.'
}

fn default_delimiter() -> char {
    ','
}

// ============================================================================
// Processing Settings
// ============================================================================

/// Numeric processing of consumption values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingSettings {
    /// Factor applied before rounding (e.g. 1000 for kWh -> Wh)
    #[serde(default = "default_multiplier")]
    pub consumption_multiplier: f64,

    /// Digits after the decimal separator
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,

    /// Tie-breaking rule when rounding
    #[serde(default)]
    pub rounding: RoundingMode,

    /// Handling of missing/null consumption values
    #[serde(default)]
    pub missing_consumption: MissingConsumption,

    /// Handling of records that cannot be formatted
    #[serde(default)]
    pub on_record_error: RecordErrorPolicy,
}

impl Default for ProcessingSettings {
    fn default() -> Self {
        Self {
            consumption_multiplier: default_multiplier(),
            decimal_places: default_decimal_places(),
            rounding: RoundingMode::default(),
            missing_consumption: MissingConsumption::default(),
            on_record_error: RecordErrorPolicy::default(),
        }
    }
}

fn default_multiplier() -> f64 {
    1.0
}

fn default_decimal_places() -> u32 {
    2
}

// ============================================================================
// Record Location
// ============================================================================

/// Where records and their fields are found in an input document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSettings {
    /// Input document format
    #[serde(default)]
    pub format: DecoderFormat,

    /// Dot path to the record array (e.g. `data.viewer.homes[0].consumption.nodes`)
    #[serde(default)]
    pub path: Option<String>,

    /// Timestamp field; tries `timestamp` then `from` when unset
    #[serde(default)]
    pub timestamp_field: Option<String>,

    /// Consumption field
    #[serde(default = "default_consumption_field")]
    pub consumption_field: String,
}

impl Default for RecordSettings {
    fn default() -> Self {
        Self {
            format: DecoderFormat::default(),
            path: None,
            timestamp_field: None,
            consumption_field: default_consumption_field(),
        }
    }
}

fn default_consumption_field() -> String {
    "consumption".to_string()
}
