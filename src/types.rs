//! Common types used throughout consumption-csv
//!
//! This module contains the record/row data model and the small
//! enums shared between the settings file and the pipeline stages.

use serde::{Deserialize, Serialize};

// ============================================================================
// Records and Rows
// ============================================================================

/// One input data point as exported by the utility API
#[derive(Debug, Clone, PartialEq)]
pub struct ConsumptionRecord {
    /// Source timestamp, ISO 8601 / RFC 3339
    pub timestamp: String,
    /// Consumption value; `None` when the field is missing or null
    pub consumption: Option<f64>,
}

impl ConsumptionRecord {
    /// Create a record with a known consumption value
    pub fn new(timestamp: impl Into<String>, consumption: f64) -> Self {
        Self {
            timestamp: timestamp.into(),
            consumption: Some(consumption),
        }
    }

    /// Create a record whose consumption is missing
    pub fn without_consumption(timestamp: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            consumption: None,
        }
    }
}

/// One CSV line: formatted timestamp, formatted consumption, trailing empty columns
///
/// Only [`OutputRow::new`] builds rows, so the two data fields always exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRow {
    fields: Vec<String>,
}

impl OutputRow {
    /// Build a row from the two data fields plus `empty_columns` blanks
    pub fn new(timestamp: String, consumption: String, empty_columns: usize) -> Self {
        let mut fields = Vec::with_capacity(2 + empty_columns);
        fields.push(timestamp);
        fields.push(consumption);
        fields.extend(std::iter::repeat(String::new()).take(empty_columns));
        Self { fields }
    }

    /// Formatted timestamp field
    pub fn timestamp(&self) -> &str {
        &self.fields[0]
    }

    /// Formatted consumption field
    pub fn consumption(&self) -> &str {
        &self.fields[1]
    }

    /// All fields in output order
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Number of fields, including empty trailing columns
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always false; kept alongside [`OutputRow::len`]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// ============================================================================
// Processing Policies
// ============================================================================

/// Rounding applied to the scaled consumption value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Ties go to the even digit (exact binary value, like fixed-precision formatting)
    #[default]
    HalfEven,
    /// Ties go away from zero
    HalfUp,
}

/// What to do with a record whose consumption is missing or null
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingConsumption {
    /// Treat the value as 0 before scaling
    #[default]
    Zero,
    /// Drop the record from the output
    Skip,
    /// Raise a format error
    Error,
}

/// What to do when a single record cannot be formatted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordErrorPolicy {
    /// Skip the whole containing file
    #[default]
    AbortFile,
    /// Log and drop the record, keep its siblings
    SkipRecord,
}

// ============================================================================
// CSV Output Options
// ============================================================================

/// Quoting of output fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStyle {
    /// Fields are joined verbatim
    #[default]
    Never,
    /// Fields containing the delimiter, quotes or line breaks are quoted
    Necessary,
}

impl From<QuoteStyle> for csv::QuoteStyle {
    fn from(style: QuoteStyle) -> Self {
        match style {
            QuoteStyle::Never => csv::QuoteStyle::Never,
            QuoteStyle::Necessary => csv::QuoteStyle::Necessary,
        }
    }
}

/// Line ending of output files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineTerminator {
    /// `\r\n`, as in RFC 4180
    #[default]
    Crlf,
    /// `\n`
    Lf,
}

impl From<LineTerminator> for csv::Terminator {
    fn from(terminator: LineTerminator) -> Self {
        match terminator {
            LineTerminator::Crlf => csv::Terminator::CRLF,
            LineTerminator::Lf => csv::Terminator::Any(b'\n'),
        }
    }
}

impl LineTerminator {
    /// The terminator as a string
    pub fn as_str(self) -> &'static str {
        match self {
            LineTerminator::Crlf => "\r\n",
            LineTerminator::Lf => "\n",
        }
    }
}
