//! Validation types

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// A problem found in an output CSV file
///
/// Row numbers are 1-based and count the header as row 1.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    // ============================================================================
    // Structure
    // ============================================================================
    #[error("File has no header row")]
    MissingHeader,

    #[error("Header has insufficient columns. Expected at least {expected} columns.")]
    HeaderTooShort { expected: usize },

    #[error("Required header '{name}' not found at position {position}")]
    HeaderMismatch { name: String, position: usize },

    #[error("Row {row} has insufficient columns. Expected at least {expected} columns.")]
    RowTooShort { row: usize, expected: usize },

    // ============================================================================
    // Content
    // ============================================================================
    #[error("Row {row}: Invalid datetime format in column 1")]
    InvalidTimestamp { row: usize },

    #[error("Row {row}: Invalid consumption value in column 2")]
    InvalidConsumption { row: usize },

    #[error("Row {row}: Duplicate timestamp found: {value} (also found at row {first_row})")]
    DuplicateTimestamp {
        row: usize,
        value: String,
        first_row: usize,
    },

    #[error("File contains only a header row. No data rows found.")]
    HeaderOnly,

    #[error("Missing hours {hours:?} for date {date} (between rows {first_row} and {last_row})")]
    MissingHours {
        date: NaiveDate,
        hours: Vec<u32>,
        first_row: usize,
        last_row: usize,
    },

    #[error("Gap in dates between {from} and {to} (between rows {last_row} and {first_row})")]
    DateGap {
        from: NaiveDate,
        to: NaiveDate,
        last_row: usize,
        first_row: usize,
    },

    #[error("Error reading file: {message}")]
    Unreadable { message: String },
}

/// Validation result for one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// File that was checked
    pub path: PathBuf,
    /// Problems found, structure first, then content
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Create an empty report
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            issues: Vec::new(),
        }
    }

    /// True when no issues were found
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Add an issue
    pub fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }
}
