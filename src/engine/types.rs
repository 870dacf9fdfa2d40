//! Engine types
//!
//! Per-file results and run statistics for the converter.

use std::path::PathBuf;

/// Result of converting one input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    /// Input file that was read
    pub input: PathBuf,
    /// Output file that was written
    pub output: PathBuf,
    /// Data rows written
    pub rows: usize,
    /// Records dropped by the skip policies
    pub skipped: usize,
}

/// A file the converter gave up on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    /// Input file, or the input directory for entry-level errors
    pub path: PathBuf,
    /// Rendered error
    pub message: String,
}

/// Statistics from a converter run
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    /// Input files discovered
    pub files_found: usize,
    /// Files converted successfully
    pub files_converted: usize,
    /// Data rows written across all files
    pub rows_written: usize,
    /// Records dropped by the skip policies
    pub records_skipped: usize,
    /// Files skipped because of an error
    pub failures: Vec<FileFailure>,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl RunStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a discovered file
    pub fn add_found(&mut self) {
        self.files_found += 1;
    }

    /// Record a converted file
    pub fn add_converted(&mut self, summary: &FileSummary) {
        self.files_converted += 1;
        self.rows_written += summary.rows;
        self.records_skipped += summary.skipped;
    }

    /// Record a skipped file
    pub fn add_failure(&mut self, path: impl Into<PathBuf>, message: impl Into<String>) {
        self.failures.push(FileFailure {
            path: path.into(),
            message: message.into(),
        });
    }

    /// Number of files skipped because of an error
    pub fn files_failed(&self) -> usize {
        self.failures.len()
    }

    /// Set duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }
}
