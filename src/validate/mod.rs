//! Validate module
//!
//! Checks output CSV files for structural problems, unparseable values,
//! duplicate timestamps, missing hours and gaps between days.

mod types;
mod validator;

pub use types::{ValidationIssue, ValidationReport};
pub use validator::{parse_output_timestamp, CsvValidator};

#[cfg(test)]
mod tests;
