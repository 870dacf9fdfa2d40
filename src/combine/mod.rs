//! Combine module
//!
//! Builds the yearly total file from the monthly CSV files in the output
//! directory.

mod builder;

pub use builder::{parse_period, TotalBuilder, TotalSummary};
