//! CLI module
//!
//! Command-line interface shared by the three binaries.
//!
//! # Binaries
//!
//! - `consumption-csv` - Convert JSON exports into CSV files
//! - `consumption-total` - Merge monthly CSV files into a total file
//! - `consumption-validate` - Report problems in the CSV files

mod commands;
mod runner;

pub use commands::{CommonArgs, ConvertCli, TotalCli, Tool, ValidateCli};
pub use runner::{convert, init_tracing, render_reports, total, validate, Runner};
