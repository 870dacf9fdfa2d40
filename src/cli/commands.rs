//! CLI commands and argument parsing

use crate::settings::DEFAULT_SETTINGS_PATH;
use clap::{Args, Parser};
use std::path::PathBuf;

/// Arguments shared by every binary
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Settings file (YAML)
    #[arg(short, long, default_value = DEFAULT_SETTINGS_PATH)]
    pub config: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Convert utility consumption JSON exports into CSV files
#[derive(Parser, Debug)]
#[command(name = "consumption-csv")]
#[command(author, version, about, long_about = None)]
pub struct ConvertCli {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Merge the monthly CSV files into one total file
#[derive(Parser, Debug)]
#[command(name = "consumption-total")]
#[command(author, version, about, long_about = None)]
pub struct TotalCli {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Check the generated CSV files for structural and content problems
#[derive(Parser, Debug)]
#[command(name = "consumption-validate")]
#[command(author, version, about, long_about = None)]
pub struct ValidateCli {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Which tool a [`Runner`](super::Runner) executes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    /// JSON to CSV conversion
    Convert,
    /// Total file builder
    Total,
    /// CSV validator
    Validate,
}
