//! CLI runner - executes a tool against the settings file

use crate::cli::commands::{CommonArgs, Tool};
use crate::combine::{TotalBuilder, TotalSummary};
use crate::engine::{Converter, RunStats};
use crate::error::{Result, ResultExt};
use crate::settings::{load_settings, Settings};
use crate::validate::{CsvValidator, ValidationReport};
use std::fmt::Write as _;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

/// Install the fmt subscriber; `RUST_LOG` directives are honored
pub fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

/// CLI runner
pub struct Runner {
    tool: Tool,
    args: CommonArgs,
}

impl Runner {
    /// Create a new runner
    pub fn new(tool: Tool, args: CommonArgs) -> Self {
        Self { tool, args }
    }

    /// Run the selected tool
    ///
    /// Relative directories in the settings resolve against the current
    /// working directory.
    pub fn run(&self) -> Result<()> {
        let settings = load_settings(&self.args.config)?;
        let base_dir =
            std::env::current_dir().context("Cannot determine the working directory")?;
        info!("Loaded settings from {}", self.args.config.display());

        match self.tool {
            Tool::Convert => {
                convert(settings, base_dir)?;
            }
            Tool::Total => {
                total(&settings, base_dir)?;
            }
            Tool::Validate => {
                let reports = validate(&settings, base_dir)?;
                print!("{}", render_reports(&reports));
            }
        }
        Ok(())
    }
}

/// Convert every input file
pub fn convert(settings: Settings, base_dir: impl Into<PathBuf>) -> Result<RunStats> {
    Converter::new(settings, base_dir)?.run()
}

/// Build the total file
pub fn total(settings: &Settings, base_dir: impl Into<PathBuf>) -> Result<TotalSummary> {
    TotalBuilder::new(settings, &base_dir.into())?.build()
}

/// Validate every output file
pub fn validate(
    settings: &Settings,
    base_dir: impl Into<PathBuf>,
) -> Result<Vec<ValidationReport>> {
    CsvValidator::new(settings, &base_dir.into())?.validate_all()
}

/// Human-readable validation summary, one block per file
pub fn render_reports(reports: &[ValidationReport]) -> String {
    let mut out = String::new();

    if reports.is_empty() {
        out.push_str("No CSV files found to validate\n");
        return out;
    }

    for report in reports {
        let name = report.path.file_name().map_or_else(
            || report.path.display().to_string(),
            |n| n.to_string_lossy().into_owned(),
        );
        let _ = writeln!(out, "\nValidating {name}:");

        if report.is_valid() {
            out.push_str("✅ File is valid\n");
        } else {
            out.push_str("❌ File has validation errors:\n");
            for issue in &report.issues {
                let _ = writeln!(out, "  - {issue}");
            }
        }
    }
    out
}
