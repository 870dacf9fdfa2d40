//! Total file builder

use crate::discovery::discover;
use crate::error::{Error, Result};
use crate::output::{read_csv, CsvWriter, CsvWriterConfig};
use crate::settings::Settings;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{info, warn};

/// `YYYY-MM` at the start of a monthly file name
static PERIOD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{2})").unwrap());

/// Year and month parsed from the start of `file_name`
///
/// Returns `None` when the name does not start with `YYYY-MM` or the
/// month is out of range.
pub fn parse_period(file_name: &str) -> Option<(u32, u32)> {
    let caps = PERIOD_REGEX.captures(file_name)?;
    let year = caps[1].parse().ok()?;
    let month = caps[2].parse().ok()?;
    (1..=12).contains(&month).then_some((year, month))
}

/// What [`TotalBuilder::build`] produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TotalSummary {
    /// Total file, when one was written
    pub path: Option<PathBuf>,
    /// Monthly files merged, in merge order
    pub files: Vec<PathBuf>,
    /// Data rows written
    pub rows: usize,
}

/// Merges the monthly CSV files of the output directory into one file
#[derive(Debug, Clone)]
pub struct TotalBuilder {
    output_dir: PathBuf,
    suffix: String,
    total_file: String,
    writer_config: CsvWriterConfig,
}

impl TotalBuilder {
    /// Create a builder for the output directory of `settings`
    pub fn new(settings: &Settings, base_dir: &Path) -> Result<Self> {
        Ok(Self {
            output_dir: settings.output_dir(base_dir),
            suffix: settings.output_suffix().to_string(),
            total_file: settings.paths.output.total_file.clone(),
            writer_config: CsvWriterConfig::from_settings(&settings.csv)?,
        })
    }

    /// Path of the total file
    pub fn total_path(&self) -> PathBuf {
        self.output_dir.join(&self.total_file)
    }

    /// Monthly files in chronological order
    pub fn monthly_files(&self) -> Result<Vec<PathBuf>> {
        if !self.output_dir.is_dir() {
            return Err(Error::discovery(
                &self.output_dir,
                "output directory not found",
            ));
        }

        let mut monthly = Vec::new();
        for item in discover(&self.output_dir, &self.suffix)? {
            let file = match item {
                Ok(file) => file,
                Err(e) => {
                    warn!("Skipping unreadable entry: {e}");
                    continue;
                }
            };

            let Some(name) = file.path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if name == self.total_file {
                continue;
            }

            match parse_period(name) {
                Some(period) => monthly.push((period, file.path)),
                None => warn!("Skipping '{name}': no YYYY-MM period at the start of the name"),
            }
        }

        // discovery order is lexical, so equal periods keep a stable order
        monthly.sort_by_key(|(period, _)| *period);
        Ok(monthly.into_iter().map(|(_, path)| path).collect())
    }

    /// Write the total file: the first file's header, then every data row
    pub fn build(&self) -> Result<TotalSummary> {
        let files = self.monthly_files()?;
        if files.is_empty() {
            info!(
                "No monthly files matching '*{}' in {}",
                self.suffix,
                self.output_dir.display()
            );
            return Ok(TotalSummary::default());
        }

        let path = self.total_path();
        let delimiter = self.writer_config.delimiter();

        // read everything first so a bad monthly file leaves no partial total
        let mut contents = Vec::with_capacity(files.len());
        for file in &files {
            contents.push(read_csv(file, delimiter)?);
        }

        let mut writer = CsvWriter::new(&path, &self.writer_config)?;
        let mut header_written = false;
        for records in &contents {
            let mut lines = records.iter();
            if let Some(header) = lines.next() {
                if !header_written {
                    writer.write_header(&header.iter().collect::<Vec<_>>())?;
                    header_written = true;
                }
            }
            for record in lines {
                writer.write_fields(record)?;
            }
        }
        let rows = writer.close()?;

        info!(
            "Wrote {} rows from {} files to {}",
            rows,
            files.len(),
            path.display()
        );

        Ok(TotalSummary {
            path: Some(path),
            files,
            rows,
        })
    }
}
