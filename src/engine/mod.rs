//! Conversion engine module
//!
//! Runs discovery, decoding, transformation and writing for every input
//! file of a run, strictly one file at a time.
//!
//! # Overview
//!
//! The engine module provides:
//! - `Converter` - Orchestrates a run over the input directory
//! - `RunStats` / `FileSummary` - What a run produced

mod types;

pub use types::{FileFailure, FileSummary, RunStats};

use crate::decode::{build_decoder, DecoderConfig, RecordDecoder, RecordFields};
use crate::discovery::{discover, DiscoveredFile};
use crate::error::{Error, Result};
use crate::output::{output_path, write_csv, CsvWriterConfig};
use crate::settings::Settings;
use crate::transform::RecordTransformer;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Converts every matching input file into a CSV file
pub struct Converter {
    settings: Settings,
    base_dir: PathBuf,
    decoder: Box<dyn RecordDecoder>,
    fields: RecordFields,
    transformer: RecordTransformer,
    writer_config: CsvWriterConfig,
}

impl Converter {
    /// Create a converter; relative directories resolve against `base_dir`
    pub fn new(settings: Settings, base_dir: impl Into<PathBuf>) -> Result<Self> {
        let decoder = build_decoder(&DecoderConfig::from(&settings.records));
        let fields = RecordFields::from(&settings.records);
        let transformer = RecordTransformer::from(&settings);
        let writer_config = CsvWriterConfig::from_settings(&settings.csv)?;

        Ok(Self {
            settings,
            base_dir: base_dir.into(),
            decoder,
            fields,
            transformer,
            writer_config,
        })
    }

    /// Get the settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Directory scanned for input files
    pub fn input_dir(&self) -> PathBuf {
        self.settings.input_dir(&self.base_dir)
    }

    /// Directory output files are written to
    pub fn output_dir(&self) -> PathBuf {
        self.settings.output_dir(&self.base_dir)
    }

    /// Convert all input files
    ///
    /// Fails only when the input directory is missing or cannot be listed.
    /// A file that cannot be converted is logged, recorded in the returned
    /// stats and skipped.
    pub fn run(&self) -> Result<RunStats> {
        let start = Instant::now();
        let mut stats = RunStats::new();

        let input_dir = self.input_dir();
        let output_dir = self.output_dir();
        let files = discover(&input_dir, self.settings.input_suffix())?;

        info!(
            "Converting files matching '*{}' in {}",
            self.settings.input_suffix(),
            input_dir.display()
        );

        for item in files {
            let file = match item {
                Ok(file) => file,
                Err(e) => {
                    error!("Skipping unreadable entry in {}: {e}", input_dir.display());
                    stats.add_failure(&input_dir, e.to_string());
                    continue;
                }
            };
            stats.add_found();

            match self.convert_file(&file, &output_dir) {
                Ok(summary) => {
                    info!(
                        "Converted {} -> {} ({} rows)",
                        file.path.display(),
                        summary.output.display(),
                        summary.rows
                    );
                    if summary.skipped > 0 {
                        warn!(
                            "{} records skipped in {}",
                            summary.skipped,
                            file.path.display()
                        );
                    }
                    stats.add_converted(&summary);
                }
                Err(e) => {
                    error!("Error processing file {}: {e}", file.path.display());
                    stats.add_failure(&file.path, e.to_string());
                }
            }
        }

        if stats.files_found == 0 {
            info!("No input files found in {}", input_dir.display());
        }

        stats.set_duration(start.elapsed().as_millis() as u64);

        info!(
            "Run complete: {} converted, {} failed, {} rows in {}ms",
            stats.files_converted,
            stats.files_failed(),
            stats.rows_written,
            stats.duration_ms
        );

        Ok(stats)
    }

    /// Convert one input file into `<output_dir>/<period><output suffix>`
    ///
    /// All rows are produced before the output file is opened.
    pub fn convert_file(&self, file: &DiscoveredFile, output_dir: &Path) -> Result<FileSummary> {
        let body = fs::read_to_string(&file.path).map_err(|source| Error::FileRead {
            path: file.path.clone(),
            source,
        })?;

        let raw = self.decoder.decode(&body)?;
        debug!("Decoded {} records from {}", raw.len(), file.path.display());

        let records = raw
            .iter()
            .enumerate()
            .map(|(index, value)| self.fields.to_record(index, value));
        let transformed = self.transformer.transform_all(records)?;

        let output = output_path(output_dir, &file.period, self.settings.output_suffix());
        let rows = write_csv(
            &output,
            &self.settings.header_row(),
            &transformed.rows,
            &self.writer_config,
        )?;

        Ok(FileSummary {
            input: file.path.clone(),
            output,
            rows,
            skipped: transformed.skipped,
        })
    }
}

#[cfg(test)]
mod tests;
