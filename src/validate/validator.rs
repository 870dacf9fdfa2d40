//! CSV validator
//!
//! Reads output files back and checks their structure against the header
//! settings and their content for parse errors and holes in the hourly
//! series.

use super::types::{ValidationIssue, ValidationReport};
use crate::discovery::discover;
use crate::error::{Error, Result};
use crate::output::{read_csv, CsvWriterConfig};
use crate::settings::Settings;
use chrono::format::{parse, Parsed, StrftimeItems};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Row span and hours seen for one calendar day
#[derive(Debug)]
struct DayRows {
    hours: BTreeSet<u32>,
    first_row: usize,
    last_row: usize,
}

/// Validates the CSV files in the output directory
#[derive(Debug, Clone)]
pub struct CsvValidator {
    output_dir: PathBuf,
    suffix: String,
    header: Vec<String>,
    date_format: String,
    decimal_separator: char,
    delimiter: u8,
}

impl CsvValidator {
    /// Create a validator for the output directory of `settings`
    pub fn new(settings: &Settings, base_dir: &Path) -> Result<Self> {
        let writer_config = CsvWriterConfig::from_settings(&settings.csv)?;

        Ok(Self {
            output_dir: settings.output_dir(base_dir),
            suffix: settings.output_suffix().to_string(),
            header: settings.csv.header.clone(),
            date_format: settings.csv.date_format.clone(),
            decimal_separator: settings.csv.decimal_separator,
            delimiter: writer_config.delimiter(),
        })
    }

    /// Output files ending with the output suffix, in file-name order
    pub fn csv_files(&self) -> Result<Vec<PathBuf>> {
        if !self.output_dir.is_dir() {
            return Err(Error::discovery(
                &self.output_dir,
                "output directory not found",
            ));
        }

        let mut files = Vec::new();
        for item in discover(&self.output_dir, &self.suffix)? {
            match item {
                Ok(file) => files.push(file.path),
                Err(e) => warn!("Skipping unreadable entry: {e}"),
            }
        }
        Ok(files)
    }

    /// Validate every output file
    pub fn validate_all(&self) -> Result<Vec<ValidationReport>> {
        Ok(self
            .csv_files()?
            .iter()
            .map(|path| self.validate_file(path))
            .collect())
    }

    /// Validate one file; read failures become an issue in the report
    pub fn validate_file(&self, path: &Path) -> ValidationReport {
        let mut report = ValidationReport::new(path);

        let records = match read_csv(path, self.delimiter) {
            Ok(records) => records,
            Err(e) => {
                report.push(ValidationIssue::Unreadable {
                    message: e.to_string(),
                });
                return report;
            }
        };

        let Some((header, rows)) = records.split_first() else {
            report.push(ValidationIssue::MissingHeader);
            return report;
        };

        let numbered: Vec<(usize, Vec<&str>)> = rows
            .iter()
            .enumerate()
            // the header is row 1
            .map(|(index, record)| (index + 2, record.iter().collect()))
            .collect();

        let header: Vec<&str> = header.iter().collect();
        self.check_structure(&header, &numbered, &mut report);
        self.check_content(&numbered, &mut report);

        debug!(
            "Validated {}: {} issues",
            path.display(),
            report.issues.len()
        );
        report
    }

    fn check_structure(
        &self,
        header: &[&str],
        rows: &[(usize, Vec<&str>)],
        report: &mut ValidationReport,
    ) {
        let expected = self.header.len();

        if header.len() < expected {
            report.push(ValidationIssue::HeaderTooShort { expected });
        } else {
            for (index, name) in self.header.iter().enumerate() {
                if header[index] != name.as_str() {
                    report.push(ValidationIssue::HeaderMismatch {
                        name: name.clone(),
                        position: index + 1,
                    });
                }
            }
        }

        for (row, fields) in rows {
            if fields.len() < expected {
                report.push(ValidationIssue::RowTooShort {
                    row: *row,
                    expected,
                });
            }
        }
    }

    fn check_content(&self, rows: &[(usize, Vec<&str>)], report: &mut ValidationReport) {
        let mut first_seen: HashMap<NaiveDateTime, usize> = HashMap::new();
        let mut days: BTreeMap<NaiveDate, DayRows> = BTreeMap::new();
        let mut has_data = false;

        for (row, fields) in rows {
            let row = *row;
            if fields.iter().all(|f| f.is_empty()) {
                continue;
            }
            has_data = true;

            let Some(timestamp) = fields
                .first()
                .and_then(|value| parse_output_timestamp(value, &self.date_format))
            else {
                report.push(ValidationIssue::InvalidTimestamp { row });
                continue;
            };

            let day = days.entry(timestamp.date()).or_insert(DayRows {
                hours: BTreeSet::new(),
                first_row: row,
                last_row: row,
            });
            day.hours.insert(timestamp.hour());
            day.first_row = day.first_row.min(row);
            day.last_row = day.last_row.max(row);

            if let Some(&first_row) = first_seen.get(&timestamp) {
                report.push(ValidationIssue::DuplicateTimestamp {
                    row,
                    value: fields[0].to_string(),
                    first_row,
                });
            } else {
                first_seen.insert(timestamp, row);
            }

            let numeric = fields
                .get(1)
                .map(|value| parse_consumption(value, self.decimal_separator))
                .unwrap_or(false);
            if !numeric {
                report.push(ValidationIssue::InvalidConsumption { row });
            }
        }

        if !has_data {
            report.push(ValidationIssue::HeaderOnly);
        }

        for (date, day) in &days {
            let missing: Vec<u32> = (0..24).filter(|h| !day.hours.contains(h)).collect();
            if !missing.is_empty() {
                report.push(ValidationIssue::MissingHours {
                    date: *date,
                    hours: missing,
                    first_row: day.first_row,
                    last_row: day.last_row,
                });
            }
        }

        let dates: Vec<(&NaiveDate, &DayRows)> = days.iter().collect();
        for pair in dates.windows(2) {
            let (from, earlier) = pair[0];
            let (to, later) = pair[1];
            if from.succ_opt() != Some(*to) {
                report.push(ValidationIssue::DateGap {
                    from: *from,
                    to: *to,
                    last_row: earlier.last_row,
                    first_row: later.first_row,
                });
            }
        }
    }
}

/// Parse an output timestamp with `format`
///
/// Fields the format does not carry default to zero, so formats such as
/// `%Y%m%d:%H` are accepted. The format must carry a full date.
pub fn parse_output_timestamp(value: &str, format: &str) -> Option<NaiveDateTime> {
    let mut parsed = Parsed::new();
    parse(&mut parsed, value, StrftimeItems::new(format)).ok()?;
    let date = parsed.to_naive_date().ok()?;

    // setters refuse to overwrite a parsed value, so these only fill gaps
    let _ = parsed.set_hour(0);
    let _ = parsed.set_minute(0);
    let _ = parsed.set_second(0);
    let time = parsed.to_naive_time().unwrap_or(NaiveTime::MIN);

    Some(date.and_time(time))
}

/// True when `value` is a number once `separator` is replaced by `.`
fn parse_consumption(value: &str, separator: char) -> bool {
    let value = value.trim().trim_matches('"');
    let normalized = if separator == '.' {
        value.to_string()
    } else {
        value.replace(separator, ".")
    };
    normalized.parse::<f64>().is_ok()
}
