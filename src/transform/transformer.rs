//! Record transformer
//!
//! Turns consumption records into output rows: timestamp reformatting,
//! scaling, rounding and decimal-separator substitution.

use crate::error::{Error, Result};
use crate::settings::Settings;
use crate::types::{
    ConsumptionRecord, MissingConsumption, OutputRow, RecordErrorPolicy, RoundingMode,
};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use std::fmt::Write as _;
use tracing::{debug, warn};

/// Naive ISO 8601 layouts accepted when a timestamp carries no offset
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Rows produced from one file's records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformOutput {
    /// Rows in source order
    pub rows: Vec<OutputRow>,
    /// Records dropped by the skip policies
    pub skipped: usize,
}

/// Converts [`ConsumptionRecord`]s into [`OutputRow`]s
#[derive(Debug, Clone)]
pub struct RecordTransformer {
    date_format: String,
    decimal_separator: char,
    empty_columns: usize,
    multiplier: f64,
    decimal_places: u32,
    rounding: RoundingMode,
    missing_consumption: MissingConsumption,
    on_record_error: RecordErrorPolicy,
}

impl Default for RecordTransformer {
    fn default() -> Self {
        Self {
            date_format: "%Y-%m-%d %H:%M:%S".to_string(),
            decimal_separator: '.',
            empty_columns: 0,
            multiplier: 1.0,
            decimal_places: 2,
            rounding: RoundingMode::default(),
            missing_consumption: MissingConsumption::default(),
            on_record_error: RecordErrorPolicy::default(),
        }
    }
}

impl From<&Settings> for RecordTransformer {
    fn from(settings: &Settings) -> Self {
        Self {
            date_format: settings.csv.date_format.clone(),
            decimal_separator: settings.csv.decimal_separator,
            empty_columns: settings.csv.empty_columns,
            multiplier: settings.processing.consumption_multiplier,
            decimal_places: settings.processing.decimal_places,
            rounding: settings.processing.rounding,
            missing_consumption: settings.processing.missing_consumption,
            on_record_error: settings.processing.on_record_error,
        }
    }
}

impl RecordTransformer {
    /// Create a transformer with default formatting
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output date format
    #[must_use]
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// Set the decimal separator
    #[must_use]
    pub fn with_decimal_separator(mut self, separator: char) -> Self {
        self.decimal_separator = separator;
        self
    }

    /// Set the number of trailing empty columns
    #[must_use]
    pub fn with_empty_columns(mut self, count: usize) -> Self {
        self.empty_columns = count;
        self
    }

    /// Set the consumption multiplier
    #[must_use]
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Set the number of decimal places
    #[must_use]
    pub fn with_decimal_places(mut self, places: u32) -> Self {
        self.decimal_places = places;
        self
    }

    /// Set the rounding mode
    #[must_use]
    pub fn with_rounding(mut self, rounding: RoundingMode) -> Self {
        self.rounding = rounding;
        self
    }

    /// Set the missing-consumption policy
    #[must_use]
    pub fn with_missing_consumption(mut self, policy: MissingConsumption) -> Self {
        self.missing_consumption = policy;
        self
    }

    /// Set the record error policy
    #[must_use]
    pub fn with_record_error_policy(mut self, policy: RecordErrorPolicy) -> Self {
        self.on_record_error = policy;
        self
    }

    /// Transform one record
    ///
    /// Returns `Ok(None)` when the record is dropped because its consumption
    /// is missing and the policy is [`MissingConsumption::Skip`].
    pub fn transform(&self, record: &ConsumptionRecord) -> Result<Option<OutputRow>> {
        let consumption = match (record.consumption, self.missing_consumption) {
            (Some(value), _) => value,
            (None, MissingConsumption::Zero) => {
                debug!("Missing consumption at {}, using 0", record.timestamp);
                0.0
            }
            (None, MissingConsumption::Skip) => {
                debug!("Missing consumption at {}, skipping", record.timestamp);
                return Ok(None);
            }
            (None, MissingConsumption::Error) => {
                return Err(Error::format(format!(
                    "missing consumption at {}",
                    record.timestamp
                )))
            }
        };

        let timestamp = parse_source_timestamp(&record.timestamp)?;
        let timestamp = format_timestamp(&timestamp, &self.date_format)?;
        let consumption = format_consumption(
            consumption,
            self.multiplier,
            self.decimal_places,
            self.rounding,
            self.decimal_separator,
        )?;

        Ok(Some(OutputRow::new(
            timestamp,
            consumption,
            self.empty_columns,
        )))
    }

    /// Transform all records of one file, preserving their order
    ///
    /// Record-level format errors abort the whole batch under
    /// [`RecordErrorPolicy::AbortFile`]; under
    /// [`RecordErrorPolicy::SkipRecord`] they are logged and counted.
    /// Other errors always abort.
    pub fn transform_all<I>(&self, records: I) -> Result<TransformOutput>
    where
        I: IntoIterator<Item = Result<ConsumptionRecord>>,
    {
        let mut output = TransformOutput::default();

        for (index, record) in records.into_iter().enumerate() {
            let row = record.and_then(|record| self.transform(&record));

            match row {
                Ok(Some(row)) => output.rows.push(row),
                Ok(None) => output.skipped += 1,
                Err(e) if e.is_format() && self.on_record_error == RecordErrorPolicy::SkipRecord => {
                    warn!("Skipping record {index}: {e}");
                    output.skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        Ok(output)
    }
}

/// Parse a source timestamp
///
/// Accepts RFC 3339 (`2024-01-15T10:00:00Z`, `2024-11-01T00:00:00.000+01:00`),
/// naive ISO 8601 date-times (taken as UTC) and plain dates (midnight UTC).
pub fn parse_source_timestamp(value: &str) -> Result<DateTime<FixedOffset>> {
    let trimmed = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt);
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc().fixed_offset());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc().fixed_offset());
        }
    }

    Err(Error::invalid_timestamp(
        value,
        "expected an ISO 8601 / RFC 3339 timestamp",
    ))
}

/// Render a timestamp with a strftime pattern, keeping its own offset
pub fn format_timestamp(timestamp: &DateTime<FixedOffset>, format: &str) -> Result<String> {
    let mut rendered = String::new();
    write!(rendered, "{}", timestamp.format(format)).map_err(|_| {
        Error::format(format!("cannot render {timestamp} with '{format}'"))
    })?;
    Ok(rendered)
}

/// Scale, round and render a consumption value
///
/// The result always has exactly `places` digits after the separator.
pub fn format_consumption(
    value: f64,
    multiplier: f64,
    places: u32,
    rounding: RoundingMode,
    separator: char,
) -> Result<String> {
    let scaled = value * multiplier;
    if !scaled.is_finite() {
        return Err(Error::format(format!(
            "consumption {value} x {multiplier} is not a finite number"
        )));
    }

    let rounded = round_to(scaled, places, rounding);
    let rendered = format!("{:.*}", places as usize, rounded);

    if separator == '.' {
        Ok(rendered)
    } else {
        Ok(rendered.replace('.', separator.encode_utf8(&mut [0; 4])))
    }
}

/// Round `value` to `places` decimals
///
/// Fixed-precision formatting already rounds the exact binary value with
/// ties to even, so `HalfEven` leaves the value untouched.
fn round_to(value: f64, places: u32, rounding: RoundingMode) -> f64 {
    match rounding {
        RoundingMode::HalfEven => value,
        RoundingMode::HalfUp => {
            let factor = 10f64.powi(places as i32);
            let rounded = (value * factor).round() / factor;
            if rounded.is_finite() {
                rounded
            } else {
                value
            }
        }
    }
}
