//! YAML parser for converter settings
//!
//! Parses and validates the settings file.

use crate::error::{Error, Result};
use crate::settings::types::Settings;
use chrono::format::{Item, StrftimeItems};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Default settings file location, relative to the working directory
pub const DEFAULT_SETTINGS_PATH: &str = "config/config.yaml";

/// Upper bound for `processing.decimal_places`; f64 carries ~15 significant digits
pub const MAX_DECIMAL_PLACES: u32 = 15;

/// Load settings from a YAML file
///
/// # Examples
///
/// ```ignore
/// let settings = load_settings("config/config.yaml")?;
/// ```
pub fn load_settings(path: impl AsRef<Path>) -> Result<Settings> {
    let path = path.as_ref();

    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::config(format!(
                "Configuration file not found at: {}",
                path.display()
            ))
        } else {
            Error::config(format!(
                "Failed to read configuration file '{}': {}",
                path.display(),
                e
            ))
        }
    })?;

    debug!("Loaded settings file {}", path.display());
    load_settings_from_str(&content)
}

/// Load settings from a YAML string
pub fn load_settings_from_str(yaml: &str) -> Result<Settings> {
    let settings: Settings = serde_yaml::from_str(yaml)
        .map_err(|e| Error::config(format!("Invalid YAML in configuration file: {e}")))?;

    validate_settings(&settings)?;
    Ok(settings)
}

/// Validate loaded settings
fn validate_settings(settings: &Settings) -> Result<()> {
    let dirs = &settings.directories;
    for (field, value) in [
        ("directories.data", &dirs.data),
        ("directories.input", &dirs.input),
        ("directories.output", &dirs.output),
    ] {
        if value.as_os_str().is_empty() {
            return Err(Error::missing_field(field));
        }
    }

    if settings.paths.input.json_file_suffix.is_empty() {
        return Err(Error::missing_field("paths.input.json_file_suffix"));
    }

    if settings.paths.output.csv_file_suffix.is_empty() {
        return Err(Error::invalid_value(
            "paths.output.csv_file_suffix",
            "must not be empty",
        ));
    }

    let total = &settings.paths.output.total_file;
    if total.is_empty() || total.contains(['/', '\\']) {
        return Err(Error::invalid_value(
            "paths.output.total_file",
            "must be a plain file name",
        ));
    }

    validate_csv(settings)?;
    validate_processing(settings)?;

    Ok(())
}

/// Validate the `csv` section
fn validate_csv(settings: &Settings) -> Result<()> {
    let csv = &settings.csv;

    if csv.header.len() != 2 {
        return Err(Error::invalid_value(
            "csv.header",
            format!(
                "expected 2 column names (timestamp, consumption), got {}",
                csv.header.len()
            ),
        ));
    }

    if csv.header.iter().any(|name| name.trim().is_empty()) {
        return Err(Error::invalid_value(
            "csv.header",
            "column names must not be empty",
        ));
    }

    validate_date_format(&csv.date_format)?;

    if matches!(csv.decimal_separator, '\n' | '\r') {
        return Err(Error::invalid_value(
            "csv.decimal_separator",
            "must not be a line break",
        ));
    }

    if !csv.delimiter.is_ascii() || matches!(csv.delimiter, '\n' | '\r' | '"') {
        return Err(Error::invalid_value(
            "csv.delimiter",
            format!("'{}' cannot be used as a field delimiter", csv.delimiter),
        ));
    }

    if csv.decimal_separator == csv.delimiter {
        warn!(
            "csv.decimal_separator equals csv.delimiter ('{}'); consumption values will span two fields unless quoted",
            csv.delimiter
        );
    }

    Ok(())
}

/// Validate the `processing` section
fn validate_processing(settings: &Settings) -> Result<()> {
    let processing = &settings.processing;

    if !processing.consumption_multiplier.is_finite() {
        return Err(Error::invalid_value(
            "processing.consumption_multiplier",
            "must be a finite number",
        ));
    }

    if processing.decimal_places > MAX_DECIMAL_PLACES {
        return Err(Error::invalid_value(
            "processing.decimal_places",
            format!("must be at most {MAX_DECIMAL_PLACES}"),
        ));
    }

    Ok(())
}

/// Reject strftime patterns chrono cannot render
fn validate_date_format(format: &str) -> Result<()> {
    if format.is_empty() {
        return Err(Error::invalid_value("csv.date_format", "must not be empty"));
    }

    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(Error::invalid_value(
            "csv.date_format",
            format!("'{format}' is not a valid strftime pattern"),
        ));
    }

    Ok(())
}
