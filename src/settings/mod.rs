//! Settings module
//!
//! Load the converter's YAML settings file.
//!
//! # Overview
//!
//! The settings module provides:
//! - `Settings` - Immutable configuration for one run
//! - `load_settings` / `load_settings_from_str` - YAML parsing with validation

mod parser;
mod types;

pub use parser::{load_settings, load_settings_from_str, DEFAULT_SETTINGS_PATH, MAX_DECIMAL_PLACES};
pub use types::{
    CsvSettings, Directories, InputPaths, OutputPaths, PathSettings, ProcessingSettings,
    RecordSettings, Settings,
};
