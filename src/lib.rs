// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::needless_pass_by_value)]

//! # consumption-csv
//!
//! Batch converter for hourly energy-consumption exports (Tibber GraphQL
//! JSON) into CSV files laid out by a YAML settings file.
//!
//! ## Features
//!
//! - **Suffix discovery**: every `<period><suffix>` file in the input directory
//! - **Configurable CSV**: header, date format, decimal separator, delimiter,
//!   trailing empty columns
//! - **Scaling and rounding**: consumption multiplier, fixed decimal places
//! - **Total file**: merge the monthly CSVs in chronological order
//! - **Validation**: duplicate timestamps, missing hours, date gaps
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use consumption_csv::{engine::Converter, load_settings, Result};
//!
//! fn main() -> Result<()> {
//!     let settings = load_settings("config/config.yaml")?;
//!     let stats = Converter::new(settings, std::env::current_dir()?)?.run()?;
//!     println!("{} files converted", stats.files_converted);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//!  settings ──► discovery ──► decode ──► transform ──► output
//!                                                        │
//!                               validate ◄── combine ◄───┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// YAML settings file
pub mod settings;

/// Input file discovery
pub mod discovery;

/// Input document decoders (JSON, JSONL)
pub mod decode;

/// Record to row transformation
pub mod transform;

/// CSV output
pub mod output;

/// Conversion engine
pub mod engine;

/// Total file builder
pub mod combine;

/// Output validation
pub mod validate;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use engine::{Converter, RunStats};
pub use settings::{load_settings, load_settings_from_str, Settings};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
