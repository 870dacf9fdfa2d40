//! Transform module
//!
//! Maps decoded consumption records onto CSV rows using the formatting
//! rules from the settings file.

mod transformer;

pub use transformer::{
    format_consumption, format_timestamp, parse_source_timestamp, RecordTransformer,
    TransformOutput,
};
