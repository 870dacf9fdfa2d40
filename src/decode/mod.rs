//! Input decoder module
//!
//! Supports: JSON, JSONL
//!
//! # Overview
//!
//! The decode module turns an input document into consumption records.
//! Each decoder extracts raw records from the document using a configured
//! path (or the Tibber export layout), and [`RecordFields`] maps each raw
//! record onto a [`ConsumptionRecord`](crate::types::ConsumptionRecord).

mod decoders;
mod records;
mod types;

pub use decoders::{build_decoder, JsonDecoder, JsonlDecoder};
pub use records::RecordFields;
pub use types::{
    DecoderConfig, DecoderFormat, RecordDecoder, DEFAULT_TIMESTAMP_FIELDS, TIBBER_RECORD_PATH,
};
