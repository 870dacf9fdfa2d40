//! Decoder types and traits
//!
//! Defines the core decoder abstractions.

use crate::error::Result;
use crate::settings::RecordSettings;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Record path of the Tibber GraphQL consumption export
pub const TIBBER_RECORD_PATH: &str = "data.viewer.homes[0].consumption.nodes";

/// Timestamp field names tried in order when none is configured
pub const DEFAULT_TIMESTAMP_FIELDS: &[&str] = &["timestamp", "from"];

/// Format of an input document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecoderFormat {
    /// Single JSON document (default)
    #[default]
    Json,
    /// JSON Lines (one record per line)
    Jsonl,
}

/// Configuration for decoding input documents
#[derive(Debug, Clone, Default)]
pub struct DecoderConfig {
    /// Document format
    pub format: DecoderFormat,
    /// Dot path to the record array (JSON only)
    pub record_path: Option<String>,
}

impl DecoderConfig {
    /// Create a JSON decoder config
    pub fn json() -> Self {
        Self {
            format: DecoderFormat::Json,
            ..Default::default()
        }
    }

    /// Create a JSON decoder config with a record path
    pub fn json_with_path(path: impl Into<String>) -> Self {
        Self {
            format: DecoderFormat::Json,
            record_path: Some(path.into()),
        }
    }

    /// Create a JSONL decoder config
    pub fn jsonl() -> Self {
        Self {
            format: DecoderFormat::Jsonl,
            ..Default::default()
        }
    }

    /// Set the record path
    #[must_use]
    pub fn with_record_path(mut self, path: impl Into<String>) -> Self {
        self.record_path = Some(path.into());
        self
    }
}

impl From<&RecordSettings> for DecoderConfig {
    fn from(settings: &RecordSettings) -> Self {
        Self {
            format: settings.format,
            record_path: settings.path.clone(),
        }
    }
}

/// Trait for decoding input documents into raw records
pub trait RecordDecoder: Send + Sync {
    /// Decode the document into a list of raw records, in document order
    fn decode(&self, body: &str) -> Result<Vec<Value>>;
}
