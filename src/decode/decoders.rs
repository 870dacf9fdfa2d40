//! Decoder implementations
//!
//! Each decoder handles a specific input format.

use super::types::{DecoderConfig, DecoderFormat, RecordDecoder, TIBBER_RECORD_PATH};
use crate::error::{Error, Result};
use serde_json::Value;

// ============================================================================
// JSON Decoder
// ============================================================================

/// JSON decoder with optional record path extraction
#[derive(Debug, Clone, Default)]
pub struct JsonDecoder {
    /// Dot path to the record array
    record_path: Option<String>,
}

impl JsonDecoder {
    /// Create a new JSON decoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a JSON decoder with a record path
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            record_path: Some(path.into()),
        }
    }

    /// Extract records from a JSON value
    ///
    /// Without a configured path, a top-level array is the record list and
    /// an object is searched at the Tibber export path.
    fn extract_records(&self, value: &Value) -> Result<Vec<Value>> {
        match (&self.record_path, value) {
            (Some(path), _) => records_at(value, path),
            (None, Value::Array(arr)) => Ok(arr.clone()),
            (None, Value::Object(_)) => records_at(value, TIBBER_RECORD_PATH),
            (None, other) => Err(Error::decode(format!(
                "expected an array of records or an export object, found {}",
                kind_of(other)
            ))),
        }
    }
}

impl RecordDecoder for JsonDecoder {
    fn decode(&self, body: &str) -> Result<Vec<Value>> {
        let value: Value = serde_json::from_str(body)?;
        self.extract_records(&value)
    }
}

// ============================================================================
// JSONL Decoder
// ============================================================================

/// JSON Lines decoder (one record per line)
#[derive(Debug, Clone, Default)]
pub struct JsonlDecoder;

impl JsonlDecoder {
    /// Create a new JSONL decoder
    pub fn new() -> Self {
        Self
    }
}

impl RecordDecoder for JsonlDecoder {
    fn decode(&self, body: &str) -> Result<Vec<Value>> {
        let mut records = Vec::new();

        for (line_num, line) in body.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let value: Value = serde_json::from_str(line).map_err(|e| Error::Decode {
                message: format!("Failed to parse JSONL at line {}: {e}", line_num + 1),
            })?;

            records.push(value);
        }

        Ok(records)
    }
}

/// Build the decoder for a config
pub fn build_decoder(config: &DecoderConfig) -> Box<dyn RecordDecoder> {
    match config.format {
        DecoderFormat::Json => match &config.record_path {
            Some(path) => Box::new(JsonDecoder::with_path(path.clone())),
            None => Box::new(JsonDecoder::new()),
        },
        DecoderFormat::Jsonl => Box::new(JsonlDecoder::new()),
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Records found at `path`; the path must exist and point at an array
fn records_at(value: &Value, path: &str) -> Result<Vec<Value>> {
    match extract_simple_path(value, path) {
        Some(Value::Array(arr)) => Ok(arr.clone()),
        Some(other) => Err(Error::RecordExtraction {
            path: path.to_string(),
            message: format!("expected an array, found {}", kind_of(other)),
        }),
        None => Err(Error::RecordExtraction {
            path: path.to_string(),
            message: "path not found in document".to_string(),
        }),
    }
}

/// Extract a value using simple dot-notation path
///
/// Supports object keys and array indices such as `homes[0]` or `items[-1]`.
fn extract_simple_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let path = path.strip_prefix("$.").unwrap_or(path);
    if path.is_empty() || path == "$" {
        return Some(value);
    }

    let mut current = value;
    for part in path.split('.') {
        // Handle array indexing like "homes[0]" or "items[-1]"
        if let Some(bracket_pos) = part.find('[') {
            let name = &part[..bracket_pos];
            let index_str = part[bracket_pos + 1..].strip_suffix(']')?;

            if !name.is_empty() {
                current = current.get(name)?;
            }

            let index = index_str.parse::<i64>().ok()?;
            let arr = current.as_array()?;
            let idx = if index < 0 {
                arr.len() as i64 + index
            } else {
                index
            };
            current = arr.get(usize::try_from(idx).ok()?)?;
        } else {
            current = current.get(part)?;
        }
    }

    Some(current)
}

/// Short name of a JSON value's type, for error messages
fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
