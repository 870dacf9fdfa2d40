//! Mapping of raw JSON records onto [`ConsumptionRecord`]

use super::types::DEFAULT_TIMESTAMP_FIELDS;
use crate::error::{Error, Result};
use crate::settings::RecordSettings;
use crate::types::ConsumptionRecord;
use serde_json::Value;

/// Field names used to read a consumption record
#[derive(Debug, Clone)]
pub struct RecordFields {
    timestamp_field: Option<String>,
    consumption_field: String,
}

impl Default for RecordFields {
    fn default() -> Self {
        Self {
            timestamp_field: None,
            consumption_field: "consumption".to_string(),
        }
    }
}

impl From<&RecordSettings> for RecordFields {
    fn from(settings: &RecordSettings) -> Self {
        Self {
            timestamp_field: settings.timestamp_field.clone(),
            consumption_field: settings.consumption_field.clone(),
        }
    }
}

impl RecordFields {
    /// Use an explicit timestamp field instead of the defaults
    #[must_use]
    pub fn with_timestamp_field(mut self, field: impl Into<String>) -> Self {
        self.timestamp_field = Some(field.into());
        self
    }

    /// Use a different consumption field
    #[must_use]
    pub fn with_consumption_field(mut self, field: impl Into<String>) -> Self {
        self.consumption_field = field.into();
        self
    }

    /// Map one raw record; `index` is only used in error messages
    ///
    /// A missing or null consumption becomes `None`. Anything else that is
    /// not a JSON number is a format error.
    pub fn to_record(&self, index: usize, value: &Value) -> Result<ConsumptionRecord> {
        let obj = value.as_object().ok_or_else(|| {
            Error::format(format!("record {index} is not a JSON object"))
        })?;

        let timestamp = match &self.timestamp_field {
            Some(field) => obj.get(field.as_str()),
            None => DEFAULT_TIMESTAMP_FIELDS
                .iter()
                .find_map(|field| obj.get(*field)),
        };

        let timestamp = match timestamp {
            Some(Value::String(s)) => s.clone(),
            Some(other) => {
                return Err(Error::format(format!(
                    "record {index}: timestamp must be a string, found {other}"
                )))
            }
            None => {
                return Err(Error::format(format!(
                    "record {index}: missing timestamp field"
                )))
            }
        };

        let consumption = match obj.get(self.consumption_field.as_str()) {
            None | Some(Value::Null) => None,
            Some(Value::Number(n)) => Some(n.as_f64().ok_or_else(|| {
                Error::format(format!("record {index}: consumption {n} is out of range"))
            })?),
            Some(other) => {
                return Err(Error::format(format!(
                    "record {index}: consumption must be numeric, found {other}"
                )))
            }
        };

        Ok(ConsumptionRecord {
            timestamp,
            consumption,
        })
    }
}
