//! Raw value input parsing
//!
//! Turns text from a data source into a list of raw values. Sources rarely
//! hand over bare numbers, so record arrays can be narrowed with a JSON
//! pointer (e.g. `/population` for objects or `/4` for row arrays).

use crate::error::BenfordError;
use crate::types::RawValue;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Supported input encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputFormat {
    /// A single JSON array of values or records
    Json,
    /// One JSON value or record per line
    Ndjson,
    /// One plain value per line; `#` starts a comment line
    Lines,
}

/// Parser for raw value inputs
pub struct InputParser;

impl InputParser {
    /// Parse `input` according to `format`, extracting `field` from each
    /// record when given. `field` is ignored for [`InputFormat::Lines`].
    pub fn parse(
        input: &str,
        format: InputFormat,
        field: Option<&str>,
    ) -> Result<Vec<RawValue>, BenfordError> {
        match format {
            InputFormat::Json => Self::parse_array(input, field),
            InputFormat::Ndjson => Self::parse_ndjson(input, field),
            InputFormat::Lines => Ok(Self::parse_lines(input)),
        }
    }

    /// Parse a JSON array
    pub fn parse_array(json: &str, field: Option<&str>) -> Result<Vec<RawValue>, BenfordError> {
        let items: Vec<Value> = serde_json::from_str(json)?;
        Ok(items
            .iter()
            .map(|item| to_raw_value(item, field))
            .collect())
    }

    /// Parse NDJSON (newline-delimited JSON)
    pub fn parse_ndjson(ndjson: &str, field: Option<&str>) -> Result<Vec<RawValue>, BenfordError> {
        let mut values = Vec::new();
        for (line_num, line) in ndjson.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match serde_json::from_str::<Value>(trimmed) {
                Ok(item) => values.push(to_raw_value(&item, field)),
                Err(e) => {
                    return Err(BenfordError::ParseError(format!(
                        "Failed to parse line {}: {}",
                        line_num + 1,
                        e
                    )));
                }
            }
        }
        Ok(values)
    }

    /// Parse plain text, one value per line
    pub fn parse_lines(text: &str) -> Vec<RawValue> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(RawValue::from)
            .collect()
    }
}

/// Map a JSON item to a raw value. Anything that is not a number or string
/// becomes an empty text value, which ingestion then drops.
fn to_raw_value(item: &Value, field: Option<&str>) -> RawValue {
    let target = match field {
        Some(pointer) => item.pointer(pointer),
        None => Some(item),
    };

    match target {
        Some(Value::Number(n)) => n
            .as_f64()
            .map(RawValue::Number)
            .unwrap_or_else(|| RawValue::Text(n.to_string())),
        Some(Value::String(s)) => RawValue::Text(s.clone()),
        _ => RawValue::Text(String::new()),
    }
}
