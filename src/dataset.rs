//! Local dataset loading
//!
//! Reads the JSON records a static widget searches over, from a file or
//! from piped stdin. Accepts either a top-level array or an object with
//! an `items` array, the two shapes lookup endpoints conventionally use.

use std::io::Read;
use std::path::Path;

use serde_json::Value;

use crate::error::TypeaheadError;

/// Load records from a JSON file.
pub fn load_records(path: &Path) -> Result<Vec<Value>, TypeaheadError> {
    let raw = std::fs::read_to_string(path)?;
    records_from_str(&raw)
}

/// Load records from piped stdin.
pub fn load_records_from_stdin() -> Result<Vec<Value>, TypeaheadError> {
    let mut raw = String::new();
    std::io::stdin().read_to_string(&mut raw)?;
    records_from_str(&raw)
}

/// Parse a dataset out of raw JSON text.
pub fn records_from_str(raw: &str) -> Result<Vec<Value>, TypeaheadError> {
    let parsed: Value = serde_json::from_str(raw)
        .map_err(|err| TypeaheadError::InvalidDataset(err.to_string()))?;

    let records = match parsed {
        Value::Array(records) => records,
        Value::Object(mut map) => match map.remove("items") {
            Some(Value::Array(records)) => records,
            _ => {
                return Err(TypeaheadError::InvalidDataset(
                    "expected a top-level array or an object with an `items` array".to_string(),
                ));
            }
        },
        _ => {
            return Err(TypeaheadError::InvalidDataset(
                "expected a top-level array or an object with an `items` array".to_string(),
            ));
        }
    };

    if records.is_empty() {
        return Err(TypeaheadError::EmptyDataset);
    }
    Ok(records)
}
