//! JSON records, as emitted by upstream producers.
//!
//! Accepts either a single object or an array of objects; each object becomes
//! one [`Record`].

use crate::{ParserError, Result};
use constraints_core::{Record, Value};

/// Parses one or many records from JSON text.
///
/// # Example
///
/// ```rust
/// use constraints_parser::parse_records_json;
///
/// let records = parse_records_json(r#"[{"Date": "2023-05-01", "USD": 4.17}]"#).unwrap();
/// assert_eq!(records.len(), 1);
/// ```
pub fn parse_records_json(content: &str) -> Result<Vec<Record>> {
    let json: serde_json::Value = serde_json::from_str(content)?;

    match json {
        serde_json::Value::Object(_) => Ok(vec![into_record(json, 0)?]),
        serde_json::Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| into_record(item, index))
            .collect(),
        other => Err(ParserError::InvalidRecord(format!(
            "expected an object or an array of objects, found {}",
            json_type_name(&other)
        ))),
    }
}

fn into_record(json: serde_json::Value, index: usize) -> Result<Record> {
    match Value::from(json) {
        Value::Map(fields) => Ok(fields),
        other => Err(ParserError::InvalidRecord(format!(
            "record {} is a {}, expected an object",
            index,
            other.type_name()
        ))),
    }
}

fn json_type_name(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
