//! JSON reading for [`RawTable`]s.
//!
//! Supported inputs:
//! - A JSON array of objects: `[{"id":"USA","population":331000000}, ...]`
//! - Spreadsheet-style value ranges: `{"values": [["id","name"], ["USA","United States"]]}`
//! - A bare array of arrays whose first row is the header
//!
//! Every cell is rendered back to text so the typed layer sees the same input regardless of the
//! source format.

use std::fs;
use std::path::Path;

use serde_json::Value as JsonValue;

use crate::error::{EtlError, EtlResult};
use crate::types::RawTable;

/// Read a JSON file into a [`RawTable`].
pub fn read_json_table_from_path(path: impl AsRef<Path>) -> EtlResult<RawTable> {
    let text = fs::read_to_string(path)?;
    read_json_table_from_str(&text)
}

/// Read JSON from an in-memory string into a [`RawTable`].
pub fn read_json_table_from_str(input: &str) -> EtlResult<RawTable> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(EtlError::SchemaMismatch {
            message: "json input is empty".to_string(),
        });
    }

    let v: JsonValue = serde_json::from_str(trimmed)?;
    match v {
        JsonValue::Object(mut obj) => match obj.remove("values") {
            Some(JsonValue::Array(rows)) => table_from_arrays(&rows),
            _ => Err(EtlError::SchemaMismatch {
                message: "json object input must have a 'values' array".to_string(),
            }),
        },
        JsonValue::Array(items) => match items.first() {
            None => Ok(RawTable::default()),
            Some(JsonValue::Array(_)) => table_from_arrays(&items),
            Some(JsonValue::Object(_)) => table_from_objects(&items),
            Some(_) => Err(EtlError::SchemaMismatch {
                message: "json array must contain objects or arrays".to_string(),
            }),
        },
        _ => Err(EtlError::SchemaMismatch {
            message: "json must be an array of objects, an array of arrays, or {\"values\": [...]}"
                .to_string(),
        }),
    }
}

fn table_from_arrays(rows: &[JsonValue]) -> EtlResult<RawTable> {
    let mut iter = rows.iter().enumerate();
    let headers: Vec<String> = match iter.next() {
        Some((_, JsonValue::Array(cells))) => cells.iter().map(|c| cell_to_string(c).trim().to_string()).collect(),
        Some(_) => {
            return Err(EtlError::SchemaMismatch {
                message: "header row is not an array".to_string(),
            });
        }
        None => return Ok(RawTable::default()),
    };

    let mut out = Vec::with_capacity(rows.len().saturating_sub(1));
    for (idx0, row) in iter {
        let cells = row.as_array().ok_or_else(|| EtlError::SchemaMismatch {
            message: format!("row {} is not an array", idx0 + 1),
        })?;
        out.push(cells.iter().map(cell_to_string).collect());
    }
    Ok(RawTable::new(headers, out))
}

fn table_from_objects(items: &[JsonValue]) -> EtlResult<RawTable> {
    // Header is the union of keys in first-seen order.
    let mut headers: Vec<String> = Vec::new();
    for (idx0, item) in items.iter().enumerate() {
        let obj = item.as_object().ok_or_else(|| EtlError::SchemaMismatch {
            message: format!("row {} is not a json object", idx0 + 1),
        })?;
        for key in obj.keys() {
            if !headers.iter().any(|h| h == key.trim()) {
                headers.push(key.trim().to_string());
            }
        }
    }

    let rows = items
        .iter()
        .filter_map(|item| item.as_object())
        .map(|obj| {
            headers
                .iter()
                .map(|h| {
                    obj.iter()
                        .find(|(k, _)| k.trim() == h)
                        .map(|(_, v)| cell_to_string(v))
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect();

    Ok(RawTable::new(headers, rows))
}

/// Render a JSON scalar as cell text. Integral floats print without a fractional part.
fn cell_to_string(v: &JsonValue) -> String {
    match v {
        JsonValue::Null => String::new(),
        JsonValue::String(s) => s.clone(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => (f as i64).to_string(),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}
