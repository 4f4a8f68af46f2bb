//! Bulk paste parsing: one blob of text holding all 30 values.
//!
//! Two shapes are accepted, decided by the first non-blank character:
//!
//! - `[`: a JSON array of exactly 30 finite numbers (numeric strings allowed).
//! - anything else: CSV-like text. Only the last non-empty line is used, so a
//!   header row may be pasted above the data. Tokens are separated by `,`,
//!   tab, `;` or whitespace runs; empty tokens are ignored.

use serde_json::Value;

use crate::error::InputError;
use crate::schema::FEATURE_COUNT;
use crate::vector::parse_finite;

/// Parse a bulk paste into values in schema order.
pub fn parse_bulk(text: &str) -> Result<[f64; FEATURE_COUNT], InputError> {
    let text = text.trim();
    if text.starts_with('[') {
        parse_json_array(text)
    } else {
        parse_csv_row(text)
    }
}

fn parse_json_array(text: &str) -> Result<[f64; FEATURE_COUNT], InputError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| InputError::PasteJson(e.to_string()))?;
    let items = value.as_array().ok_or(InputError::PasteShape)?;
    if items.len() != FEATURE_COUNT {
        return Err(InputError::PasteShape);
    }

    let mut out = [0.0; FEATURE_COUNT];
    for (slot, item) in out.iter_mut().zip(items) {
        *slot = json_number(item).ok_or(InputError::PasteShape)?;
    }
    Ok(out)
}

fn json_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_finite(s),
        _ => None,
    }
}

fn parse_csv_row(text: &str) -> Result<[f64; FEATURE_COUNT], InputError> {
    let last = text
        .lines()
        .rev()
        .find(|line| !line.is_empty())
        .ok_or(InputError::PasteShape)?;

    let tokens: Vec<&str> = last
        .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .collect();
    if tokens.len() != FEATURE_COUNT {
        return Err(InputError::PasteShape);
    }

    let mut out = [0.0; FEATURE_COUNT];
    for (slot, token) in out.iter_mut().zip(&tokens) {
        *slot = parse_finite(token).ok_or(InputError::PasteShape)?;
    }
    Ok(out)
}
