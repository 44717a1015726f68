//! Line codec
//!
//! Encoding and decoding of records in the flat-file format.
//!
//! ## Line Format
//!
//! ```text
//! <field 1>,<field 2>,...,<field n>\n
//! ```
//!
//! - Fields appear in schema order, key first; there is no header line
//! - No quoting or escaping: text fields cannot contain `,` or newlines
//! - Int: decimal; Float: exactly two decimals (`88.50`); Bool: `1` / `0`
//!
//! Example (`Student`): `3,Jane Doe,21,88.50`

use crate::error::{Result, RollbookError};
use crate::record::{FieldKind, FieldSpec, FieldValue, Record};

/// Field separator
pub const DELIMITER: &str = ",";

// =============================================================================
// Encoding
// =============================================================================

/// Encode a record as one line (without the trailing newline)
pub fn encode_line<R: Record>(record: &R) -> String {
    record
        .to_fields()
        .iter()
        .map(encode_value)
        .collect::<Vec<_>>()
        .join(DELIMITER)
}

/// Encode a single field value
pub fn encode_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Int(v) => v.to_string(),
        FieldValue::Float(v) => format!("{:.2}", v),
        FieldValue::Text(v) => v.clone(),
        FieldValue::Bool(v) => String::from(if *v { "1" } else { "0" }),
    }
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode one line into a record
///
/// A trailing `\r` is ignored. Fails with `Parse` when the field count does
/// not match the schema or a scalar does not parse.
pub fn decode_line<R: Record>(line: &str) -> Result<R> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let raw: Vec<&str> = line.split(DELIMITER).collect();

    if raw.len() != R::FIELDS.len() {
        return Err(RollbookError::Parse(format!(
            "expected {} fields for {}, found {}",
            R::FIELDS.len(),
            R::KIND,
            raw.len()
        )));
    }

    let values = R::FIELDS
        .iter()
        .zip(raw)
        .map(|(spec, text)| decode_value(spec, text))
        .collect::<Result<Vec<_>>>()?;

    let record = R::from_fields(values)?;
    record
        .validate()
        .map_err(|e| RollbookError::Parse(e.to_string()))?;
    Ok(record)
}

/// Decode a single field according to its schema entry
///
/// Numeric and boolean fields tolerate surrounding whitespace; text is taken
/// verbatim.
pub fn decode_value(spec: &FieldSpec, text: &str) -> Result<FieldValue> {
    let bad = |reason: &str| {
        RollbookError::Parse(format!("field {}: {} ({:?})", spec.name, reason, text))
    };

    match spec.kind {
        FieldKind::Int => text
            .trim()
            .parse()
            .map(FieldValue::Int)
            .map_err(|_| bad("not an integer")),
        FieldKind::Float => text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(FieldValue::Float)
            .ok_or_else(|| bad("not a number")),
        FieldKind::Bool => match text.trim() {
            "1" | "true" => Ok(FieldValue::Bool(true)),
            "0" | "false" => Ok(FieldValue::Bool(false)),
            _ => Err(bad("not a boolean")),
        },
        FieldKind::Text => Ok(FieldValue::Text(text.to_string())),
    }
}
