use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::domain::{Cell, Row};

/// Confidence assigned to a cell the model returned without a score.
///
/// An unscored cell is indistinguishable from an illegible one, so it gets
/// the floor and any positive threshold will flag it for review.
pub const OMITTED_CONFIDENCE: f64 = 0.0;

static FENCED_JSON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(?:json)?\s*(\{.*?)\s*```").unwrap());

/// Model-detected table, positionally aligned to its own headers.
///
/// Not yet a [`crate::domain::Table`]: header resolution decides the
/// effective column set before the data leaves the extraction pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTable {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

#[derive(Debug, thiserror::Error)]
#[error("malformed model response: {0}")]
pub struct MalformedResponse(pub String);

/// Parses the model's raw output into a table with per-cell confidence.
///
/// The text is untrusted: models wrap JSON in prose or markdown fences, key
/// rows by header name or emit positional arrays, and omit or misplace
/// confidence scores. Three wire shapes are accepted:
///
/// - `{"headers": [...], "rows": [[...], ...]}` with optional parallel
///   `"confidence"` rows,
/// - `{"headers": [...], "rows": [{header: value, ...}, ...]}`,
/// - `{"data": [{header: value, ...}, ...], "confidence": [{header: score,
///   ...}, ...]}` (headers taken from row keys in first-seen order).
///
/// Every cell value is normalized to a string; missing cells become empty
/// strings at [`OMITTED_CONFIDENCE`].
pub fn parse_table_response(raw: &str) -> Result<ParsedTable, MalformedResponse> {
    let value = extract_json_object(raw).ok_or_else(|| {
        MalformedResponse("no parseable JSON object found in model output".to_string())
    })?;

    let Value::Object(object) = value else {
        return Err(MalformedResponse("model output is not a JSON object".to_string()));
    };

    let (rows_value, confidence_value) = if object.contains_key("rows") {
        (object.get("rows"), object.get("confidence"))
    } else if object.contains_key("data") {
        (object.get("data"), object.get("confidence"))
    } else {
        return Err(MalformedResponse(
            "JSON object carries neither \"rows\" nor \"data\"".to_string(),
        ));
    };

    let rows = rows_value
        .and_then(Value::as_array)
        .ok_or_else(|| MalformedResponse("row list is not a JSON array".to_string()))?;

    let mut headers = header_list(object.get("headers"));
    if headers.is_empty() {
        headers = derive_headers(rows);
    }

    if headers.is_empty() {
        return Err(MalformedResponse(if rows.is_empty() {
            "response contains neither headers nor rows".to_string()
        } else {
            "positional rows arrived without a header list".to_string()
        }));
    }

    Ok(ParsedTable {
        rows: parse_rows(&headers, rows, confidence_value),
        headers,
    })
}

/// Candidate JSON, in order of preference: fenced blocks, the first balanced
/// `{...}` span, the whole trimmed text.
fn extract_json_object(raw: &str) -> Option<Value> {
    for captures in FENCED_JSON.captures_iter(raw) {
        if let Ok(value) = serde_json::from_str::<Value>(captures[1].trim()) {
            if value.is_object() {
                return Some(value);
            }
        }
    }

    if let Some(span) = balanced_object_span(raw) {
        if let Ok(value) = serde_json::from_str::<Value>(span) {
            if value.is_object() {
                return Some(value);
            }
        }
    }

    serde_json::from_str::<Value>(raw.trim())
        .ok()
        .filter(Value::is_object)
}

/// Outermost balanced `{...}` span starting at the first brace, tracking
/// string literals and escapes so braces inside values do not miscount.
fn balanced_object_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, byte) in text.as_bytes().iter().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if *byte == b'\\' {
                escaped = true;
            } else if *byte == b'"' {
                in_string = false;
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=offset]);
                }
            }
            _ => {}
        }
    }

    None
}

fn header_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().map(|item| render_scalar(item).trim().to_string()).collect())
        .unwrap_or_default()
}

/// Union of row-object keys in first-seen order.
fn derive_headers(rows: &[Value]) -> Vec<String> {
    let mut headers: Vec<String> = Vec::new();
    for row in rows {
        if let Value::Object(map) = row {
            for key in map.keys() {
                if !headers.iter().any(|header| header == key) {
                    headers.push(key.clone());
                }
            }
        }
    }
    headers
}

fn parse_rows(headers: &[String], rows: &[Value], confidence: Option<&Value>) -> Vec<Row> {
    let confidence_rows = confidence.and_then(Value::as_array);

    rows.iter()
        .enumerate()
        .map(|(row_index, row)| {
            let confidence_row = confidence_rows.and_then(|rows| rows.get(row_index));
            let cells = headers
                .iter()
                .enumerate()
                .map(|(column, header)| {
                    let (value, inline) = match row {
                        Value::Array(items) => {
                            items.get(column).map(split_cell).unwrap_or_default()
                        }
                        Value::Object(map) => {
                            map.get(header).map(split_cell).unwrap_or_default()
                        }
                        other if column == 0 => (render_scalar(other), None),
                        _ => (String::new(), None),
                    };
                    let confidence = inline
                        .or_else(|| confidence_for(confidence_row, header, column))
                        .map(clamp_unit)
                        .unwrap_or(OMITTED_CONFIDENCE);
                    Cell::new(value, confidence)
                })
                .collect();
            Row::new(cells)
        })
        .collect()
}

/// A cell may be a bare scalar or a `{"value": ..., "confidence": ...}`
/// object carrying its own score.
fn split_cell(value: &Value) -> (String, Option<f64>) {
    if let Value::Object(map) = value {
        if map.contains_key("value") {
            let rendered = map.get("value").map(render_scalar).unwrap_or_default();
            return (rendered, map.get("confidence").and_then(numeric));
        }
    }
    (render_scalar(value), None)
}

fn confidence_for(confidence_row: Option<&Value>, header: &str, column: usize) -> Option<f64> {
    match confidence_row? {
        Value::Array(items) => items.get(column).and_then(numeric),
        Value::Object(map) => map.get(header).and_then(numeric),
        _ => None,
    }
}

fn numeric(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|text| text.trim().parse().ok()))
}

fn clamp_unit(score: f64) -> f64 {
    if score.is_nan() {
        OMITTED_CONFIDENCE
    } else {
        score.clamp(0.0, 1.0)
    }
}

fn render_scalar(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        nested => nested.to_string(),
    }
}
