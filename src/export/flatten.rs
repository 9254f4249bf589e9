// ABOUTME: Flattens JSON objects and arrays of objects into CSV text
// ABOUTME: Nested objects become dotted columns; arrays are embedded as compact JSON
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Deepest object nesting that is expanded into dotted columns
pub const MAX_FLATTEN_DEPTH: usize = 8;

/// Reasons a payload cannot be represented as a table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlattenError {
    /// Top-level value is a scalar, or an array holds something other than objects
    #[error("payload is not tabular: {0}")]
    NotTabular(String),
    /// Nothing to write
    #[error("payload has no rows or no columns")]
    Empty,
    /// Objects nested beyond the supported depth
    #[error("payload nests objects deeper than {MAX_FLATTEN_DEPTH} levels at '{0}'")]
    TooDeep(String),
}

/// CSV text produced from one payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvDocument {
    /// Header line followed by one line per row, joined with `\n`
    pub text: String,
    /// Data rows, excluding the header; quoted cells may span several lines
    pub rows: usize,
}

/// Convert a JSON payload to CSV text
///
/// An object is a single row and an array of objects is one row per element.
/// The header is the union of all row columns in first-seen order. Strings and
/// embedded JSON are quoted with `"` doubled, numbers and booleans are bare,
/// and `null` is an empty cell. Lines end with `\n`.
///
/// # Errors
///
/// Returns a [`FlattenError`] if the payload is not a table, including when a
/// dotted nested column collides with a literal key in the same row
pub fn flatten_to_csv(value: &Value) -> Result<CsvDocument, FlattenError> {
    let objects: Vec<&Map<String, Value>> = match value {
        Value::Object(map) => vec![map],
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                item.as_object().ok_or_else(|| {
                    FlattenError::NotTabular(format!(
                        "array element {index} is {}",
                        type_name(item)
                    ))
                })
            })
            .collect::<Result<_, _>>()?,
        other => {
            return Err(FlattenError::NotTabular(format!(
                "top-level value is {}",
                type_name(other)
            )))
        }
    };

    let mut rows: Vec<HashMap<String, &Value>> = Vec::with_capacity(objects.len());
    let mut columns: Vec<String> = Vec::new();
    let mut seen = HashSet::new();
    for (index, object) in objects.into_iter().enumerate() {
        let mut cells = Vec::new();
        flatten_object(object, "", 1, &mut cells)?;

        let mut row = HashMap::with_capacity(cells.len());
        for (column, value) in cells {
            if seen.insert(column.clone()) {
                columns.push(column.clone());
            }
            if row.insert(column.clone(), value).is_some() {
                return Err(FlattenError::NotTabular(format!(
                    "column '{column}' appears more than once in row {index}"
                )));
            }
        }
        rows.push(row);
    }
    if columns.is_empty() {
        return Err(FlattenError::Empty);
    }

    let mut text = columns
        .iter()
        .map(|column| quote(column))
        .collect::<Vec<_>>()
        .join(",");
    for row in &rows {
        let line = columns
            .iter()
            .map(|column| row.get(column).map_or_else(String::new, |v| cell(v)))
            .collect::<Vec<_>>()
            .join(",");
        text.push('\n');
        text.push_str(&line);
    }
    Ok(CsvDocument {
        text,
        rows: rows.len(),
    })
}

fn flatten_object<'a>(
    object: &'a Map<String, Value>,
    prefix: &str,
    depth: usize,
    out: &mut Vec<(String, &'a Value)>,
) -> Result<(), FlattenError> {
    for (key, value) in object {
        let column = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Object(nested) if !nested.is_empty() => {
                if depth >= MAX_FLATTEN_DEPTH {
                    return Err(FlattenError::TooDeep(column));
                }
                flatten_object(nested, &column, depth + 1, out)?;
            }
            _ => out.push((column, value)),
        }
    }
    Ok(())
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote(s),
        Value::Array(_) | Value::Object(_) => quote(&value.to_string()),
    }
}

fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
