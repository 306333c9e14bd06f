//! Tabular input for report tables and its normalisation to display cells

use paradero_core::models::CharacteristicRow;
use serde_json::{Map, Value};

/// Headers used when the input carries no usable columns
pub const STANDARD_HEADERS: [&str; 3] = ["Característica", "Cumplimiento", "Observación"];

/// Record keys recognised as the standard columns, in display order
const STANDARD_KEYS: [&str; 3] = ["caracteristica", "cumplimiento", "observacion"];

/// Data for one report table
#[derive(Debug, Clone, PartialEq)]
pub enum TableInput {
    /// One JSON object per row
    Records(Vec<Map<String, Value>>),
    /// Explicit header row plus value rows
    HeaderRows {
        headers: Vec<String>,
        rows: Vec<Vec<Value>>,
    },
}

/// Display-ready table: every row has exactly `headers.len()` cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl NormalizedTable {
    fn standard() -> Self {
        Self {
            headers: STANDARD_HEADERS.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }
}

impl TableInput {
    /// Characteristics rows of a stop, under the standard headers
    pub fn characteristics(rows: &[CharacteristicRow]) -> Self {
        TableInput::HeaderRows {
            headers: STANDARD_HEADERS.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| row.cells().into_iter().map(Value::String).collect())
                .collect(),
        }
    }

    pub fn normalize(&self) -> NormalizedTable {
        match self {
            TableInput::Records(records) => normalize_records(records),
            TableInput::HeaderRows { headers, rows } => normalize_header_rows(headers, rows),
        }
    }
}

/// Cell text for a JSON value; `null` is empty
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn normalize_records(records: &[Map<String, Value>]) -> NormalizedTable {
    let lowered: Vec<Vec<(String, &Value)>> = records
        .iter()
        .map(|record| {
            record
                .iter()
                .map(|(key, value)| (key.trim().to_lowercase(), value))
                .collect()
        })
        .collect();

    let mut columns: Vec<String> = Vec::new();
    for record in &lowered {
        for (key, _) in record {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }
    if columns.is_empty() {
        return NormalizedTable::standard();
    }

    let standard: Vec<usize> = STANDARD_KEYS
        .iter()
        .enumerate()
        .filter(|(_, key)| columns.iter().any(|c| c == *key))
        .map(|(i, _)| i)
        .collect();

    let (keys, headers): (Vec<String>, Vec<String>) = if standard.is_empty() {
        (columns.clone(), columns)
    } else {
        standard
            .iter()
            .map(|&i| (STANDARD_KEYS[i].to_string(), STANDARD_HEADERS[i].to_string()))
            .unzip()
    };

    let rows = lowered
        .iter()
        .map(|record| {
            keys.iter()
                .map(|key| {
                    record
                        .iter()
                        .find(|(k, _)| k == key)
                        .map(|(_, v)| cell_text(v))
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect();

    NormalizedTable { headers, rows }
}

fn normalize_header_rows(headers: &[String], rows: &[Vec<Value>]) -> NormalizedTable {
    if headers.is_empty() {
        return NormalizedTable::standard();
    }

    let width = headers.len();
    let rows = rows
        .iter()
        .map(|row| {
            let mut cells: Vec<String> = row.iter().take(width).map(cell_text).collect();
            cells.resize(width, String::new());
            cells
        })
        .collect();

    NormalizedTable {
        headers: headers.to_vec(),
        rows,
    }
}
