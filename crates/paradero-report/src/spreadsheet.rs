//! Reading the `Tablas.xlsx` sheets used in chapters 4 and 5

use crate::table::TableInput;
use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use paradero_core::error::{ParaderoError, Result};
use serde_json::Value;
use std::io::Cursor;

/// Sheet rendered in chapter 4
pub const STOPS_SHEET: &str = "Paradas";
/// Sheet rendered in chapter 5
pub const SUMMARY_SHEET: &str = "Resumen";

/// An opened workbook, read once and queried per sheet
pub struct Workbook {
    inner: Xlsx<Cursor<Vec<u8>>>,
}

impl Workbook {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let inner: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))
            .map_err(|e| ParaderoError::Document(format!("unreadable workbook: {}", e)))?;
        Ok(Self { inner })
    }

    /// First row as headers, every following non-empty row as values.
    /// Empty cells become `null`.
    pub fn sheet(&mut self, name: &str) -> Result<TableInput> {
        let range = self
            .inner
            .worksheet_range(name)
            .map_err(|e| ParaderoError::Document(format!("sheet '{}': {}", name, e)))?;

        let mut rows = range.rows();
        let headers: Vec<String> = rows
            .next()
            .map(|row| row.iter().map(|cell| cell.to_string().trim().to_string()).collect())
            .unwrap_or_default();

        let rows: Vec<Vec<Value>> = rows
            .filter(|row| row.iter().any(|cell| !matches!(cell, Data::Empty)))
            .map(|row| row.iter().map(cell_value).collect())
            .collect();

        tracing::debug!(sheet = name, columns = headers.len(), rows = rows.len(), "Sheet read");
        Ok(TableInput::HeaderRows { headers, rows })
    }
}

fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Empty | Data::Error(_) => Value::Null,
        Data::String(s) => Value::String(s.clone()),
        other => Value::String(other.to_string()),
    }
}
