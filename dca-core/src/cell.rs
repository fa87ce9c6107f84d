//! Raw tabular rows as handed over by a spreadsheet or CSV reader.
//!
//! Cells are loosely typed the way a spreadsheet exposes them: a number,
//! some text, or nothing. Only the `Date` and `FlowRate` columns are read
//! downstream; everything else rides along untouched.

use csv::ReaderBuilder;
use std::collections::HashMap;

use crate::error::IngestError;

/// Column holding the sample date (text or date serial).
pub const DATE_FIELD: &str = "Date";

/// Column holding the measured flow rate.
pub const FLOW_RATE_FIELD: &str = "FlowRate";

/// A single spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Classify a raw CSV field. Plain decimal literals become numbers,
    /// blank fields become `Empty`, anything else stays text.
    pub fn from_field(field: &str) -> Self {
        let trimmed = field.trim();
        if trimmed.is_empty() {
            return CellValue::Empty;
        }
        let literal = trimmed
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E'));
        match trimmed.parse::<f64>() {
            Ok(n) if literal && n.is_finite() => CellValue::Number(n),
            _ => CellValue::Text(trimmed.to_string()),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

/// One row of the uploaded sheet, keyed by header name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    cells: HashMap<String, CellValue>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for assembling rows in code.
    pub fn with(mut self, column: &str, value: impl Into<CellValue>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: &str, value: impl Into<CellValue>) {
        self.cells.insert(column.to_string(), value.into());
    }

    /// The cell under `column`, or `None` when the row has no such column.
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Parse CSV text (header row required) into raw rows.
///
/// Ragged rows are accepted; a row shorter than the header simply lacks
/// the trailing columns.
pub fn read_csv_rows(csv_data: &str) -> Result<Vec<RawRow>, IngestError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes());

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let mut row = RawRow::new();
        for (header, field) in headers.iter().zip(record.iter()) {
            row.insert(header, CellValue::from_field(field));
        }
        rows.push(row);
    }
    log::debug!("read {} rows with columns {:?}", rows.len(), headers);
    Ok(rows)
}
