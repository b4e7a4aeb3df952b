//! Dataset loading and representation

use calamine::{open_workbook_auto, Data, Reader};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

use crate::error::{RecondiffError, Result};

/// An ordered mapping from field name to scalar value. Field sets may differ
/// between datasets; comparison ignores fields it was not asked about.
pub type Record = IndexMap<String, Value>;

/// Supported dataset file types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Csv,
    Xlsx,
}

impl FileType {
    /// Guess the file type from the extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" | "xls" | "xlsb" | "ods" => Some(Self::Xlsx),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
        }
    }
}

/// An ordered sequence of records sharing a nominal header list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub name: String,
    pub original_filename: String,
    pub file_type: FileType,
    pub headers: Vec<String>,
    pub rows: Vec<Record>,
}

impl Dataset {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Content fingerprint over headers and rows, used as the dataset's
    /// stable identity in run records.
    pub fn fingerprint(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for header in &self.headers {
            hasher.update(header.as_bytes());
            hasher.update(b"|");
        }
        hasher.update(b"||");
        for row in &self.rows {
            for (field, value) in row {
                hasher.update(field.as_bytes());
                hasher.update(b"=");
                hasher.update(value.to_string().as_bytes());
                hasher.update(b"|");
            }
            hasher.update(b"||");
        }
        hasher.finalize().to_hex().to_string()
    }
}

/// Load a dataset from a CSV or XLSX file.
pub fn load_dataset(path: &Path, name: &str) -> Result<Dataset> {
    if !path.exists() {
        return Err(RecondiffError::invalid_input(format!(
            "File not found: {}",
            path.display()
        )));
    }

    let file_type = FileType::from_path(path).ok_or_else(|| {
        RecondiffError::invalid_input(format!(
            "Unsupported file type: {}. Please provide a CSV or XLSX file.",
            path.display()
        ))
    })?;

    let (headers, rows) = match file_type {
        FileType::Csv => load_csv(path)?,
        FileType::Xlsx => load_xlsx(path)?,
    };

    log::debug!("Loaded {} rows from {}", rows.len(), path.display());

    Ok(Dataset {
        name: name.to_string(),
        original_filename: path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string()),
        file_type,
        headers,
        rows,
    })
}

fn load_csv(path: &Path) -> Result<(Vec<String>, Vec<Record>)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let csv_record = result?;
        let mut row = Record::new();
        for (i, header) in headers.iter().enumerate() {
            // Short rows fill the remaining fields with empty strings
            let cell = csv_record.get(i).unwrap_or("");
            row.insert(header.clone(), Value::String(cell.to_string()));
        }
        rows.push(row);
    }

    Ok((headers, rows))
}

fn load_xlsx(path: &Path) -> Result<(Vec<String>, Vec<Record>)> {
    let mut workbook = open_workbook_auto(path)?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| {
            RecondiffError::invalid_input(format!(
                "Workbook contains no sheets: {}",
                path.display()
            ))
        })?;

    let range = workbook.worksheet_range(&sheet_name)?;
    let mut row_iter = range.rows();

    let headers: Vec<String> = match row_iter.next() {
        Some(header_row) => header_row
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let name = cell_to_string(cell);
                if name.is_empty() {
                    format!("column_{}", i + 1)
                } else {
                    name
                }
            })
            .collect(),
        None => Vec::new(),
    };

    let mut rows = Vec::new();
    for sheet_row in row_iter {
        let mut record = Record::new();
        for (i, header) in headers.iter().enumerate() {
            let value = sheet_row.get(i).map(cell_to_value).unwrap_or(Value::Null);
            record.insert(header.clone(), value);
        }
        rows.push(record);
    }

    Ok((headers, rows))
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

/// Map a spreadsheet cell to a JSON scalar. Empty cells become null so the
/// normalizer treats them as absent.
fn cell_to_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        Data::String(s) => Value::String(s.clone()),
        Data::Float(f) => serde_json::Number::from_f64(*f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Data::Int(i) => Value::from(*i),
        Data::Bool(b) => Value::Bool(*b),
        // Dates stay as Excel serial numbers; both sides of a reconciliation
        // see the same representation
        Data::DateTime(dt) => serde_json::Number::from_f64(dt.as_f64())
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Value::String(s.clone()),
        Data::Error(e) => Value::String(format!("#{:?}", e)),
    }
}
