use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

use super::table::{Cell, ColumnData, RecordTable, TableShapeError};

/// Errors that stop the record table from loading.
///
/// Every variant is fatal at startup; there is no partial load.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Unsupported table format for {path} (expected .csv or .json)")]
    UnsupportedFormat { path: PathBuf },
    #[error("Failed to parse CSV {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },
    #[error("Failed to parse JSON records {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("{path} contains no rows")]
    Empty { path: PathBuf },
    #[error("{path} declares column '{column}' more than once")]
    DuplicateColumn { path: PathBuf, column: String },
    #[error("{path}: column '{column}' has {found} rows, expected {expected}")]
    Ragged {
        path: PathBuf,
        column: String,
        expected: usize,
        found: usize,
    },
    /// A column the dashboard depends on is absent.
    #[error("Required {role} column '{column}' is missing")]
    MissingColumn { column: String, role: &'static str },
    /// A column exists but holds the wrong kind of values.
    #[error("Required {role} column '{column}' must be {expected}, found {found}")]
    WrongKind {
        column: String,
        role: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}

enum TableFormat {
    Csv,
    Json,
}

fn format_for(path: &Path) -> Option<TableFormat> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "csv" => Some(TableFormat::Csv),
        "json" => Some(TableFormat::Json),
        _ => None,
    }
}

/// Read a record table from disk, choosing the parser by file extension.
pub fn read_table(path: &Path) -> Result<RecordTable, LoadError> {
    let format = format_for(path).ok_or_else(|| LoadError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    let columns = match format {
        TableFormat::Csv => csv_columns(reader, path)?,
        TableFormat::Json => json_columns(reader, path)?,
    };
    let table = RecordTable::from_columns(columns).map_err(|err| match err {
        TableShapeError::DuplicateColumn(column) => LoadError::DuplicateColumn {
            path: path.to_path_buf(),
            column,
        },
        TableShapeError::Ragged {
            column,
            expected,
            found,
        } => LoadError::Ragged {
            path: path.to_path_buf(),
            column,
            expected,
            found,
        },
    })?;
    if table.row_count() == 0 {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(table)
}

fn csv_columns(reader: impl Read, path: &Path) -> Result<Vec<(String, ColumnData)>, LoadError> {
    let csv_error = |source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);
    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(|name| name.trim().to_string())
        .collect();
    let mut cells: Vec<Vec<Cell>> = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        for (column, field) in cells.iter_mut().zip(record.iter()) {
            column.push(Cell::parse(field));
        }
    }
    Ok(headers
        .into_iter()
        .zip(cells)
        .map(|(name, column)| (name, ColumnData::from_cells(column)))
        .collect())
}

fn json_columns(reader: impl Read, path: &Path) -> Result<Vec<(String, ColumnData)>, LoadError> {
    let records: Vec<Map<String, Value>> =
        serde_json::from_reader(reader).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    let mut names: Vec<String> = Vec::new();
    for record in &records {
        for key in record.keys() {
            if !names.contains(key) {
                names.push(key.clone());
            }
        }
    }
    Ok(names
        .into_iter()
        .map(|name| {
            let cells = records
                .iter()
                .map(|record| record.get(&name).map(json_cell).unwrap_or(Cell::Null))
                .collect();
            (name, ColumnData::from_cells(cells))
        })
        .collect())
}

fn json_cell(value: &Value) -> Cell {
    match value {
        Value::Null => Cell::Null,
        Value::Bool(flag) => Cell::Number(if *flag { 1.0 } else { 0.0 }, flag.to_string()),
        Value::Number(number) => number
            .as_f64()
            .map(|value| Cell::Number(value, number.to_string()))
            .unwrap_or(Cell::Null),
        Value::String(text) if text.is_empty() => Cell::Null,
        Value::String(text) => Cell::Text(text.clone()),
        other => Cell::Text(other.to_string()),
    }
}
