use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

/// One parsed cell before column types are decided.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Cell {
    Null,
    /// Parsed value plus the text it was read from.
    Number(f64, String),
    Text(String),
}

impl Cell {
    /// Interpret a raw CSV field. Empty and `NaN`-like fields are nulls.
    pub(crate) fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Cell::Null;
        }
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_nan() => Cell::Null,
            Ok(value) => Cell::Number(value, trimmed.to_string()),
            Err(_) => Cell::Text(raw.to_string()),
        }
    }

    fn into_text(self) -> String {
        match self {
            Cell::Null => String::new(),
            Cell::Number(_, raw) => raw,
            Cell::Text(text) => text,
        }
    }
}

/// Column storage. Numeric columns keep missing cells as `NaN`.
#[derive(Clone, Debug, PartialEq)]
pub enum ColumnData {
    Numeric(Arc<[f64]>),
    Text(Arc<[String]>),
}

impl ColumnData {
    /// Numeric iff no cell is text; otherwise every cell is kept as text.
    pub(crate) fn from_cells(cells: Vec<Cell>) -> Self {
        if cells.iter().any(|cell| matches!(cell, Cell::Text(_))) {
            return ColumnData::Text(cells.into_iter().map(Cell::into_text).collect());
        }
        ColumnData::Numeric(
            cells
                .into_iter()
                .map(|cell| match cell {
                    Cell::Number(value, _) => value,
                    _ => f64::NAN,
                })
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        match self {
            ColumnData::Numeric(values) => values.len(),
            ColumnData::Text(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ColumnData::Numeric(_) => "numeric",
            ColumnData::Text(_) => "text",
        }
    }
}

/// Immutable, column-oriented record table. Row order is the file order.
#[derive(Clone, Debug)]
pub struct RecordTable {
    names: Vec<String>,
    columns: Vec<ColumnData>,
    index: HashMap<String, usize>,
    row_count: usize,
}

impl RecordTable {
    /// Assemble a table from named columns of equal length.
    ///
    /// Returns the offending name on a duplicate column and the name plus its
    /// length on a length mismatch.
    pub fn from_columns(
        columns: Vec<(String, ColumnData)>,
    ) -> Result<Self, TableShapeError> {
        let row_count = columns.first().map(|(_, data)| data.len()).unwrap_or(0);
        let mut names = Vec::with_capacity(columns.len());
        let mut data = Vec::with_capacity(columns.len());
        let mut index = HashMap::with_capacity(columns.len());
        for (name, column) in columns {
            if column.len() != row_count {
                return Err(TableShapeError::Ragged {
                    column: name,
                    expected: row_count,
                    found: column.len(),
                });
            }
            if index.insert(name.clone(), names.len()).is_some() {
                return Err(TableShapeError::DuplicateColumn(name));
            }
            names.push(name);
            data.push(column);
        }
        Ok(Self {
            names,
            columns: data,
            index,
            row_count,
        })
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn column(&self, name: &str) -> Option<&ColumnData> {
        self.index.get(name).map(|idx| &self.columns[*idx])
    }

    pub fn numeric(&self, name: &str) -> Option<&Arc<[f64]>> {
        match self.column(name)? {
            ColumnData::Numeric(values) => Some(values),
            ColumnData::Text(_) => None,
        }
    }

    pub fn text(&self, name: &str) -> Option<&Arc<[String]>> {
        match self.column(name)? {
            ColumnData::Text(values) => Some(values),
            ColumnData::Numeric(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableShapeError {
    #[error("column '{0}' appears more than once")]
    DuplicateColumn(String),
    #[error("column '{column}' has {found} values, expected {expected}")]
    Ragged {
        column: String,
        expected: usize,
        found: usize,
    },
}
