//! Record table loading and schema validation.
//!
//! The table is read once at startup and never changes afterwards. Point
//! indices reported by the plots index straight into it, so rows are kept in
//! file order and nothing here filters or sorts them.

mod loader;
mod names;
mod schema;
mod table;

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

pub use loader::{LoadError, read_table};
pub use names::{AxisName, ModelName, TargetName};
pub use schema::{ColumnLayout, Roster};
pub use table::{ColumnData, RecordTable, TableShapeError};

/// Error columns resolved once per `(model, target)` pair.
#[derive(Clone, Debug, Default)]
pub struct ErrorColumnMap {
    present: HashMap<(ModelName, TargetName), String>,
    missing: Vec<(ModelName, TargetName, String)>,
}

impl ErrorColumnMap {
    fn resolve(table: &RecordTable, roster: &Roster, layout: &ColumnLayout) -> Self {
        let mut map = Self::default();
        for model in &roster.models {
            for target in &roster.targets {
                let column = layout.error_column(model, target);
                let key = (model.clone(), target.clone());
                if table.numeric(&column).is_some() {
                    map.present.insert(key, column);
                } else {
                    map.missing.push((model.clone(), target.clone(), column));
                }
            }
        }
        map
    }

    pub fn column(&self, model: &ModelName, target: &TargetName) -> Option<&str> {
        self.present
            .get(&(model.clone(), target.clone()))
            .map(String::as_str)
    }

    /// Combinations from the roster with no usable column in the table.
    pub fn missing(&self) -> &[(ModelName, TargetName, String)] {
        &self.missing
    }
}

/// A record table checked against the column layout and roster.
#[derive(Clone, Debug)]
pub struct Dataset {
    table: RecordTable,
    layout: ColumnLayout,
    roster: Roster,
    error_columns: ErrorColumnMap,
    pca_x: Arc<[f64]>,
    pca_y: Arc<[f64]>,
    clusters: Arc<[f64]>,
    images: Arc<[String]>,
}

impl Dataset {
    /// Validate `table` and resolve its error columns.
    ///
    /// Fixed columns and x-axis columns are a hard contract. Error columns
    /// are not: absent combinations are recorded and reported per chart.
    pub fn new(table: RecordTable, layout: ColumnLayout, roster: Roster) -> Result<Self, LoadError> {
        let pca_x = require_numeric(&table, &layout.pca_x, "PCA x")?;
        let pca_y = require_numeric(&table, &layout.pca_y, "PCA y")?;
        let clusters = require_numeric(&table, &layout.cluster, "cluster id")?;
        let images = require_text(&table, &layout.image, "image reference")?;
        for axis in &roster.x_axes {
            require_numeric(&table, axis.as_str(), "x-axis")?;
        }
        let error_columns = ErrorColumnMap::resolve(&table, &roster, &layout);
        for (model, target, column) in error_columns.missing() {
            tracing::warn!(%model, %target, %column, "Error column unavailable");
        }
        Ok(Self {
            table,
            layout,
            roster,
            error_columns,
            pca_x,
            pca_y,
            clusters,
            images,
        })
    }

    pub fn table(&self) -> &RecordTable {
        &self.table
    }

    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn error_columns(&self) -> &ErrorColumnMap {
        &self.error_columns
    }

    pub fn row_count(&self) -> usize {
        self.table.row_count()
    }

    pub fn pca_x(&self) -> &Arc<[f64]> {
        &self.pca_x
    }

    pub fn pca_y(&self) -> &Arc<[f64]> {
        &self.pca_y
    }

    pub fn clusters(&self) -> &Arc<[f64]> {
        &self.clusters
    }

    pub fn axis_values(&self, axis: &AxisName) -> Option<&Arc<[f64]>> {
        self.table.numeric(axis.as_str())
    }

    pub fn error_values(&self, model: &ModelName, target: &TargetName) -> Option<&Arc<[f64]>> {
        let column = self.error_columns.column(model, target)?;
        self.table.numeric(column)
    }

    /// Image reference stored for `row`; `None` past the end or for blank cells.
    pub fn image_ref(&self, row: usize) -> Option<&str> {
        self.images
            .get(row)
            .map(String::as_str)
            .filter(|reference| !reference.trim().is_empty())
    }
}

/// Read and validate the record table at `path`.
pub fn load(path: &Path, layout: ColumnLayout, roster: Roster) -> Result<Dataset, LoadError> {
    tracing::info!("Loading record table from {}", path.display());
    let table = read_table(path)?;
    let dataset = Dataset::new(table, layout, roster)?;
    tracing::info!(
        rows = dataset.row_count(),
        columns = dataset.table().column_count(),
        "Loaded record table"
    );
    Ok(dataset)
}

fn require_numeric(
    table: &RecordTable,
    column: &str,
    role: &'static str,
) -> Result<Arc<[f64]>, LoadError> {
    match require_column(table, column, role)? {
        ColumnData::Numeric(values) => Ok(values.clone()),
        other => Err(wrong_kind(column, role, "numeric", other)),
    }
}

fn require_text(
    table: &RecordTable,
    column: &str,
    role: &'static str,
) -> Result<Arc<[String]>, LoadError> {
    match require_column(table, column, role)? {
        ColumnData::Text(values) => Ok(values.clone()),
        // A column with every cell blank has no text to type it by.
        ColumnData::Numeric(values) if values.iter().all(|value| value.is_nan()) => {
            Ok(values.iter().map(|_| String::new()).collect())
        }
        other => Err(wrong_kind(column, role, "text", other)),
    }
}

fn require_column<'a>(
    table: &'a RecordTable,
    column: &str,
    role: &'static str,
) -> Result<&'a ColumnData, LoadError> {
    table.column(column).ok_or_else(|| LoadError::MissingColumn {
        column: column.to_string(),
        role,
    })
}

fn wrong_kind(column: &str, role: &'static str, expected: &'static str, found: &ColumnData) -> LoadError {
    LoadError::WrongKind {
        column: column.to_string(),
        role,
        expected,
        found: found.kind(),
    }
}
