use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use super::colormap::ColorScale;
use super::selection::{Selection, selected_models};
use crate::dataset::{AxisName, Dataset, ModelName, TargetName};

pub const PCA_TITLE: &str = "Reduced dimensionality visualisation of fragments using PCA";
pub const COMPARISON_TITLE: &str = "Model Performance Comparison";

/// One scatter trace. Index `i` of `x`/`y` is row `i` of the record table.
#[derive(Clone, Debug, PartialEq)]
pub struct ScatterSeries {
    pub label: String,
    pub x: Arc<[f64]>,
    pub y: Arc<[f64]>,
}

impl ScatterSeries {
    pub fn len(&self) -> usize {
        self.x.len().min(self.y.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rows with finite coordinates, in row order.
    pub fn finite_points(&self) -> impl Iterator<Item = (usize, f64, f64)> + '_ {
        self.x
            .iter()
            .zip(self.y.iter())
            .enumerate()
            .filter(|(_, (x, y))| x.is_finite() && y.is_finite())
            .map(|(row, (x, y))| (row, *x, *y))
    }
}

/// Everything needed to draw one chart.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub series: Vec<ScatterSeries>,
    pub color: ColorScale,
}

impl ChartSpec {
    /// Finite data extent across all series as `(min_x, max_x, min_y, max_y)`.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let mut bounds: Option<(f64, f64, f64, f64)> = None;
        for (_, x, y) in self.series.iter().flat_map(ScatterSeries::finite_points) {
            bounds = Some(match bounds {
                None => (x, x, y, y),
                Some((min_x, max_x, min_y, max_y)) => {
                    (min_x.min(x), max_x.max(x), min_y.min(y), max_y.max(y))
                }
            });
        }
        bounds
    }
}

/// A `(model, target)` pair whose error column is not in the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeriesUnavailable {
    pub model: ModelName,
    pub target: TargetName,
    pub column: String,
}

impl fmt::Display for SeriesUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "series unavailable: {} on {} (no column '{}')",
            self.model, self.target, self.column
        )
    }
}

/// The comparison chart plus the series that could not be built.
#[derive(Clone, Debug, PartialEq)]
pub struct ComparisonChart {
    pub spec: ChartSpec,
    pub unavailable: Vec<SeriesUnavailable>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChartError {
    #[error("x-axis column '{0}' is not a numeric column of the record table")]
    UnknownAxis(AxisName),
    #[error("the roster needs at least one x-axis and one target")]
    EmptyRoster,
}

/// The fixed PCA scatter, coloured by cluster.
pub fn build_pca_chart(dataset: &Dataset) -> ChartSpec {
    ChartSpec {
        title: PCA_TITLE.to_string(),
        x_title: "PCA1".to_string(),
        y_title: "PCA2".to_string(),
        series: vec![ScatterSeries {
            label: "PCA".to_string(),
            x: dataset.pca_x().clone(),
            y: dataset.pca_y().clone(),
        }],
        color: cluster_scale(dataset),
    }
}

/// One series per selected model, x from the chosen axis, y from the
/// model's error column for the chosen target.
///
/// Pairs without a column are left out and listed in `unavailable`; the
/// remaining series are unaffected. Points are coloured with `color`, the
/// cluster scale already built for the PCA chart.
pub fn build_comparison_chart(
    dataset: &Dataset,
    selection: &Selection,
    color: &ColorScale,
) -> Result<ComparisonChart, ChartError> {
    let x = dataset
        .axis_values(&selection.x_axis)
        .ok_or_else(|| ChartError::UnknownAxis(selection.x_axis.clone()))?;
    let mut series = Vec::new();
    let mut unavailable = Vec::new();
    for model in selected_models(dataset.roster(), &selection.toggles) {
        match dataset.error_values(model, &selection.target) {
            Some(y) => series.push(ScatterSeries {
                label: dataset.layout().error_column(model, &selection.target),
                x: x.clone(),
                y: y.clone(),
            }),
            None => unavailable.push(SeriesUnavailable {
                model: model.clone(),
                target: selection.target.clone(),
                column: dataset.layout().error_column(model, &selection.target),
            }),
        }
    }
    Ok(ComparisonChart {
        spec: ChartSpec {
            title: COMPARISON_TITLE.to_string(),
            x_title: selection.x_axis.to_string(),
            y_title: format!("MAE_{}", selection.target),
            series,
            color: color.clone(),
        },
        unavailable,
    })
}

fn cluster_scale(dataset: &Dataset) -> ColorScale {
    ColorScale::over(dataset.layout().cluster.clone(), dataset.clusters().clone())
}
