//! Reactive dashboard logic, independent of the UI toolkit.
//!
//! [`ReactiveView::update`] turns the current control and hover inputs into
//! the comparison chart and tooltip. It holds no state of its own beyond the
//! shared dataset and the PCA chart, which never changes.

mod chart;
mod colormap;
mod hover;
mod selection;

use std::sync::Arc;

pub use chart::{
    COMPARISON_TITLE, ChartError, ChartSpec, ComparisonChart, PCA_TITLE, ScatterSeries,
    SeriesUnavailable, build_comparison_chart, build_pca_chart,
};
pub use colormap::{ColorScale, MISSING_RGB, viridis};
pub use hover::{
    BoundingBox, HoverEvent, HoverInputs, HoverSource, HoverState, TooltipContent, TooltipSpec,
};
pub use selection::{ModelToggles, Selection, SelectionEvent, selected_models};

use crate::dataset::Dataset;

/// Everything the update depends on.
#[derive(Clone, Debug, PartialEq)]
pub struct DashboardInputs {
    pub selection: Selection,
    pub hover: HoverInputs,
}

/// Output of one update.
#[derive(Clone, Debug, PartialEq)]
pub struct DashboardFrame {
    pub comparison: ComparisonChart,
    pub hover: HoverState,
    pub tooltip: TooltipSpec,
}

pub struct ReactiveView {
    dataset: Arc<Dataset>,
    pca: ChartSpec,
}

impl ReactiveView {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        let pca = build_pca_chart(&dataset);
        Self { dataset, pca }
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn pca_chart(&self) -> &ChartSpec {
        &self.pca
    }

    /// Inputs for a fresh dashboard, or `None` when the roster has no axes or targets.
    pub fn initial_inputs(&self) -> Option<DashboardInputs> {
        Some(DashboardInputs {
            selection: Selection::initial(self.dataset.roster())?,
            hover: HoverInputs::default(),
        })
    }

    /// Recompute the comparison chart and tooltip for `inputs`.
    pub fn update(&self, inputs: &DashboardInputs) -> Result<DashboardFrame, ChartError> {
        let comparison =
            build_comparison_chart(&self.dataset, &inputs.selection, &self.pca.color)?;
        for missing in &comparison.unavailable {
            tracing::debug!("{missing}");
        }
        let hover = HoverState::resolve(&inputs.hover, self.dataset.row_count());
        let tooltip = TooltipSpec::for_state(&hover, |row| self.dataset.image_ref(row));
        Ok(DashboardFrame {
            comparison,
            hover,
            tooltip,
        })
    }
}
