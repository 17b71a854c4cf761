use std::sync::Arc;

use crate::dataset::Dataset;
use crate::egui_app::state::{StatusBarState, UiState};
use crate::egui_app::ui::style::StatusTone;
use crate::view::{
    ChartError, ChartSpec, DashboardFrame, DashboardInputs, HoverEvent, HoverSource, ReactiveView,
    SelectionEvent,
};

/// Holds the dashboard inputs and the frame computed from them, and bridges
/// UI events to [`ReactiveView::update`].
pub struct DashboardController {
    pub ui: UiState,
    view: ReactiveView,
    inputs: DashboardInputs,
    frame: DashboardFrame,
    tooltip_width: f32,
}

impl DashboardController {
    pub fn new(dataset: Arc<Dataset>, tooltip_width: f32) -> Result<Self, ChartError> {
        let view = ReactiveView::new(dataset);
        let inputs = view.initial_inputs().ok_or(ChartError::EmptyRoster)?;
        let frame = view.update(&inputs)?;
        let mut controller = Self {
            ui: UiState::default(),
            view,
            inputs,
            frame,
            tooltip_width,
        };
        controller.refresh_status();
        Ok(controller)
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        self.view.dataset()
    }

    pub fn pca_chart(&self) -> &ChartSpec {
        self.view.pca_chart()
    }

    pub fn inputs(&self) -> &DashboardInputs {
        &self.inputs
    }

    pub fn frame(&self) -> &DashboardFrame {
        &self.frame
    }

    pub fn tooltip_width(&self) -> f32 {
        self.tooltip_width
    }

    /// Apply a control change and recompute.
    pub fn apply_selection(&mut self, event: SelectionEvent) {
        let next = DashboardInputs {
            selection: self.inputs.selection.apply(&event),
            hover: self.inputs.hover,
        };
        let selection_changed = next.selection != self.inputs.selection;
        if self.commit(next) && selection_changed {
            self.refresh_status();
        }
    }

    /// Record what one plot currently reports under the pointer.
    pub fn set_hover(&mut self, source: HoverSource, event: Option<HoverEvent>) {
        let next = DashboardInputs {
            selection: self.inputs.selection.clone(),
            hover: self.inputs.hover.with(source, event),
        };
        self.commit(next);
    }

    pub fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.ui.status = StatusBarState::new(text, tone);
    }

    /// Returns true when `next` was accepted.
    fn commit(&mut self, next: DashboardInputs) -> bool {
        if next == self.inputs {
            return false;
        }
        match self.view.update(&next) {
            Ok(frame) => {
                self.inputs = next;
                self.frame = frame;
                true
            }
            Err(err) => {
                tracing::warn!("Dashboard update rejected: {err}");
                self.set_status(err.to_string(), StatusTone::Error);
                false
            }
        }
    }

    fn refresh_status(&mut self) {
        let unavailable = &self.frame.comparison.unavailable;
        if unavailable.is_empty() {
            let rows = self.dataset().row_count();
            let series = self.frame.comparison.spec.series.len();
            let text = format!(
                "{rows} fragments, {series} model series for {}",
                self.inputs.selection.target
            );
            self.set_status(text, StatusTone::Info);
        } else {
            let names: Vec<String> = unavailable
                .iter()
                .map(|missing| format!("{} ({})", missing.model, missing.column))
                .collect();
            let text = format!("No error column for {}", names.join(", "));
            self.set_status(text, StatusTone::Warning);
        }
    }
}
