//! UI-only state: view transforms and the status bar.

use crate::egui_app::ui::style::{self, StatusTone};
use egui::{Color32, Pos2, Vec2};

#[derive(Clone, Debug)]
pub struct UiState {
    pub status: StatusBarState,
    pub pca_view: PlotViewState,
    pub comparison_view: PlotViewState,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            status: StatusBarState::idle(),
            pca_view: PlotViewState::default(),
            comparison_view: PlotViewState::default(),
        }
    }
}

/// Zoom and pan of one plot canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotViewState {
    pub zoom: f32,
    pub pan: Vec2,
    pub last_drag_pos: Option<Pos2>,
}

impl Default for PlotViewState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: Vec2::ZERO,
            last_drag_pos: None,
        }
    }
}

impl PlotViewState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Status badge and text shown in the footer.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    pub text: String,
    pub badge_label: String,
    pub badge_color: Color32,
}

impl StatusBarState {
    pub fn idle() -> Self {
        Self::new("Hover a point to see its fragment", StatusTone::Idle)
    }

    pub fn new(text: impl Into<String>, tone: StatusTone) -> Self {
        let (label, color) = style::status_badge(tone);
        Self {
            text: text.into(),
            badge_label: label.to_string(),
            badge_color: color,
        }
    }
}
