use super::plot_math::PlotTransform;
use crate::egui_app::state::PlotViewState;
use crate::view::{BoundingBox, ChartSpec, HoverEvent};
use eframe::egui;

pub(crate) const PLOT_ZOOM_MIN: f32 = 0.5;
pub(crate) const PLOT_ZOOM_MAX: f32 = 40.0;
const PLOT_ZOOM_SPEED: f32 = 0.0015;
/// Squared pick radius in points.
const HOVER_RADIUS_SQ: f32 = 36.0;
const HOVER_BOX_HALF: f32 = 5.0;

/// Nearest drawn point within the pick radius of `pointer`.
pub(crate) fn find_hover_point(
    spec: &ChartSpec,
    transform: &PlotTransform,
    pointer: Option<egui::Pos2>,
) -> Option<HoverEvent> {
    let pointer = pointer?;
    if !transform.rect.contains(pointer) {
        return None;
    }
    let mut best: Option<(usize, egui::Pos2, f32)> = None;
    for series in &spec.series {
        for (row, x, y) in series.finite_points() {
            let pos = transform.to_screen(x, y);
            let dist_sq = pos.distance_sq(pointer);
            if dist_sq > HOVER_RADIUS_SQ {
                continue;
            }
            match best {
                Some((_, _, best_sq)) if dist_sq >= best_sq => {}
                _ => best = Some((row, pos, dist_sq)),
            }
        }
    }
    best.map(|(row, pos, _)| HoverEvent {
        point_index: row,
        bbox: BoundingBox::around(pos.x, pos.y, HOVER_BOX_HALF),
    })
}

pub(crate) fn handle_zoom(view: &mut PlotViewState, ui: &egui::Ui, response: &egui::Response) {
    let scroll_delta = ui.input(|i| i.smooth_scroll_delta.y);
    if response.hovered() && scroll_delta.abs() > 0.0 {
        let zoom_delta = 1.0 + scroll_delta * PLOT_ZOOM_SPEED;
        view.zoom = (view.zoom * zoom_delta).clamp(PLOT_ZOOM_MIN, PLOT_ZOOM_MAX);
    }
}

pub(crate) fn handle_pan(view: &mut PlotViewState, response: &egui::Response) {
    let pointer = response.interact_pointer_pos();
    if response.dragged()
        && let Some(pos) = pointer
    {
        let last = view.last_drag_pos.unwrap_or(pos);
        view.pan += pos - last;
        view.last_drag_pos = Some(pos);
    } else {
        view.last_drag_pos = None;
    }
}

/// Double-click restores the unzoomed, unpanned view.
pub(crate) fn handle_reset(view: &mut PlotViewState, response: &egui::Response) {
    if response.double_clicked() {
        view.reset();
    }
}
