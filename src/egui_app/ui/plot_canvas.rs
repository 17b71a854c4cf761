use super::plot_interactions;
use super::plot_math::{DataBounds, PlotTransform, nice_ticks, tick_label};
use super::style;
use crate::egui_app::state::PlotViewState;
use crate::view::{ChartSpec, ColorScale, HoverEvent, viridis};
use eframe::egui::{self, Align2, FontId, Stroke};

const MARGIN_LEFT: f32 = 58.0;
const MARGIN_RIGHT: f32 = 78.0;
const MARGIN_TOP: f32 = 30.0;
const MARGIN_BOTTOM: f32 = 42.0;
const BOUNDS_PADDING: f64 = 0.05;
const POINT_RADIUS: f32 = 4.0;
const POINT_ALPHA: u8 = 220;
const COLORBAR_WIDTH: f32 = 12.0;
const COLORBAR_STEPS: usize = 48;
const TICK_TARGET: usize = 6;

/// Shape used for the n-th series so overlapping models stay distinguishable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Marker {
    Circle,
    Square,
    Diamond,
    Triangle,
    Cross,
}

const MARKERS: [Marker; 5] = [
    Marker::Circle,
    Marker::Square,
    Marker::Diamond,
    Marker::Triangle,
    Marker::Cross,
];

pub(crate) fn marker_for_series(index: usize) -> Marker {
    MARKERS[index % MARKERS.len()]
}

/// Split the allocated rect into `(plot area, colour bar strip)`.
pub(crate) fn plot_layout(outer: egui::Rect) -> (egui::Rect, egui::Rect) {
    let plot = egui::Rect::from_min_max(
        outer.min + egui::vec2(MARGIN_LEFT, MARGIN_TOP),
        outer.max - egui::vec2(MARGIN_RIGHT, MARGIN_BOTTOM),
    );
    let bar_left = plot.max.x + 18.0;
    let bar = egui::Rect::from_min_max(
        egui::pos2(bar_left, plot.min.y),
        egui::pos2(bar_left + COLORBAR_WIDTH, plot.max.y),
    );
    (plot, bar)
}

/// Draw `spec` into a canvas of `height` and report the point under the pointer.
pub(crate) fn render_plot(
    ui: &mut egui::Ui,
    spec: &ChartSpec,
    view: &mut PlotViewState,
    highlight: Option<usize>,
    height: f32,
) -> Option<HoverEvent> {
    let palette = style::palette();
    let size = egui::vec2(ui.available_width(), height);
    let (outer, response) = ui.allocate_exact_size(size, egui::Sense::click_and_drag());
    let (plot_rect, bar_rect) = plot_layout(outer);
    let painter = ui.painter_at(outer);
    painter.rect_filled(outer, 0.0, palette.bg_primary);

    plot_interactions::handle_zoom(view, ui, &response);
    plot_interactions::handle_pan(view, &response);
    plot_interactions::handle_reset(view, &response);

    let bounds = spec
        .bounds()
        .map(|raw| DataBounds::padded(raw, BOUNDS_PADDING))
        .unwrap_or_else(DataBounds::unit);
    let transform = PlotTransform {
        rect: plot_rect,
        bounds,
        zoom: view.zoom,
        pan: view.pan,
    };

    paint_grid(&painter, &transform, &palette);
    paint_titles(&painter, spec, outer, plot_rect, &palette);
    paint_colorbar(&painter, &spec.color, bar_rect, &palette);

    let plot_painter = painter.with_clip_rect(plot_rect);
    if spec.bounds().is_none() {
        plot_painter.text(
            plot_rect.center(),
            Align2::CENTER_CENTER,
            "No data for the current selection",
            FontId::proportional(13.0),
            palette.text_muted,
        );
    }
    for (index, series) in spec.series.iter().enumerate() {
        let marker = marker_for_series(index);
        for (row, x, y) in series.finite_points() {
            let pos = transform.to_screen(x, y);
            if !plot_rect.expand(POINT_RADIUS).contains(pos) {
                continue;
            }
            let fill = style::rgb(spec.color.rgb_for_row(row), POINT_ALPHA);
            paint_marker(&plot_painter, marker, pos, POINT_RADIUS, fill);
        }
        if let Some(row) = highlight
            && let (Some(x), Some(y)) = (series.x.get(row), series.y.get(row))
            && x.is_finite()
            && y.is_finite()
        {
            let pos = transform.to_screen(*x, *y);
            plot_painter.circle_stroke(pos, POINT_RADIUS + 3.0, Stroke::new(2.0, palette.accent_mint));
        }
    }
    paint_legend(&plot_painter, spec, plot_rect, &palette);
    painter.rect_stroke(
        plot_rect,
        0.0,
        Stroke::new(1.0, palette.panel_outline),
        egui::StrokeKind::Inside,
    );

    if response.dragged() {
        return None;
    }
    plot_interactions::find_hover_point(spec, &transform, response.hover_pos())
}

fn paint_grid(painter: &egui::Painter, transform: &PlotTransform, palette: &style::Palette) {
    let (min_x, max_x, min_y, max_y) = transform.visible();
    let rect = transform.rect;
    let label_font = FontId::proportional(11.0);
    for value in nice_ticks(min_x, max_x, TICK_TARGET) {
        let x = transform.to_screen(value, min_y).x;
        painter.line_segment(
            [egui::pos2(x, rect.min.y), egui::pos2(x, rect.max.y)],
            Stroke::new(1.0, palette.grid_soft),
        );
        painter.text(
            egui::pos2(x, rect.max.y + 4.0),
            Align2::CENTER_TOP,
            tick_label(value),
            label_font.clone(),
            palette.text_muted,
        );
    }
    for value in nice_ticks(min_y, max_y, TICK_TARGET) {
        let y = transform.to_screen(min_x, value).y;
        painter.line_segment(
            [egui::pos2(rect.min.x, y), egui::pos2(rect.max.x, y)],
            Stroke::new(1.0, palette.grid_soft),
        );
        painter.text(
            egui::pos2(rect.min.x - 6.0, y),
            Align2::RIGHT_CENTER,
            tick_label(value),
            label_font.clone(),
            palette.text_muted,
        );
    }
}

fn paint_titles(
    painter: &egui::Painter,
    spec: &ChartSpec,
    outer: egui::Rect,
    plot: egui::Rect,
    palette: &style::Palette,
) {
    painter.text(
        egui::pos2(plot.center().x, outer.min.y + 8.0),
        Align2::CENTER_TOP,
        &spec.title,
        FontId::proportional(14.0),
        palette.text_primary,
    );
    painter.text(
        egui::pos2(plot.center().x, outer.max.y - 4.0),
        Align2::CENTER_BOTTOM,
        &spec.x_title,
        FontId::proportional(12.0),
        palette.text_primary,
    );
    let galley = painter.layout_no_wrap(
        spec.y_title.clone(),
        FontId::proportional(12.0),
        palette.text_primary,
    );
    // Rotated text is anchored at its top-left corner before rotation.
    let anchor = egui::pos2(
        outer.min.x + 4.0,
        plot.center().y + galley.size().x / 2.0,
    );
    painter.add(
        egui::epaint::TextShape::new(anchor, galley, palette.text_primary)
            .with_angle(-std::f32::consts::FRAC_PI_2),
    );
}

fn paint_colorbar(
    painter: &egui::Painter,
    scale: &ColorScale,
    rect: egui::Rect,
    palette: &style::Palette,
) {
    let step_height = rect.height() / COLORBAR_STEPS as f32;
    for step in 0..COLORBAR_STEPS {
        let t = (step as f64 + 0.5) / COLORBAR_STEPS as f64;
        let top = rect.max.y - (step + 1) as f32 * step_height;
        let cell = egui::Rect::from_min_size(
            egui::pos2(rect.min.x, top),
            egui::vec2(rect.width(), step_height + 0.5),
        );
        painter.rect_filled(cell, 0.0, style::rgb(viridis(t), 255));
    }
    painter.rect_stroke(
        rect,
        0.0,
        Stroke::new(1.0, palette.panel_outline),
        egui::StrokeKind::Outside,
    );
    let font = FontId::proportional(11.0);
    painter.text(
        egui::pos2(rect.max.x + 4.0, rect.min.y),
        Align2::LEFT_TOP,
        tick_label(scale.max),
        font.clone(),
        palette.text_muted,
    );
    painter.text(
        egui::pos2(rect.max.x + 4.0, rect.max.y),
        Align2::LEFT_BOTTOM,
        tick_label(scale.min),
        font.clone(),
        palette.text_muted,
    );
    painter.text(
        egui::pos2(rect.center().x, rect.min.y - 4.0),
        Align2::CENTER_BOTTOM,
        &scale.title,
        font,
        palette.text_primary,
    );
}

fn paint_legend(
    painter: &egui::Painter,
    spec: &ChartSpec,
    plot: egui::Rect,
    palette: &style::Palette,
) {
    if spec.series.len() < 2 {
        return;
    }
    let font = FontId::proportional(11.0);
    let row_height = 16.0;
    let origin = plot.min + egui::vec2(8.0, 8.0);
    let width = spec
        .series
        .iter()
        .map(|series| {
            painter
                .layout_no_wrap(series.label.clone(), font.clone(), palette.text_primary)
                .size()
                .x
        })
        .fold(0.0_f32, f32::max)
        + 30.0;
    let frame = egui::Rect::from_min_size(
        origin,
        egui::vec2(width, row_height * spec.series.len() as f32 + 6.0),
    );
    painter.rect_filled(frame, 0.0, style::rgb([26, 28, 30], 210));
    for (index, series) in spec.series.iter().enumerate() {
        let y = origin.y + 3.0 + row_height * (index as f32 + 0.5);
        paint_marker(
            painter,
            marker_for_series(index),
            egui::pos2(origin.x + 10.0, y),
            POINT_RADIUS,
            palette.text_primary,
        );
        painter.text(
            egui::pos2(origin.x + 22.0, y),
            Align2::LEFT_CENTER,
            &series.label,
            font.clone(),
            palette.text_primary,
        );
    }
}

fn paint_marker(
    painter: &egui::Painter,
    marker: Marker,
    center: egui::Pos2,
    radius: f32,
    fill: egui::Color32,
) {
    let outline = Stroke::new(0.5, egui::Color32::from_black_alpha(160));
    match marker {
        Marker::Circle => {
            painter.circle(center, radius, fill, outline);
        }
        Marker::Square => {
            let rect = egui::Rect::from_center_size(center, egui::vec2(radius, radius) * 1.7);
            painter.rect(rect, 0.0, fill, outline, egui::StrokeKind::Middle);
        }
        Marker::Diamond => {
            let points = vec![
                center + egui::vec2(0.0, -radius * 1.2),
                center + egui::vec2(radius * 1.2, 0.0),
                center + egui::vec2(0.0, radius * 1.2),
                center + egui::vec2(-radius * 1.2, 0.0),
            ];
            painter.add(egui::Shape::convex_polygon(points, fill, outline));
        }
        Marker::Triangle => {
            let points = vec![
                center + egui::vec2(0.0, -radius * 1.2),
                center + egui::vec2(radius * 1.1, radius * 0.8),
                center + egui::vec2(-radius * 1.1, radius * 0.8),
            ];
            painter.add(egui::Shape::convex_polygon(points, fill, outline));
        }
        Marker::Cross => {
            let stroke = Stroke::new(2.0, fill);
            painter.line_segment(
                [center + egui::vec2(-radius, -radius), center + egui::vec2(radius, radius)],
                stroke,
            );
            painter.line_segment(
                [center + egui::vec2(-radius, radius), center + egui::vec2(radius, -radius)],
                stroke,
            );
        }
    }
}
