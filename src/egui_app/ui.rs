//! egui renderer for the dashboard.

mod controls;
mod plot_canvas;
pub(crate) mod plot_interactions;
pub(crate) mod plot_math;
pub mod style;
mod tooltip;

use std::path::PathBuf;
use std::sync::Arc;

use crate::dataset::Dataset;
use crate::egui_app::controller::DashboardController;
use crate::egui_app::image_cache::ImageCache;
use crate::view::{ChartError, HoverSource};
use eframe::egui::{self, Frame, Margin, RichText};

const MIN_PLOT_HEIGHT: f32 = 240.0;

/// Renders the dashboard from the controller's current frame.
pub struct EguiApp {
    controller: DashboardController,
    images: ImageCache,
    visuals_set: bool,
}

impl EguiApp {
    pub fn new(
        dataset: Arc<Dataset>,
        image_root: PathBuf,
        tooltip_width: f32,
    ) -> Result<Self, ChartError> {
        let controller = DashboardController::new(dataset, tooltip_width)?;
        Ok(Self {
            controller,
            images: ImageCache::new(image_root),
            visuals_set: false,
        })
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::top("top_bar")
            .frame(
                Frame::new()
                    .fill(palette.bg_primary)
                    .inner_margin(Margin::symmetric(8, 6)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new("Fragment Explorer")
                            .color(palette.text_primary)
                            .strong(),
                    );
                    ui.separator();
                    let dataset = self.controller.dataset();
                    ui.label(
                        RichText::new(format!(
                            "{} fragments, {} models, {} targets",
                            dataset.row_count(),
                            dataset.roster().models.len(),
                            dataset.roster().targets.len()
                        ))
                        .color(palette.text_muted),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Close").clicked() {
                            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                    });
                });
            });
    }

    fn render_status(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::bottom("status_bar")
            .frame(
                Frame::new()
                    .fill(palette.bg_primary)
                    .inner_margin(Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                let status = &self.controller.ui.status;
                ui.horizontal(|ui| {
                    let (dot, _) =
                        ui.allocate_exact_size(egui::vec2(14.0, 14.0), egui::Sense::hover());
                    ui.painter()
                        .circle_filled(dot.center(), 6.0, status.badge_color);
                    ui.label(RichText::new(&status.badge_label).color(palette.text_primary));
                    ui.separator();
                    ui.label(RichText::new(&status.text).color(palette.text_primary));
                });
            });
    }

    fn render_dashboard(&mut self, ui: &mut egui::Ui) {
        let highlight = self.controller.frame().hover.row();
        let plot_height = ((ui.available_height() - 90.0) / 2.0).max(MIN_PLOT_HEIGHT);

        let pca = self.controller.pca_chart().clone();
        let pca_hover = plot_canvas::render_plot(
            ui,
            &pca,
            &mut self.controller.ui.pca_view,
            highlight,
            plot_height,
        );
        self.controller.set_hover(HoverSource::Pca, pca_hover);

        ui.add_space(6.0);
        let events = controls::render_controls(
            ui,
            self.controller.dataset().roster(),
            &self.controller.inputs().selection,
        );
        for event in events {
            self.controller.apply_selection(event);
        }
        ui.add_space(6.0);

        let comparison = self.controller.frame().comparison.spec.clone();
        let comparison_hover = plot_canvas::render_plot(
            ui,
            &comparison,
            &mut self.controller.ui.comparison_view,
            highlight,
            plot_height,
        );
        self.controller
            .set_hover(HoverSource::Comparison, comparison_hover);
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.render_top_bar(ctx);
        self.render_status(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("dashboard_scroll")
                .show(ui, |ui| self.render_dashboard(ui));
        });
        let width = self.controller.tooltip_width();
        tooltip::render_tooltip(ctx, &self.controller.frame().tooltip, &mut self.images, width);
    }
}
