#![deny(missing_docs)]

//! Entry point for the fragment explorer dashboard.
use std::sync::Arc;

use eframe::egui;
use fragview::egui_app::ui::EguiApp;
use fragview::{config, dataset, logging};

const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(900.0, 700.0);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let settings = config::load_or_default()?;
    match config::config_path().and_then(|path| config::write_default_if_missing(&path)) {
        Ok(true) => tracing::info!("Wrote default settings file"),
        Ok(false) => {}
        Err(err) => tracing::warn!("Could not write default settings: {err}"),
    }

    let data_path = config::resolve_data_path(&settings, config::data_path_from_env());
    let image_root = config::resolve_image_root(&settings, &data_path);
    let loaded = dataset::load(&data_path, settings.columns.clone(), settings.roster.clone())
        .inspect_err(|err| tracing::error!("Failed to load record table: {err}"))?;
    let loaded = Arc::new(loaded);
    let tooltip_width = settings.tooltip_width;

    let viewport = egui::ViewportBuilder::default()
        .with_min_inner_size(MIN_VIEWPORT_SIZE)
        .with_inner_size([1200.0, 960.0]);
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Fragment Explorer",
        native_options,
        Box::new(move |_cc| {
            match EguiApp::new(loaded.clone(), image_root.clone(), tooltip_width) {
                Ok(app) => Ok(Box::new(app)),
                Err(err) => Ok(Box::new(LaunchError {
                    message: err.to_string(),
                })),
            }
        }),
    )?;
    Ok(())
}

/// Minimal fallback app to display initialization errors.
struct LaunchError {
    message: String,
}

impl eframe::App for LaunchError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Failed to start dashboard");
                ui.label(&self.message);
            });
        });
    }
}
