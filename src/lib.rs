//! Library exports for reuse in benchmarks and tests.
/// Application folder resolution.
pub mod app_dirs;
/// TOML settings.
pub mod config;
/// Record table loading and validation.
pub mod dataset;
/// Shared egui UI modules.
pub mod egui_app;
/// Blocking HTTP helpers for remote images.
pub mod http_client;
/// Tracing subscriber setup.
pub mod logging;
/// Reactive chart and tooltip logic.
pub mod view;
