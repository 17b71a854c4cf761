//! Desktop front end: controller, UI state and the egui renderer.

pub mod controller;
pub mod image_cache;
pub mod state;
pub mod ui;
