use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dataset::{ColumnLayout, Roster};

pub const MIN_TOOLTIP_WIDTH: f32 = 80.0;
pub const MAX_TOOLTIP_WIDTH: f32 = 600.0;

/// Settings read from `config.toml`.
///
/// Config keys (TOML): `data_path`, `image_root`, `tooltip_width`,
/// `[columns]`, `[roster]`. Every key is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Record table to load; `FRAGVIEW_DATA` takes precedence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_path: Option<PathBuf>,
    /// Base folder for relative image references. Defaults to the folder
    /// holding the record table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_root: Option<PathBuf>,
    #[serde(default = "default_tooltip_width")]
    pub tooltip_width: f32,
    #[serde(default)]
    pub columns: ColumnLayout,
    #[serde(default)]
    pub roster: Roster,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            image_root: None,
            tooltip_width: default_tooltip_width(),
            columns: ColumnLayout::default(),
            roster: Roster::default(),
        }
    }
}

impl AppConfig {
    pub(super) fn normalized(mut self) -> Self {
        self.tooltip_width = clamp_tooltip_width(self.tooltip_width);
        self
    }

    /// Reason the settings cannot drive the dashboard, if any.
    pub(super) fn problem(&self) -> Option<String> {
        if self.roster.models.is_empty() {
            return Some("roster.models must not be empty".into());
        }
        if self.roster.targets.is_empty() {
            return Some("roster.targets must not be empty".into());
        }
        if self.roster.x_axes.is_empty() {
            return Some("roster.x_axes must not be empty".into());
        }
        if !self.columns.template_is_valid() {
            return Some(format!(
                "columns.error_template '{}' needs both {{model}} and {{target}}",
                self.columns.error_template
            ));
        }
        None
    }
}

fn default_tooltip_width() -> f32 {
    200.0
}

fn clamp_tooltip_width(width: f32) -> f32 {
    if width.is_finite() {
        width.clamp(MIN_TOOLTIP_WIDTH, MAX_TOOLTIP_WIDTH)
    } else {
        default_tooltip_width()
    }
}

/// Errors that can occur while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config directory unavailable: {0}")]
    Directory(#[from] crate::app_dirs::AppDirError),
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to serialize config for {path}: {source}")]
    SerializeToml {
        path: PathBuf,
        source: toml::ser::Error,
    },
    #[error("Invalid config at {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },
}
