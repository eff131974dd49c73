//! Chart settings persisted in the OS config directory.
//!
//! Every field carries `#[serde(default)]` so a partial JSON file is valid:
//! missing keys fall back to the built-in defaults.

use std::path::{Path, PathBuf};

use egui::{FontFamily, FontId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Sizing, direction and permission inputs for the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub header_height: f32,
    pub row_height: f32,
    /// Minimum width of each task list column.
    pub row_width: f32,
    /// `"monospace"` selects the monospace family, anything else the proportional one.
    pub font_family: String,
    pub font_size: f32,
    /// Bar height as a percentage of the row height.
    pub bar_fill: f32,
    pub arrow_indent: f32,
    pub handle_width: f32,
    pub rtl: bool,
    /// Opaque locale tag handed to the task list.
    pub locale: String,
    pub is_date_changeable: bool,
    pub is_progress_changeable: bool,
    pub is_delete: bool,
    pub pixels_per_day: f32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            header_height: 50.0,
            row_height: 50.0,
            row_width: 155.0,
            font_family: "proportional".into(),
            font_size: 14.0,
            bar_fill: 60.0,
            arrow_indent: 20.0,
            handle_width: 8.0,
            rtl: false,
            locale: "en-GB".into(),
            is_date_changeable: true,
            is_progress_changeable: true,
            is_delete: true,
            pixels_per_day: 18.0,
        }
    }
}

impl ChartConfig {
    /// Default settings file location, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "GanttTaskView")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `path` (or the default location), falling back to defaults on any failure.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let path = match path.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(path) => path,
            None => {
                tracing::warn!("no config directory available, using default chart settings");
                return Self::default();
            }
        };
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Self::default();
        }
        match Self::load(&path) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded chart settings");
                config
            }
            Err(err) => {
                tracing::warn!(error = %err, "using default chart settings");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(io_err)
    }

    pub fn font_family(&self) -> FontFamily {
        if self.font_family.eq_ignore_ascii_case("monospace") {
            FontFamily::Monospace
        } else {
            FontFamily::Proportional
        }
    }

    pub fn font(&self) -> FontId {
        FontId::new(self.font_size, self.font_family())
    }

    pub fn task_height(&self) -> f32 {
        self.row_height * self.bar_fill / 100.0
    }
}
