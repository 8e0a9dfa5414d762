//! User preferences: export defaults and the remembered view mode.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::models::{ExportFormat, ALLOWED_SIZES};

/// How the application list is presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// One application per row with details.
    #[default]
    List,
    /// Compact multi-column grid of names.
    Grid,
}

impl ViewMode {
    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::List => Self::Grid,
            Self::Grid => Self::List,
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::List => write!(f, "list"),
            Self::Grid => write!(f, "grid"),
        }
    }
}

impl std::str::FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "list" => Ok(Self::List),
            "grid" => Ok(Self::Grid),
            _ => Err(format!("Unknown view mode: {s}. Use: list, grid")),
        }
    }
}

/// Defaults applied when the CLI does not override them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Base output folder; `~` is expanded.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Sizes exported when none are given.
    #[serde(default = "default_sizes")]
    pub sizes: Vec<u32>,

    /// Formats exported when none are given.
    #[serde(default = "default_formats")]
    pub formats: Vec<ExportFormat>,

    /// Size used by `copy` when none is given.
    #[serde(default = "default_clipboard_size")]
    pub clipboard_size: u32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            sizes: default_sizes(),
            formats: default_formats(),
            clipboard_size: default_clipboard_size(),
        }
    }
}

fn default_output_dir() -> String {
    "~/Downloads".to_string()
}

fn default_sizes() -> Vec<u32> {
    ALLOWED_SIZES.to_vec()
}

fn default_formats() -> Vec<ExportFormat> {
    vec![ExportFormat::Png]
}

const fn default_clipboard_size() -> u32 {
    512
}

/// Presentation preferences.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    /// Last used view mode.
    #[serde(default)]
    pub view_mode: ViewMode,
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Export defaults.
    #[serde(default)]
    pub export: ExportConfig,

    /// Presentation preferences.
    #[serde(default)]
    pub ui: UiConfig,
}

impl AppConfig {
    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".app-icon-exporter")
    }

    /// Get the default config file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        Self::default_data_dir().join("config.toml")
    }
}
