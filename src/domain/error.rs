//! Domain-level error types for app-icon-exporter.
//!
//! All errors are typed with `thiserror` and carry enough context to be shown
//! to the user as-is (they end up in the terminal summary or as warnings).

use std::path::PathBuf;
use thiserror::Error;

/// Application-level errors.
#[derive(Error, Debug)]
pub enum AppError {
    /// The icon rendering service could not produce a raster.
    #[error("Failed to render {size}px icon for {app}: {message}")]
    Render {
        app: String,
        size: u32,
        message: String,
    },

    /// Transcoding a rendered raster failed.
    #[error("Failed to convert {path} to {target}: {message}")]
    Conversion {
        path: PathBuf,
        target: String,
        message: String,
    },

    /// The application ships no native icon container.
    #[error("No .icns icon file found for {app}. Try exporting as PNG instead.")]
    ContainerNotFound { app: String },

    /// An external tool exited unsuccessfully or could not be spawned.
    #[error("{tool} failed: {message}")]
    Tool { tool: String, message: String },

    /// Every requested format failed.
    #[error("Export failed:\n{}", .warnings.join("\n"))]
    ExportFailed { warnings: Vec<String> },

    /// No installed application matched the query.
    #[error("Application not found: {query}{}", candidates_hint(.candidates))]
    AppNotFound {
        query: String,
        candidates: Vec<String>,
    },

    /// Bad user input (sizes, formats, view modes).
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Configuration or environment error.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// IO operation failed.
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },
}

impl AppError {
    /// Create an IO error with context.
    pub fn io(message: impl Into<String>, err: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(err),
        }
    }

    /// Create an external tool error.
    pub fn tool(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Tool {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Create an invalid input error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

fn candidates_hint(candidates: &[String]) -> String {
    if candidates.is_empty() {
        String::new()
    } else {
        format!(" (did you mean: {}?)", candidates.join(", "))
    }
}

/// Result type alias using `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
