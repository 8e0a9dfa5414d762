//! Domain layer - core types, errors and tool seams.
//!
//! This layer contains pure domain models and error types
//! without any I/O of its own.

pub mod error;
pub mod models;
pub mod ports;
pub mod preferences;

pub use error::{AppError, Result};
pub use models::{
    parse_any_size, parse_export_size, Application, ExportFormat, ExportResult, ExportedIcon,
    ALLOWED_SIZES,
};
pub use ports::{BundleMetadataReader, ClipboardSink, FormatConverter, IconRenderer};
pub use preferences::{AppConfig, ViewMode};
