//! Application layer - use cases and orchestration.
//!
//! This layer contains the export pipeline and the logic for choosing and
//! presenting applications. It talks to the OS only through `domain::ports`.

pub mod clipboard;
pub mod exporter;
pub mod formatter;
pub mod inspector;
pub mod paths;
pub mod selector;

pub use clipboard::copy_to_clipboard;
pub use exporter::export_icons;
pub use formatter::{
    format_applications, format_applications_json, format_config, format_export_json,
    format_export_result, OutputFormat,
};
pub use paths::normalize_output_path;
pub use selector::{filter_applications, find_application};
