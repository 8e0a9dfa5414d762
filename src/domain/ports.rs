//! Seams to the operating system's icon services.
//!
//! The export pipeline only talks to these traits. `infrastructure::MacToolkit`
//! implements them with `osascript`, `sips` and `plutil`; tests use in-memory fakes.

use std::path::Path;

use super::error::Result;
use super::models::ExportFormat;

/// Rasterizes an application's icon.
pub trait IconRenderer {
    /// Render the icon of the bundle at `app_path` as a `size`×`size` PNG with
    /// alpha, written to `output_path` (created or overwritten).
    async fn render(&self, app_path: &Path, output_path: &Path, size: u32) -> Result<()>;
}

/// Transcodes a rendered raster into another raster format.
pub trait FormatConverter {
    /// Convert `source` into `format`, written to `target`. The caller removes
    /// `source` afterwards.
    async fn convert(&self, source: &Path, target: &Path, format: ExportFormat) -> Result<()>;
}

/// Reads string values from a bundle's `Info.plist`.
pub trait BundleMetadataReader {
    /// Value of `key`, or an empty string when the tool prints nothing.
    async fn read_key(&self, plist_path: &Path, key: &str) -> Result<String>;
}

/// Places a rendered image on the system clipboard.
pub trait ClipboardSink {
    /// Copy the image file at `path` as pasteable image data.
    async fn copy_file(&self, path: &Path) -> Result<()>;
}
