//! Domain models for application icons and export results.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Icon edge lengths offered for on-disk export.
pub const ALLOWED_SIZES: [u32; 8] = [16, 32, 48, 64, 128, 256, 512, 1024];

/// An installed application bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    /// Display name.
    pub name: String,
    /// Location of the `.app` bundle.
    pub path: PathBuf,
    /// `CFBundleIdentifier`, when the bundle declares one.
    #[serde(default)]
    pub bundle_id: Option<String>,
}

impl Application {
    /// Create an application record.
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            bundle_id: None,
        }
    }

    /// Attach a bundle identifier.
    #[must_use]
    pub fn with_bundle_id(mut self, bundle_id: impl Into<String>) -> Self {
        self.bundle_id = Some(bundle_id.into());
        self
    }
}

/// Output format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Lossless raster (PNG).
    Png,
    /// Lossy raster (JPEG), transcoded from a rendered PNG.
    Jpeg,
    /// The bundle's native icon container (ICNS), copied verbatim.
    Icns,
}

impl ExportFormat {
    /// Uppercase tag, also used as the output subdirectory name.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Png => "PNG",
            Self::Jpeg => "JPEG",
            Self::Icns => "ICNS",
        }
    }

    /// File extension of exported files.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Icns => "icns",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            "icns" => Ok(Self::Icns),
            _ => Err(format!("Unknown format: {s}. Use: png, jpeg, icns")),
        }
    }
}

/// Parse a pixel size restricted to [`ALLOWED_SIZES`].
///
/// # Errors
/// Returns a message if the value is not a number or not an offered size.
pub fn parse_export_size(s: &str) -> Result<u32, String> {
    let size: u32 = s
        .trim()
        .parse()
        .map_err(|_| format!("Invalid size: {s}"))?;

    if ALLOWED_SIZES.contains(&size) {
        Ok(size)
    } else {
        Err(format!("Unsupported size: {size}. Use one of: {ALLOWED_SIZES:?}"))
    }
}

/// Parse any positive pixel size (clipboard copies are not restricted).
///
/// # Errors
/// Returns a message if the value is not a positive integer.
pub fn parse_any_size(s: &str) -> Result<u32, String> {
    match s.trim().parse::<u32>() {
        Ok(0) | Err(_) => Err(format!("Invalid size: {s}. Expected a positive integer")),
        Ok(size) => Ok(size),
    }
}

/// One file produced by an export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedIcon {
    /// Pixel size, or `0` for container copies that have no single size.
    pub size: u32,
    /// Where the file was written.
    pub file_path: PathBuf,
}

impl ExportedIcon {
    /// Whether this entry is a container copy rather than a rendered size.
    #[must_use]
    pub const fn is_container(&self) -> bool {
        self.size == 0
    }
}

/// Aggregate result of a multi-format export for one application.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResult {
    /// Per-application export root.
    pub output_dir: PathBuf,
    /// Every file written, across all formats.
    pub results: Vec<ExportedIcon>,
    /// One entry per failed format, prefixed with the format tag.
    pub warnings: Vec<String>,
}
