//! macOS implementations of the icon tool seams.
//!
//! - rendering: `osascript` running JXA against `NSWorkspace`
//! - conversion: `sips`
//! - Info.plist values: `plutil`
//! - clipboard: `osascript` running AppleScript
//! - Finder reveal: `open -R`

use std::ffi::OsStr;
use std::path::Path;

use crate::domain::{
    AppError, BundleMetadataReader, ClipboardSink, ExportFormat, FormatConverter, IconRenderer,
    Result,
};

use super::command::{quote_script_string, run_tool};

const OSASCRIPT: &str = "osascript";
const SIPS: &str = "sips";
const PLUTIL: &str = "plutil";
const OPEN: &str = "open";

/// Stateless handle on the macOS command line tools.
#[derive(Debug, Clone, Copy, Default)]
pub struct MacToolkit;

impl MacToolkit {
    /// Create a toolkit.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Select `path` in a new Finder window.
    ///
    /// # Errors
    /// Returns an error if `open` fails.
    pub async fn reveal_in_finder(&self, path: &Path) -> Result<()> {
        run_tool(OPEN, [Path::new("-R"), path]).await.map(|_| ())
    }
}

impl IconRenderer for MacToolkit {
    async fn render(&self, app_path: &Path, output_path: &Path, size: u32) -> Result<()> {
        let script = render_script(app_path, output_path, size);
        tracing::debug!(app = %app_path.display(), size, "Rendering icon");
        run_tool(OSASCRIPT, ["-l", "JavaScript", "-e", script.as_str()]).await?;
        Ok(())
    }
}

impl FormatConverter for MacToolkit {
    async fn convert(&self, source: &Path, target: &Path, format: ExportFormat) -> Result<()> {
        let args = [
            OsStr::new("-s"),
            OsStr::new("format"),
            OsStr::new(sips_format(format)),
            source.as_os_str(),
            OsStr::new("--out"),
            target.as_os_str(),
        ];
        run_tool(SIPS, args).await?;

        if tokio::fs::metadata(target).await.is_err() {
            return Err(AppError::tool(
                SIPS,
                format!("no output written to {}", target.display()),
            ));
        }
        Ok(())
    }
}

impl BundleMetadataReader for MacToolkit {
    async fn read_key(&self, plist_path: &Path, key: &str) -> Result<String> {
        run_tool(
            PLUTIL,
            [
                OsStr::new("-extract"),
                OsStr::new(key),
                OsStr::new("raw"),
                OsStr::new("-o"),
                OsStr::new("-"),
                plist_path.as_os_str(),
            ],
        )
        .await
    }
}

impl ClipboardSink for MacToolkit {
    async fn copy_file(&self, path: &Path) -> Result<()> {
        let script = clipboard_script(path);
        run_tool(OSASCRIPT, ["-e", script.as_str()]).await?;
        Ok(())
    }
}

/// `sips` name of a target format.
const fn sips_format(format: ExportFormat) -> &'static str {
    match format {
        ExportFormat::Png => "png",
        ExportFormat::Jpeg => "jpeg",
        ExportFormat::Icns => "icns",
    }
}

/// JXA that draws the Finder icon of `app_path` into a `size`×`size` RGBA
/// bitmap and writes it as PNG.
fn render_script(app_path: &Path, output_path: &Path, size: u32) -> String {
    let app = quote_script_string(&app_path.to_string_lossy());
    let out = quote_script_string(&output_path.to_string_lossy());

    format!(
        r#"ObjC.import("AppKit");
const appPath = {app};
const outPath = {out};
const size = {size};
if (!$.NSFileManager.defaultManager.fileExistsAtPath(appPath)) {{
  throw new Error("Application not found: " + appPath);
}}
const icon = $.NSWorkspace.sharedWorkspace.iconForFile(appPath);
const rep = $.NSBitmapImageRep.alloc.initWithBitmapDataPlanesPixelsWidePixelsHighBitsPerSampleSamplesPerPixelHasAlphaIsPlanarColorSpaceNameBytesPerRowBitsPerPixel(null, size, size, 8, 4, true, false, $.NSDeviceRGBColorSpace, 0, 0);
rep.size = $.NSMakeSize(size, size);
$.NSGraphicsContext.saveGraphicsState;
$.NSGraphicsContext.currentContext = $.NSGraphicsContext.graphicsContextWithBitmapImageRep(rep);
icon.drawInRectFromRectOperationFraction($.NSMakeRect(0, 0, size, size), $.NSZeroRect, $.NSCompositingOperationCopy, 1);
$.NSGraphicsContext.restoreGraphicsState;
const data = rep.representationUsingTypeProperties($.NSBitmapImageFileTypePNG, $());
if (!data.writeToFileAtomically(outPath, true)) {{
  throw new Error("Could not write " + outPath);
}}
"#
    )
}

/// AppleScript that puts the PNG at `path` on the clipboard.
fn clipboard_script(path: &Path) -> String {
    format!(
        "set the clipboard to (read (POSIX file {}) as «class PNGf»)",
        quote_script_string(&path.to_string_lossy())
    )
}
