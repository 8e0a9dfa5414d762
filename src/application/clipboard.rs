//! Copy a rendered icon to the clipboard.

use std::path::Path;

use tempfile::{Builder, TempPath};

use crate::domain::{AppError, Application, ClipboardSink, IconRenderer, Result};

use super::paths::sanitize_folder_name;

/// Render `app`'s icon at `size` and put it on the clipboard.
///
/// # Errors
/// Returns an error if rendering or the clipboard copy fails.
pub async fn copy_to_clipboard<T>(tools: &T, app: &Application, size: u32) -> Result<()>
where
    T: IconRenderer + ClipboardSink,
{
    copy_to_clipboard_in(tools, app, size, &std::env::temp_dir()).await
}

/// [`copy_to_clipboard`] with an explicit directory for the temporary file.
///
/// # Errors
/// Returns an error if rendering or the clipboard copy fails.
pub async fn copy_to_clipboard_in<T>(
    tools: &T,
    app: &Application,
    size: u32,
    temp_dir: &Path,
) -> Result<()>
where
    T: IconRenderer + ClipboardSink,
{
    let temp = temp_icon_path(&app.name, size, temp_dir)?;

    tools
        .render(&app.path, &temp, size)
        .await
        .map_err(|e| AppError::Render {
            app: app.name.clone(),
            size,
            message: e.to_string(),
        })?;

    tools.copy_file(&temp).await?;

    tracing::info!(app = %app.name, size, "Copied icon to clipboard");
    remove_temp(temp);
    Ok(())
}

/// Uniquely named `<name>-<size>-XXXXXX.png`, deleted when dropped.
fn temp_icon_path(app_name: &str, size: u32, temp_dir: &Path) -> Result<TempPath> {
    Builder::new()
        .prefix(&format!("{}-{size}-", sanitize_folder_name(app_name)))
        .suffix(".png")
        .tempfile_in(temp_dir)
        .map(tempfile::NamedTempFile::into_temp_path)
        .map_err(|e| {
            AppError::io(
                format!("Failed to create temporary file in {}", temp_dir.display()),
                e,
            )
        })
}

fn remove_temp(temp: TempPath) {
    let path = temp.to_path_buf();
    if let Err(e) = temp.close() {
        tracing::debug!(path = %path.display(), error = %e, "Temporary icon not removed");
    }
}
