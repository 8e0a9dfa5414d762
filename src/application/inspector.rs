//! Native icon container lookup.
//!
//! Many modern bundles keep their icon only in an asset catalog, so a missing
//! `.icns` file is an ordinary outcome: every failure here maps to `None`.

use std::path::{Path, PathBuf};

use crate::domain::{BundleMetadataReader, Result};

/// Info.plist key naming the icon file.
const ICON_FILE_KEY: &str = "CFBundleIconFile";

/// Icon name assumed when the bundle does not declare one.
const DEFAULT_ICON_NAME: &str = "AppIcon";

const CONTAINER_EXTENSION: &str = ".icns";

/// Locate the `.icns` file of the bundle at `app_path`, if it has one.
pub async fn find_container_path<R: BundleMetadataReader>(
    reader: &R,
    app_path: &Path,
) -> Option<PathBuf> {
    match locate(reader, app_path).await {
        Ok(Some(path)) => {
            tracing::debug!(path = %path.display(), "Found icon container");
            Some(path)
        }
        Ok(None) => {
            tracing::debug!(app = %app_path.display(), "Bundle has no icon container");
            None
        }
        Err(e) => {
            tracing::debug!(app = %app_path.display(), error = %e, "Icon container lookup failed");
            None
        }
    }
}

async fn locate<R: BundleMetadataReader>(reader: &R, app_path: &Path) -> Result<Option<PathBuf>> {
    let contents = app_path.join("Contents");
    let plist = contents.join("Info.plist");

    let declared = reader.read_key(&plist, ICON_FILE_KEY).await?;
    let name = match declared.trim() {
        "" => DEFAULT_ICON_NAME,
        name => name,
    };

    let file_name = if name.ends_with(CONTAINER_EXTENSION) {
        name.to_string()
    } else {
        format!("{name}{CONTAINER_EXTENSION}")
    };

    let candidate = contents.join("Resources").join(file_name);
    match tokio::fs::metadata(&candidate).await {
        Ok(meta) if meta.is_file() => Ok(Some(candidate)),
        _ => Ok(None),
    }
}
