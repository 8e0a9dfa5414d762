//! Installed application discovery.
//!
//! Walks the standard application folders for `.app` bundles and reads
//! their display name and bundle id from `Contents/Info.plist`.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use plist::Value as PlistValue;
use walkdir::WalkDir;

use crate::domain::{AppError, Application, Result};

/// Folders searched for application bundles.
const APPLICATION_DIRS: &[&str] = &[
    "/Applications",
    "/System/Applications",
    "/System/Applications/Utilities",
];

/// Per-user application folder, relative to home.
const USER_APPLICATION_DIR: &str = "Applications";

/// Deep enough for `/Applications/Vendor/Tool.app`.
const MAX_SCAN_DEPTH: usize = 2;

const BUNDLE_EXTENSION: &str = "app";

/// All installed applications, sorted by name.
#[must_use]
pub fn scan_applications() -> Vec<Application> {
    let mut roots: Vec<PathBuf> = APPLICATION_DIRS.iter().map(PathBuf::from).collect();
    if let Some(home) = dirs::home_dir() {
        roots.push(home.join(USER_APPLICATION_DIR));
    }
    scan_application_dirs(&roots)
}

/// Applications found below `roots`, deduplicated by path and sorted by name.
#[must_use]
pub fn scan_application_dirs(roots: &[PathBuf]) -> Vec<Application> {
    let mut seen = HashSet::new();
    let mut apps = Vec::new();

    for root in roots {
        if !root.is_dir() {
            tracing::debug!(root = %root.display(), "Skipping missing application folder");
            continue;
        }

        let mut walker = WalkDir::new(root).min_depth(1).max_depth(MAX_SCAN_DEPTH).into_iter();
        while let Some(entry) = walker.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!("Failed to read directory entry: {}", e);
                    continue;
                }
            };

            if !is_bundle(entry.path()) {
                continue;
            }
            // Never descend into a bundle
            walker.skip_current_dir();

            if seen.insert(entry.path().to_path_buf()) {
                apps.push(read_bundle_info(entry.path()));
            }
        }
    }

    apps.sort_by_cached_key(|a| a.name.to_lowercase());
    tracing::debug!(count = apps.len(), "Scanned applications");
    apps
}

/// Build an [`Application`] for a bundle the user pointed at directly.
///
/// # Errors
/// Returns an error if `path` is not an `.app` directory.
pub fn read_application(path: &Path) -> Result<Application> {
    if !is_bundle(path) {
        return Err(AppError::invalid(format!(
            "{} is not an application bundle",
            path.display()
        )));
    }
    Ok(read_bundle_info(path))
}

fn is_bundle(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == BUNDLE_EXTENSION) && path.is_dir()
}

/// Name and bundle id from Info.plist, falling back to the file stem.
fn read_bundle_info(app_path: &Path) -> Application {
    let fallback_name = app_path
        .file_stem()
        .map_or_else(|| "Unknown".to_string(), |s| s.to_string_lossy().into_owned());

    let plist_path = app_path.join("Contents").join("Info.plist");
    let dict = match PlistValue::from_file(&plist_path) {
        Ok(value) => value.into_dictionary(),
        Err(e) => {
            tracing::debug!(path = %plist_path.display(), error = %e, "Unreadable Info.plist");
            None
        }
    };

    let Some(dict) = dict else {
        return Application::new(fallback_name, app_path);
    };

    let string_value = |key: &str| {
        dict.get(key)
            .and_then(PlistValue::as_string)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let name = string_value("CFBundleDisplayName")
        .or_else(|| string_value("CFBundleName"))
        .unwrap_or(fallback_name);

    let app = Application::new(name, app_path);
    match string_value("CFBundleIdentifier") {
        Some(bundle_id) => app.with_bundle_id(bundle_id),
        None => app,
    }
}
