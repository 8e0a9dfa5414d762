//! Output path resolution and folder-name sanitizing.

use std::path::{Component, Path, PathBuf};

/// Folder used when the user leaves the output path empty.
pub const DEFAULT_OUTPUT_DIR: &str = "~/Downloads";

/// Name used when sanitizing leaves nothing behind.
const FALLBACK_FOLDER_NAME: &str = "Untitled";

/// Characters that are not allowed in file or folder names.
const UNSAFE_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Resolve a user-supplied output folder to an absolute path.
///
/// Empty input falls back to [`DEFAULT_OUTPUT_DIR`], a leading `~` expands to
/// the home directory and relative paths resolve against the working directory.
#[must_use]
pub fn normalize_output_path(input: &str) -> PathBuf {
    let cwd = std::env::current_dir().ok();
    normalize_output_path_in(input, dirs::home_dir().as_deref(), cwd.as_deref())
}

/// [`normalize_output_path`] with explicit home and working directories.
#[must_use]
pub fn normalize_output_path_in(input: &str, home: Option<&Path>, cwd: Option<&Path>) -> PathBuf {
    let trimmed = input.trim();
    let raw = if trimmed.is_empty() {
        DEFAULT_OUTPUT_DIR
    } else {
        trimmed
    };

    let expanded = match (raw, home) {
        ("~", Some(home)) => home.to_path_buf(),
        (_, Some(home)) if raw.starts_with("~/") => home.join(&raw[2..]),
        _ => PathBuf::from(raw),
    };

    let absolute = match cwd {
        Some(cwd) if expanded.is_relative() => cwd.join(expanded),
        _ => expanded,
    };

    lexically_normalize(&absolute)
}

/// Collapse `.` and `..` components without touching the filesystem.
fn lexically_normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Replace filesystem-unsafe characters with `-` and trim.
///
/// Never returns an empty string.
#[must_use]
pub fn sanitize_folder_name(input: &str) -> String {
    let replaced: String = input
        .chars()
        .map(|c| if UNSAFE_CHARS.contains(&c) { '-' } else { c })
        .collect();

    let trimmed = replaced.trim();
    if trimmed.is_empty() {
        FALLBACK_FOLDER_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Export root for one application: `<base>/<name> App Icons`.
#[must_use]
pub fn app_output_dir(app_name: &str, base: &Path) -> PathBuf {
    base.join(sanitize_folder_name(&format!("{app_name} App Icons")))
}
