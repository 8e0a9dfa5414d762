//! Output formatting for applications and export results.
//!
//! Supports a human-readable text mode (list or grid) and JSON.

use colored::Colorize;
use comfy_table::{presets::NOTHING, presets::UTF8_FULL, Table};

use crate::domain::{AppConfig, Application, ExportResult, ViewMode};

/// Number of columns in grid view.
const GRID_COLUMNS: usize = 4;

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON format for programmatic use.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown output format: {s}. Use: text, json")),
        }
    }
}

/// Formats applications in the given view mode.
pub fn format_applications(apps: &[&Application], view: ViewMode) -> String {
    match view {
        ViewMode::List => format_applications_list(apps),
        ViewMode::Grid => format_applications_grid(apps),
    }
}

/// One row per application with bundle id and path.
pub fn format_applications_list(apps: &[&Application]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["#", "Name", "Bundle ID", "Path"]);

    for (i, app) in apps.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            truncate(&app.name, 32),
            app.bundle_id.clone().unwrap_or_else(|| "-".to_string()),
            app.path.display().to_string(),
        ]);
    }

    table.to_string()
}

/// Compact grid of application names.
pub fn format_applications_grid(apps: &[&Application]) -> String {
    let mut table = Table::new();
    table.load_preset(NOTHING);

    for chunk in apps.chunks(GRID_COLUMNS) {
        table.add_row(chunk.iter().map(|app| truncate(&app.name, 24)).collect::<Vec<_>>());
    }

    table.to_string()
}

/// Formats applications as JSON.
///
/// # Errors
/// Returns error if serialization fails.
pub fn format_applications_json(apps: &[&Application]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(apps)
}

/// Summary printed after an export.
pub fn format_export_result(app: &Application, result: &ExportResult) -> String {
    let mut out = format!(
        "{} Exported {} icon file(s) for {} to {}\n",
        "✓".green().bold(),
        result.results.len(),
        app.name.cyan(),
        result.output_dir.display()
    );

    for icon in &result.results {
        let label = if icon.is_container() {
            "icns".to_string()
        } else {
            format!("{0}x{0}", icon.size)
        };
        let file = icon
            .file_path
            .strip_prefix(&result.output_dir)
            .unwrap_or(&icon.file_path);
        out.push_str(&format!("  {:>9}  {}\n", label.dimmed(), file.display()));
    }

    for warning in &result.warnings {
        out.push_str(&format!("{} {}\n", "⚠".yellow().bold(), warning.yellow()));
    }

    out
}

/// Formats an export result as JSON.
///
/// # Errors
/// Returns error if serialization fails.
pub fn format_export_json(result: &ExportResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}

/// Formats the effective configuration for display.
pub fn format_config(config: &AppConfig, path: &std::path::Path) -> String {
    let formats: Vec<&str> = config.export.formats.iter().map(|f| f.tag()).collect();
    format!(
        "{}\n  File: {}\n  Output dir: {}\n  Sizes: {:?}\n  Formats: {}\n  Clipboard size: {}\n  View mode: {}",
        "⚙ Configuration".bold(),
        path.display(),
        config.export.output_dir.cyan(),
        config.export.sizes,
        formats.join(", ").cyan(),
        config.export.clipboard_size,
        config.ui.view_mode.to_string().green()
    )
}

/// Truncates a string to `max_chars` characters with ellipsis.
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{head}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ExportedIcon;
    use std::path::PathBuf;

    fn sample_apps() -> Vec<Application> {
        vec![
            Application::new("Calculator", "/System/Applications/Calculator.app")
                .with_bundle_id("com.apple.calculator"),
            Application::new("Notes", "/System/Applications/Notes.app"),
        ]
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world!", 8), "hello...");
        assert_eq!(truncate("Ünïcødé Äpp", 7), "Ünïc...");
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("table".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_list_and_grid_show_every_name() {
        let apps = sample_apps();
        let refs: Vec<&Application> = apps.iter().collect();

        let list = format_applications(&refs, ViewMode::List);
        assert!(list.contains("Calculator"));
        assert!(list.contains("com.apple.calculator"));
        assert!(list.contains("Notes"));

        let grid = format_applications(&refs, ViewMode::Grid);
        assert!(grid.contains("Calculator"));
        assert!(grid.contains("Notes"));
        assert!(!grid.contains("com.apple.calculator"));
    }

    #[test]
    fn test_export_summary_lists_files_and_warnings() {
        let app = Application::new("Notes", "/System/Applications/Notes.app");
        let result = ExportResult {
            output_dir: PathBuf::from("/out/Notes App Icons"),
            results: vec![
                ExportedIcon {
                    size: 32,
                    file_path: PathBuf::from("/out/Notes App Icons/PNG/Notes-32x32.png"),
                },
                ExportedIcon {
                    size: 0,
                    file_path: PathBuf::from("/out/Notes App Icons/ICNS/Notes.icns"),
                },
            ],
            warnings: vec!["JPEG: sips failed".into()],
        };

        let text = format_export_result(&app, &result);
        assert!(text.contains("Exported 2 icon file(s) for "));
        assert!(text.contains("Notes"));
        assert!(text.contains("32x32"));
        assert!(text.contains("PNG/Notes-32x32.png"));
        assert!(text.contains("ICNS/Notes.icns"));
        assert!(text.contains("JPEG: sips failed"));
    }
}
