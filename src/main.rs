//! App Icon Exporter - Export application icons from macOS.
//!
//! Renders icons through the same service Finder uses, writes them in
//! several sizes and formats, or copies one to the clipboard.
//!
//! QUICK START:
//!   app-icons list                           # Installed applications
//!   app-icons list --view grid               # Compact grid
//!   app-icons export Safari                  # Configured sizes and formats
//!   app-icons export Notes -s 512 -f png,icns -o ~/Desktop --reveal
//!   app-icons copy Xcode --size 256          # Clipboard copy
//!   app-icons view toggle                    # Remember list/grid preference

mod application;
mod cli;
mod domain;
mod infrastructure;

use std::path::Path;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use application::{
    copy_to_clipboard, export_icons, filter_applications, find_application, format_applications,
    format_applications_json, format_config, format_export_json, format_export_result,
    OutputFormat,
};
use cli::{Cli, Commands, ConfigAction};
use domain::{AppConfig, AppError, Application, ExportFormat, ViewMode, ALLOWED_SIZES};
use infrastructure::{
    ensure_config_exists, load_config_from_file, read_application, save_config_to_file,
    scan_applications, MacToolkit,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

/// Main application logic.
async fn run(cli: Cli) -> domain::Result<()> {
    let format = cli
        .output_format()
        .map_err(|e| AppError::Config { message: e })?;

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(AppConfig::default_config_path);
    let config = load_config_from_file(&config_path)?;

    match cli.command {
        Commands::List { view, filter } => {
            let view = view.unwrap_or(config.ui.view_mode);
            cmd_list(view, filter.as_deref().unwrap_or_default(), format)?;
        }
        Commands::Export {
            app,
            sizes,
            formats,
            output,
            reveal,
        } => {
            let sizes = resolve_sizes(sizes, &config.export.sizes)?;
            let formats = resolve_formats(formats, &config.export.formats)?;
            let output = output.unwrap_or_else(|| config.export.output_dir.clone());
            cmd_export(&app, &sizes, &formats, &output, reveal, format).await?;
        }
        Commands::Copy { app, size } => {
            let size = resolve_clipboard_size(size, config.export.clipboard_size)?;
            cmd_copy(&app, size).await?;
        }
        Commands::View { mode } => {
            cmd_view(&mode, config, &config_path)?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => println!("{}", format_config(&config, &config_path)),
            ConfigAction::Init => cmd_config_init(&config_path)?,
        },
    }

    Ok(())
}

/// List installed applications.
fn cmd_list(view: ViewMode, filter: &str, format: OutputFormat) -> domain::Result<()> {
    let apps = scan_applications();
    let shown = filter_applications(&apps, filter);

    match format {
        OutputFormat::Json => {
            let json = format_applications_json(&shown).map_err(|e| AppError::Config {
                message: format!("Failed to serialize applications: {e}"),
            })?;
            println!("{json}");
        }
        OutputFormat::Text => {
            if shown.is_empty() {
                println!("No applications found.");
                return Ok(());
            }
            println!("{}", format_applications(&shown, view));
            println!();
            println!(
                "{} application(s) · {} view",
                shown.len().to_string().cyan(),
                view
            );
        }
    }

    Ok(())
}

/// Export icons for one application.
async fn cmd_export(
    query: &str,
    sizes: &[u32],
    formats: &[ExportFormat],
    output: &str,
    reveal: bool,
    format: OutputFormat,
) -> domain::Result<()> {
    let app = resolve_application(query)?;
    let tools = MacToolkit::new();

    let result = export_icons(&tools, &app, sizes, output, formats).await?;

    match format {
        OutputFormat::Json => {
            let json = format_export_json(&result).map_err(|e| AppError::Config {
                message: format!("Failed to serialize export result: {e}"),
            })?;
            println!("{json}");
        }
        OutputFormat::Text => print!("{}", format_export_result(&app, &result)),
    }

    if reveal {
        if let Err(e) = tools.reveal_in_finder(&result.output_dir).await {
            tracing::warn!(error = %e, "Could not reveal export folder");
        }
    }

    Ok(())
}

/// Copy one rendered size to the clipboard.
async fn cmd_copy(query: &str, size: u32) -> domain::Result<()> {
    let app = resolve_application(query)?;
    copy_to_clipboard(&MacToolkit::new(), &app, size).await?;

    println!(
        "{} Copied {}x{} icon of {} to clipboard",
        "✓".green().bold(),
        size,
        size,
        app.name.cyan()
    );
    Ok(())
}

/// Persist the list/grid preference.
fn cmd_view(mode: &str, mut config: AppConfig, config_path: &Path) -> domain::Result<()> {
    let view = if mode.eq_ignore_ascii_case("toggle") {
        config.ui.view_mode.toggled()
    } else {
        mode.parse::<ViewMode>().map_err(AppError::invalid)?
    };

    config.ui.view_mode = view;
    save_config_to_file(&config, config_path)?;

    println!("{} View mode set to {}", "✓".green().bold(), view.to_string().cyan());
    Ok(())
}

/// Write the default configuration file.
fn cmd_config_init(config_path: &Path) -> domain::Result<()> {
    if ensure_config_exists(config_path)? {
        println!(
            "{} Created {}",
            "✓".green().bold(),
            config_path.display()
        );
    } else {
        println!("Configuration already exists at {}", config_path.display());
    }
    Ok(())
}

/// Accept a bundle path directly, otherwise look the name up.
fn resolve_application(query: &str) -> domain::Result<Application> {
    let path = application::normalize_output_path(query);
    if query.ends_with(".app") && path.is_dir() {
        return read_application(&path);
    }

    let apps = scan_applications();
    find_application(&apps, query).cloned()
}

/// CLI sizes, else configured sizes; sorted and deduplicated.
fn resolve_sizes(cli: Vec<u32>, configured: &[u32]) -> domain::Result<Vec<u32>> {
    let mut sizes = if cli.is_empty() {
        configured.to_vec()
    } else {
        cli
    };

    if let Some(bad) = sizes.iter().find(|s| !ALLOWED_SIZES.contains(s)) {
        return Err(AppError::invalid(format!(
            "Unsupported size in configuration: {bad}. Use one of: {ALLOWED_SIZES:?}"
        )));
    }

    sizes.sort_unstable();
    sizes.dedup();

    if sizes.is_empty() {
        return Err(AppError::invalid("No sizes selected"));
    }
    Ok(sizes)
}

/// CLI size, else the configured clipboard size; must be positive.
fn resolve_clipboard_size(cli: Option<u32>, configured: u32) -> domain::Result<u32> {
    match cli.unwrap_or(configured) {
        0 => Err(AppError::invalid(
            "Invalid clipboard size in configuration: 0. Expected a positive integer",
        )),
        size => Ok(size),
    }
}

/// CLI formats, else configured formats; first occurrence order kept.
fn resolve_formats(
    cli: Vec<ExportFormat>,
    configured: &[ExportFormat],
) -> domain::Result<Vec<ExportFormat>> {
    let requested = if cli.is_empty() {
        configured.to_vec()
    } else {
        cli
    };

    let mut formats = Vec::with_capacity(requested.len());
    for format in requested {
        if !formats.contains(&format) {
            formats.push(format);
        }
    }

    if formats.is_empty() {
        return Err(AppError::invalid("No formats selected"));
    }
    Ok(formats)
}

/// Setup tracing/logging based on verbosity level.
fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}
