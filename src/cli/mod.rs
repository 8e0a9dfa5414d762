//! CLI interface using clap.
//!
//! Provides command-line arguments and subcommands for the tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::application::OutputFormat;
use crate::domain::{parse_any_size, parse_export_size, ExportFormat, ViewMode};

/// App Icon Exporter - Export macOS application icons as PNG, JPEG or ICNS.
///
/// Quick start: app-icons list | export Safari -s 512,1024 -f png,icns | copy Safari
#[derive(Parser, Debug)]
#[command(name = "app-icons")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging (use multiple times for more verbosity).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Output format: text or json.
    #[arg(long, default_value = "text")]
    pub format: String,

    /// Use this configuration file instead of ~/.app-icon-exporter/config.toml.
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List installed applications.
    List {
        /// Presentation: list or grid (defaults to the remembered mode).
        #[arg(long)]
        view: Option<ViewMode>,

        /// Only show applications whose name contains this text.
        #[arg(long)]
        filter: Option<String>,
    },

    /// Export an application's icon to disk.
    Export {
        /// Application name, bundle id, or path to a .app bundle.
        app: String,

        /// Comma-separated sizes (16, 32, 48, 64, 128, 256, 512, 1024).
        #[arg(short, long, value_delimiter = ',', value_parser = parse_export_size)]
        sizes: Vec<u32>,

        /// Comma-separated formats: png, jpeg, icns.
        #[arg(short, long, value_delimiter = ',')]
        formats: Vec<ExportFormat>,

        /// Base output folder (defaults to the configured folder).
        #[arg(short, long)]
        output: Option<String>,

        /// Reveal the export folder in Finder afterwards.
        #[arg(long)]
        reveal: bool,
    },

    /// Copy an application's icon to the clipboard.
    Copy {
        /// Application name, bundle id, or path to a .app bundle.
        app: String,

        /// Pixel size (any positive value).
        #[arg(short, long, value_parser = parse_any_size)]
        size: Option<u32>,
    },

    /// Set the remembered view mode: list, grid or toggle.
    View {
        /// New mode, or "toggle" to switch.
        mode: String,
    },

    /// Show or create the configuration file.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration.
    Show,
    /// Write a commented default configuration file if none exists.
    Init,
}

impl Cli {
    /// Parse the output format argument.
    pub fn output_format(&self) -> Result<OutputFormat, String> {
        self.format.parse()
    }
}
