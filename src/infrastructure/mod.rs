//! Infrastructure layer - external adapters (processes, filesystem, config).
//!
//! This layer handles all I/O operations and external dependencies.

pub mod app_scanner;
pub mod command;
pub mod config;
pub mod mac_tools;

pub use app_scanner::{read_application, scan_applications};
pub use config::{ensure_config_exists, load_config_from_file, save_config_to_file};
pub use mac_tools::MacToolkit;
