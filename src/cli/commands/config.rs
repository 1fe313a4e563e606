//! Config Command
//!
//! Manage docsmith configuration.
//!
//! Usage:
//!   docsmith config show [--json]
//!   docsmith config path
//!   docsmith config init [--global] [--force]

use std::path::Path;

use crate::cli::ui::Output;
use crate::cli::util::load_config;
use crate::config::ConfigLoader;
use crate::types::Result;

/// Show merged effective configuration
pub fn show(root: &Path, config_file: Option<&Path>, as_json: bool) -> Result<()> {
    let config = load_config(root, config_file)?;
    ConfigLoader::show_config(&config, as_json)
}

/// Show configuration paths
pub fn path(root: &Path) -> Result<()> {
    ConfigLoader::show_path(root);
    Ok(())
}

/// Initialize global configuration
pub fn init_global(force: bool) -> Result<()> {
    let config_path = ConfigLoader::init_global(force)?;
    let output = Output::new();
    output.success("Initialized global configuration");
    output.kv("Config", &config_path.display().to_string());
    Ok(())
}

/// Initialize project configuration
pub fn init_project(root: &Path, force: bool) -> Result<()> {
    let config_path = ConfigLoader::init_project(root, force)?;
    let output = Output::new();
    output.success("Initialized project configuration");
    output.kv("Config", &config_path.display().to_string());
    Ok(())
}
