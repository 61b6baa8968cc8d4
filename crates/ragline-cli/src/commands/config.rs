//! Configuration display command

use crate::console::CliConsole;
use anyhow::{Context, Result};
use colored::*;
use ragline_core::ClientConfig;
use ragline_core::config::default_config_path;
use std::path::Path;

/// Print the effective configuration as TOML
pub fn show(config: &ClientConfig, config_file: Option<&Path>) -> Result<()> {
    let console = CliConsole::new(true);
    console.print_header("Configuration");

    let source = match config_file {
        Some(path) => path.display().to_string(),
        None => match default_config_path() {
            Some(path) if path.exists() => path.display().to_string(),
            Some(path) => format!("{} (not found, using defaults)", path.display()),
            None => "built-in defaults".to_string(),
        },
    };
    println!("{} {}", "File:".bold(), source);
    println!();

    let rendered = toml::to_string_pretty(config).context("Failed to render configuration")?;
    print!("{}", rendered);
    Ok(())
}
