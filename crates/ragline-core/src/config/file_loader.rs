//! File-based configuration loading

use super::model::ClientConfig;
use crate::error::{RaglineError, RaglineResult};
use std::fs;
use std::path::Path;

/// Load configuration from a file
///
/// Supports TOML, JSON and YAML formats based on file extension; anything
/// else is read as TOML. Fields missing from the file keep their defaults.
pub fn load_from_file(path: &Path) -> RaglineResult<ClientConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        RaglineError::io_with_path(
            format!("Failed to read config file: {}", e),
            path.display().to_string(),
        )
    })?;

    let config: ClientConfig = match path.extension().and_then(|s| s.to_str()) {
        Some("json") => serde_json::from_str(&content).map_err(|e| {
            RaglineError::config_with_context(
                format!("Failed to parse JSON config: {}", e),
                format!("Deserializing JSON configuration from '{}'", path.display()),
            )
        })?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content).map_err(|e| {
            RaglineError::config_with_context(
                format!("Failed to parse YAML config: {}", e),
                format!("Deserializing YAML configuration from '{}'", path.display()),
            )
        })?,
        _ => toml::from_str(&content).map_err(|e| {
            RaglineError::config_with_context(
                format!("Failed to parse TOML config: {}", e),
                format!("Deserializing TOML configuration from '{}'", path.display()),
            )
        })?,
    };

    Ok(config)
}
