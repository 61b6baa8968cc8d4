//! Layered configuration loading

use super::env_loader::apply_env;
use super::file_loader::load_from_file;
use super::model::ClientConfig;
use crate::error::RaglineResult;
use std::path::{Path, PathBuf};

/// Values given explicitly on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub api_url: Option<String>,
    pub provider: Option<String>,
    pub model: Option<String>,
    pub log_level: Option<String>,
}

impl ConfigOverrides {
    fn apply(&self, config: &mut ClientConfig) {
        if let Some(url) = &self.api_url {
            config.api.base_url = url.clone();
        }
        if let Some(provider) = &self.provider {
            config.defaults.provider = provider.clone();
        }
        if let Some(model) = &self.model {
            config.defaults.model = model.clone();
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
    }
}

/// Source of configuration data
#[derive(Debug, Clone)]
pub enum ConfigSource {
    /// A file that must exist
    File(PathBuf),
    /// A file that is skipped when absent
    OptionalFile(PathBuf),
    /// `RAGLINE_*` environment variables
    Environment,
    /// Command line values
    Overrides(ConfigOverrides),
}

/// Configuration loader applying sources in the order they were added.
///
/// A file source replaces everything loaded before it (fields it leaves out
/// take their defaults); environment and override sources only touch the
/// values they set.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    sources: Vec<ConfigSource>,
}

impl ConfigLoader {
    /// Create a new config loader
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Add a configuration source
    pub fn add_source(mut self, source: ConfigSource) -> Self {
        self.sources.push(source);
        self
    }

    /// Add a required file source
    pub fn with_file<P: AsRef<Path>>(self, path: P) -> Self {
        self.add_source(ConfigSource::File(path.as_ref().to_path_buf()))
    }

    /// Add a file source that is ignored when the file does not exist
    pub fn with_optional_file<P: AsRef<Path>>(self, path: P) -> Self {
        self.add_source(ConfigSource::OptionalFile(path.as_ref().to_path_buf()))
    }

    /// Add environment variables source
    pub fn with_env(self) -> Self {
        self.add_source(ConfigSource::Environment)
    }

    /// Add command line overrides
    pub fn with_overrides(self, overrides: ConfigOverrides) -> Self {
        self.add_source(ConfigSource::Overrides(overrides))
    }

    /// Load configuration from all sources and validate the result
    pub fn load(self) -> RaglineResult<ClientConfig> {
        let mut config = ClientConfig::default();

        for source in &self.sources {
            match source {
                ConfigSource::File(path) => {
                    tracing::debug!("Loading config file {}", path.display());
                    config = load_from_file(path)?;
                }
                ConfigSource::OptionalFile(path) => {
                    if path.exists() {
                        tracing::debug!("Loading config file {}", path.display());
                        config = load_from_file(path)?;
                    }
                }
                ConfigSource::Environment => apply_env(&mut config)?,
                ConfigSource::Overrides(overrides) => overrides.apply(&mut config),
            }
        }

        config.validate()?;
        Ok(config)
    }
}

/// Default location of the config file: `<config dir>/ragline/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ragline").join("config.toml"))
}

/// Load configuration with the standard precedence:
/// defaults < file < environment < command line.
///
/// An explicitly named file must exist; the default file is optional.
pub fn load_config(
    config_file: Option<&Path>,
    overrides: ConfigOverrides,
) -> RaglineResult<ClientConfig> {
    let mut loader = ConfigLoader::new();
    match config_file {
        Some(path) => loader = loader.with_file(path),
        None => {
            if let Some(path) = default_config_path() {
                loader = loader.with_optional_file(path);
            }
        }
    }
    loader.with_env().with_overrides(overrides).load()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RaglineError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_overrides_win_over_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[defaults]\nprovider = \"google\"\nmodel = \"gemini\"\n").unwrap();

        let config = ConfigLoader::new()
            .with_file(&path)
            .with_overrides(ConfigOverrides {
                model: Some("gemini-2.5-flash".into()),
                ..Default::default()
            })
            .load()
            .unwrap();

        assert_eq!(config.defaults.provider, "google");
        assert_eq!(config.defaults.model, "gemini-2.5-flash");
    }

    #[test]
    fn test_optional_file_missing_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = ConfigLoader::new()
            .with_optional_file(temp_dir.path().join("absent.toml"))
            .load()
            .unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_required_file_missing_fails() {
        let temp_dir = TempDir::new().unwrap();
        let result = ConfigLoader::new()
            .with_file(temp_dir.path().join("absent.toml"))
            .load();
        assert!(matches!(result, Err(RaglineError::Io { .. })));
    }

    #[test]
    fn test_invalid_result_is_rejected() {
        let result = ConfigLoader::new()
            .with_overrides(ConfigOverrides {
                api_url: Some("localhost:3001".into()),
                ..Default::default()
            })
            .load();
        assert!(matches!(result, Err(RaglineError::InvalidInput { .. })));
    }
}
