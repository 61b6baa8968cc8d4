//! Environment variable-based configuration overrides

use super::model::ClientConfig;
use crate::error::{RaglineError, RaglineResult};

/// Apply `RAGLINE_*` environment variables on top of `config`
pub fn apply_env(config: &mut ClientConfig) -> RaglineResult<()> {
    apply_env_from(config, |key| std::env::var(key).ok())
}

/// Apply overrides using an arbitrary variable lookup
pub fn apply_env_from<F>(config: &mut ClientConfig, lookup: F) -> RaglineResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup("RAGLINE_API_URL") {
        config.api.base_url = url;
    }
    if let Some(provider) = lookup("RAGLINE_PROVIDER") {
        config.defaults.provider = provider;
    }
    if let Some(model) = lookup("RAGLINE_MODEL") {
        config.defaults.model = model;
    }
    if let Some(provider) = lookup("RAGLINE_EMBEDDING_PROVIDER") {
        config.defaults.embedding_provider = provider;
    }
    if let Some(model) = lookup("RAGLINE_EMBEDDING_MODEL") {
        config.defaults.embedding_model = model;
    }
    if let Some(level) = lookup("RAGLINE_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(secs) = lookup("RAGLINE_CONNECT_TIMEOUT_SECS") {
        config.api.connect_timeout_secs = secs.trim().parse().map_err(|_| {
            RaglineError::config_with_context(
                "Invalid RAGLINE_CONNECT_TIMEOUT_SECS value",
                format!("Parsing timeout value '{}'", secs),
            )
        })?;
    }
    Ok(())
}
