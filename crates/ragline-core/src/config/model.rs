//! Configuration data models

use super::logging_config::LoggingConfig;
use super::timeouts;
use crate::error::{RaglineError, RaglineResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Backend endpoint settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the backend, e.g. `http://localhost:3001`
    pub base_url: String,
    /// Path of the plain chat stream endpoint
    pub chat_path: String,
    /// Path of the SQL agent stream endpoint
    pub agent_path: String,
    /// Time allowed to establish a connection
    pub connect_timeout_secs: u64,
    /// End-to-end limit for non-streaming requests. Streams are never cut
    /// off by this.
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3001".to_string(),
            chat_path: "/api/chat".to_string(),
            agent_path: "/api/agent/sql".to_string(),
            connect_timeout_secs: timeouts::CONNECT_SECS,
            request_timeout_secs: timeouts::REQUEST_SECS,
        }
    }
}

impl ApiConfig {
    /// Create a config pointing at `base_url` with default paths and timeouts
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Join the base URL and an absolute path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate endpoint settings
    pub fn validate(&self) -> RaglineResult<()> {
        let base = self.base_url.trim();
        if base.is_empty() {
            return Err(RaglineError::invalid_field(
                "api.base_url",
                "base_url must not be empty",
            ));
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(RaglineError::invalid_field(
                "api.base_url",
                format!("base_url must start with http:// or https://, got '{}'", base),
            ));
        }
        for (field, path) in [
            ("api.chat_path", &self.chat_path),
            ("api.agent_path", &self.agent_path),
        ] {
            if !path.starts_with('/') {
                return Err(RaglineError::invalid_field(
                    field,
                    format!("endpoint path must start with '/', got '{}'", path),
                ));
            }
        }
        if self.connect_timeout_secs == 0 || self.request_timeout_secs == 0 {
            return Err(RaglineError::invalid_field(
                "api.timeouts",
                "timeouts must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// Provider and model used when the user does not pick one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// LLM provider: `openai`, `google` or `aistudio`
    pub provider: String,
    pub model: String,
    /// Embedding provider for uploads: `openai` or `google`
    pub embedding_provider: String,
    pub embedding_model: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "gpt-4o-mini".to_string(),
            embedding_provider: "openai".to_string(),
            embedding_model: "text-embedding-3-large".to_string(),
        }
    }
}

/// Complete client configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api: ApiConfig,
    pub defaults: DefaultsConfig,
    pub logging: LoggingConfig,
}

impl ClientConfig {
    /// Validate the whole configuration
    pub fn validate(&self) -> RaglineResult<()> {
        self.api.validate()?;
        if self.defaults.provider.trim().is_empty() || self.defaults.model.trim().is_empty() {
            return Err(RaglineError::invalid_field(
                "defaults",
                "default provider and model must not be empty",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:3001");
        assert_eq!(config.api.chat_path, "/api/chat");
        assert_eq!(config.api.agent_path, "/api/agent/sql");
        assert_eq!(config.defaults.provider, "openai");
        assert_eq!(config.defaults.model, "gpt-4o-mini");
        assert_eq!(config.defaults.embedding_model, "text-embedding-3-large");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let api = ApiConfig::new("http://backend:3001/");
        assert_eq!(api.url("/api/chat"), "http://backend:3001/api/chat");
    }

    #[test]
    fn test_rejects_bad_base_url() {
        assert!(ApiConfig::new("").validate().is_err());
        assert!(ApiConfig::new("ftp://host").validate().is_err());
        assert!(ApiConfig::new("https://host").validate().is_ok());
    }

    #[test]
    fn test_rejects_relative_paths_and_zero_timeouts() {
        let mut api = ApiConfig::default();
        api.chat_path = "api/chat".into();
        assert!(api.validate().is_err());

        let mut api = ApiConfig::default();
        api.connect_timeout_secs = 0;
        assert!(api.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ClientConfig = toml::from_str(
            r#"
            [api]
            base_url = "https://rag.internal"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://rag.internal");
        assert_eq!(config.api.chat_path, "/api/chat");
        assert_eq!(config.defaults, DefaultsConfig::default());
    }
}
