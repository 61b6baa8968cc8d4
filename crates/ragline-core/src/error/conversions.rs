//! From trait implementations for RaglineError conversions

use super::types::RaglineError;

impl From<std::io::Error> for RaglineError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<serde_json::Error> for RaglineError {
    fn from(error: serde_json::Error) -> Self {
        Self::json(error.to_string())
    }
}

impl From<toml::de::Error> for RaglineError {
    fn from(error: toml::de::Error) -> Self {
        Self::config(format!("Failed to parse TOML: {}", error))
    }
}

impl From<serde_yaml::Error> for RaglineError {
    fn from(error: serde_yaml::Error) -> Self {
        Self::config(format!("Failed to parse YAML: {}", error))
    }
}

impl From<reqwest::Error> for RaglineError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_connect() || error.is_timeout() || error.is_body() || error.is_request() {
            return Self::transport(error.to_string());
        }
        if error.is_decode() {
            return Self::json(error.to_string());
        }
        let converted = match error.status() {
            Some(status) => Self::http_with_status(error.to_string(), status.as_u16()),
            None => Self::http(error.to_string()),
        };
        match error.url() {
            Some(url) => converted.with_url(url.as_str()),
            None => converted,
        }
    }
}
