//! Core error type

use thiserror::Error;

/// Result type alias for ragline operations
pub type RaglineResult<T> = Result<T, RaglineError>;

/// Main error type for ragline
#[derive(Error, Debug, Clone)]
pub enum RaglineError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        context: Option<String>,
    },

    /// The backend answered with a non-success status, or the request could
    /// not be built
    #[error("HTTP error: {message}")]
    Http {
        message: String,
        url: Option<String>,
        status_code: Option<u16>,
    },

    /// The connection failed or broke while reading the body
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {message}")]
    Json { message: String },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },

    /// Invalid input errors
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        field: Option<String>,
    },
}
