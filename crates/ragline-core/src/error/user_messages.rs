//! User-facing error text
//!
//! No structured error codes cross into the presentation layer. Each error is
//! shown as one string, usually the server's own message.

use super::types::RaglineError;

impl RaglineError {
    /// The single human-readable string shown to the user.
    ///
    /// Unlike `Display`, this drops the category prefix for errors whose
    /// message already came from the backend.
    pub fn user_message(&self) -> String {
        match self {
            Self::Http { message, .. } => message.clone(),
            Self::Transport { message } => message.clone(),
            other => other.to_string(),
        }
    }
}
