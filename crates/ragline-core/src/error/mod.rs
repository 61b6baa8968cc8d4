//! Error types for ragline
//!
//! Every failure that reaches a user is eventually flattened into a single
//! human-readable string (see [`RaglineError::user_message`]). The variants
//! keep enough structure for logging and for the CLI exit path.

mod constructors;
mod conversions;
mod types;
mod user_messages;

pub use types::{RaglineError, RaglineResult};
