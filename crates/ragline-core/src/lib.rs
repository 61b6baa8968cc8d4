//! Ragline core
//!
//! Client-side engine for a retrieval-augmented chat backend: streamed chat
//! and SQL-agent sessions with cancellation, plus the REST calls for models,
//! documents and the knowledge graph.

pub mod api;
pub mod config;
pub mod error;
pub mod stream;
pub mod types;

pub use api::BackendClient;
pub use config::{ClientConfig, ConfigOverrides, load_config};
pub use error::{RaglineError, RaglineResult};
pub use stream::{
    CancelHandle, ChannelObserver, SessionController, SessionOutcome, SessionUpdate,
    StreamObserver, StreamRequest, StreamSession,
};
pub use types::{AgentStep, ChatMode, Message, Role, Source};
