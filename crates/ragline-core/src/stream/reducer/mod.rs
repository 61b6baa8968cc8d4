//! Mode reducers
//!
//! A reducer folds protocol events, in arrival order, into the single open
//! message of a session. Each call to [`ModeReducer::apply`] reports what the
//! presentation layer should see as a [`Transition`].

mod agent;
mod chat;

pub use agent::{AgentReducer, PendingToolCall};
pub use chat::ChatReducer;

use crate::stream::frame::ProtocolEvent;
use crate::types::{ChatMode, Message};

/// Outcome of applying one event
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// State changed (or not) without anything new to show
    Idle,
    /// The open message has a new visible state
    Snapshot(Message),
    /// The session finished successfully; the message is final
    Completed(Message),
    /// The backend reported an error; the message is final
    Failed { error: String, message: Message },
}

impl Transition {
    /// Whether this transition ends the session
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed(_) | Self::Failed { .. })
    }
}

/// Folds protocol events into an in-progress message
pub trait ModeReducer: Send {
    /// The mode this reducer implements
    fn mode(&self) -> ChatMode;

    /// Apply one event. Must not be called after a terminal transition.
    fn apply(&mut self, event: ProtocolEvent) -> Transition;

    /// Current visible state of the open message
    fn current(&self) -> Message;
}

/// Create the reducer for a mode
pub fn reducer_for(mode: ChatMode) -> Box<dyn ModeReducer> {
    match mode {
        ChatMode::Chat => Box::new(ChatReducer::new()),
        ChatMode::Agent => Box::new(AgentReducer::new()),
    }
}

/// Text shown in place of the answer when the backend reports an error
pub(crate) fn error_content(message: &str) -> String {
    format!("Error: {}", message)
}
