//! Reducer for plain retrieval-augmented chat

use super::{ModeReducer, Transition, error_content};
use crate::stream::frame::ProtocolEvent;
use crate::types::{ChatMode, Message, Source};

/// Accumulates streamed answer text; sources are attached only at the end.
#[derive(Debug, Default)]
pub struct ChatReducer {
    content: String,
    sources: Vec<Source>,
}

impl ChatReducer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ModeReducer for ChatReducer {
    fn mode(&self) -> ChatMode {
        ChatMode::Chat
    }

    fn apply(&mut self, event: ProtocolEvent) -> Transition {
        match event {
            ProtocolEvent::Chunk { text } => {
                self.content.push_str(&text);
                Transition::Snapshot(Message::assistant(self.content.clone()))
            }
            ProtocolEvent::Sources { sources } => {
                self.sources = sources;
                Transition::Idle
            }
            ProtocolEvent::End => Transition::Completed(
                Message::assistant(self.content.clone()).with_sources(self.sources.clone()),
            ),
            ProtocolEvent::Error { message } => Transition::Failed {
                message: Message::assistant(error_content(&message)),
                error: message,
            },
            ProtocolEvent::Step { kind, .. } => {
                tracing::debug!("Chat stream ignoring {} step", kind.as_str());
                Transition::Idle
            }
        }
    }

    fn current(&self) -> Message {
        Message::assistant(self.content.clone())
    }
}
