//! Callbacks from a running session to the presentation layer

use crate::types::{Message, Source};
use tokio::sync::mpsc;

/// Receives the updates of one session, in arrival order.
///
/// Exactly one of `on_done` / `on_error` is called per session, unless the
/// session is cancelled, in which case neither is. No method is called after
/// cancellation has been observed.
#[cfg_attr(test, mockall::automock)]
pub trait StreamObserver: Send {
    /// The chat answer grew; `message` holds the full text so far.
    fn on_chunk(&mut self, _message: &Message) {}

    /// The agent transcript changed.
    fn on_step(&mut self, _message: &Message) {}

    /// The backend sent the sources backing the answer.
    fn on_sources(&mut self, _sources: &[Source]) {}

    /// The session completed; `message` is final.
    fn on_done(&mut self, message: Message);

    /// The session failed. `message` is the final visible state, showing
    /// `Error: <error>`.
    fn on_error(&mut self, error: String, message: Message);
}

/// One update forwarded by a [`ChannelObserver`]
#[derive(Debug, Clone, PartialEq)]
pub enum SessionUpdate {
    Chunk(Message),
    Step(Message),
    Sources(Vec<Source>),
    Done(Message),
    Error { error: String, message: Message },
}

impl SessionUpdate {
    /// Whether this is the last update of the session
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done(_) | Self::Error { .. })
    }
}

/// Observer that forwards every callback over an unbounded channel, so the
/// consumer can render from its own task.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    tx: mpsc::UnboundedSender<SessionUpdate>,
}

impl ChannelObserver {
    /// Create an observer and the receiving end of its channel
    pub fn new() -> (Self, mpsc::UnboundedReceiver<SessionUpdate>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn send(&self, update: SessionUpdate) {
        if self.tx.send(update).is_err() {
            tracing::trace!("Session update receiver dropped");
        }
    }
}

impl StreamObserver for ChannelObserver {
    fn on_chunk(&mut self, message: &Message) {
        self.send(SessionUpdate::Chunk(message.clone()));
    }

    fn on_step(&mut self, message: &Message) {
        self.send(SessionUpdate::Step(message.clone()));
    }

    fn on_sources(&mut self, sources: &[Source]) {
        self.send(SessionUpdate::Sources(sources.to_vec()));
    }

    fn on_done(&mut self, message: Message) {
        self.send(SessionUpdate::Done(message));
    }

    fn on_error(&mut self, error: String, message: Message) {
        self.send(SessionUpdate::Error { error, message });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_channel_observer_forwards_in_order() {
        let (mut observer, mut rx) = ChannelObserver::new();
        observer.on_chunk(&Message::assistant("a"));
        observer.on_sources(&[]);
        observer.on_done(Message::assistant("a"));
        drop(observer);

        assert_eq!(rx.recv().await, Some(SessionUpdate::Chunk(Message::assistant("a"))));
        assert_eq!(rx.recv().await, Some(SessionUpdate::Sources(vec![])));
        let last = rx.recv().await.unwrap();
        assert!(last.is_terminal());
        assert_eq!(rx.recv().await, None);
    }

    #[test]
    fn test_send_after_receiver_dropped_is_silent() {
        let (mut observer, rx) = ChannelObserver::new();
        drop(rx);
        observer.on_error("x".into(), Message::assistant("Error: x"));
    }
}
