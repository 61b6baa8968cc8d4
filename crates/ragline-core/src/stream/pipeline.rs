//! Decode -> parse -> reduce loop of one session

use super::frame::{ProtocolEvent, parse_frame};
use super::line_decoder::LineDecoder;
use super::observer::StreamObserver;
use super::reducer::{ModeReducer, Transition, error_content, reducer_for};
use crate::types::{ChatMode, Message};
use futures::{Stream, StreamExt};
use std::fmt::Display;
use tokio_util::sync::CancellationToken;

/// How a session ended
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    /// Finished, by sentinel or by the transport closing
    Completed(Message),
    /// The backend or the transport reported an error
    Failed { error: String, message: Message },
    /// The caller cancelled; no terminal callback was made
    Cancelled,
    /// The backend accepted the request but sent no body
    NoBody,
}

impl SessionOutcome {
    /// Final message of the session, if it produced one
    pub fn message(&self) -> Option<&Message> {
        match self {
            Self::Completed(message) | Self::Failed { message, .. } => Some(message),
            Self::Cancelled | Self::NoBody => None,
        }
    }
}

/// Observer wrapper that refuses to call through once cancelled
pub(crate) struct Guarded<'a> {
    observer: &'a mut dyn StreamObserver,
    token: &'a CancellationToken,
}

impl<'a> Guarded<'a> {
    pub(crate) fn new(observer: &'a mut dyn StreamObserver, token: &'a CancellationToken) -> Self {
        Self { observer, token }
    }

    fn live(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Report a failure that happened outside the reducer. Returns the
    /// matching outcome.
    pub(crate) fn fail(&mut self, error: String) -> SessionOutcome {
        if !self.live() {
            return SessionOutcome::Cancelled;
        }
        let message = Message::assistant(error_content(&error));
        self.observer.on_error(error.clone(), message.clone());
        SessionOutcome::Failed { error, message }
    }
}

/// Feed `byte_stream` through decoder, parser and the reducer for `mode`,
/// reporting every transition to `observer`.
///
/// Returns when a terminal event is seen, when the stream ends (treated as a
/// successful completion), on the first transport error, or as soon as
/// `token` is cancelled. Cancellation is checked while waiting for bytes and
/// again before every callback.
pub async fn run_pipeline<S, B, E>(
    byte_stream: S,
    mode: ChatMode,
    observer: &mut dyn StreamObserver,
    token: &CancellationToken,
) -> SessionOutcome
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: Display,
{
    let mut stream = std::pin::pin!(byte_stream);
    let mut decoder = LineDecoder::new();
    let mut reducer = reducer_for(mode);
    let mut guarded = Guarded::new(observer, token);

    loop {
        let next = tokio::select! {
            biased;
            _ = token.cancelled() => {
                tracing::debug!("Session cancelled while waiting for data");
                return SessionOutcome::Cancelled;
            }
            next = stream.next() => next,
        };

        match next {
            Some(Ok(bytes)) => {
                for line in decoder.feed(bytes.as_ref()) {
                    let Some(event) = parse_frame(&line) else {
                        continue;
                    };
                    if let Some(outcome) = dispatch(reducer.as_mut(), event, &mut guarded) {
                        return outcome;
                    }
                }
            }
            Some(Err(e)) => {
                tracing::warn!("Stream read failed: {}", e);
                return guarded.fail(e.to_string());
            }
            None => {
                decoder.finish();
                tracing::debug!("Stream closed, completing session");
                return dispatch(reducer.as_mut(), ProtocolEvent::End, &mut guarded)
                    .unwrap_or(SessionOutcome::Cancelled);
            }
        }
    }
}

/// Apply one event and notify the observer. Returns the outcome when the
/// session is over.
fn dispatch(
    reducer: &mut dyn ModeReducer,
    event: ProtocolEvent,
    guarded: &mut Guarded<'_>,
) -> Option<SessionOutcome> {
    if !guarded.live() {
        return Some(SessionOutcome::Cancelled);
    }

    let sources = match &event {
        ProtocolEvent::Sources { sources } => Some(sources.clone()),
        _ => None,
    };
    let is_chunk = matches!(event, ProtocolEvent::Chunk { .. });

    let transition = reducer.apply(event);

    if let Some(sources) = sources {
        guarded.observer.on_sources(&sources);
    }

    match transition {
        Transition::Idle => None,
        Transition::Snapshot(message) => {
            if is_chunk {
                guarded.observer.on_chunk(&message);
            } else {
                guarded.observer.on_step(&message);
            }
            None
        }
        Transition::Completed(message) => {
            guarded.observer.on_done(message.clone());
            Some(SessionOutcome::Completed(message))
        }
        Transition::Failed { error, message } => {
            guarded.observer.on_error(error.clone(), message.clone());
            Some(SessionOutcome::Failed { error, message })
        }
    }
}
