//! Streaming answers from the backend
//!
//! A session turns the raw response body into observer callbacks in four
//! stages: [`LineDecoder`] splits bytes into UTF-8 lines, [`parse_frame`]
//! turns `data:` lines into [`ProtocolEvent`]s, a [`ModeReducer`] folds the
//! events into the visible [`Message`](crate::types::Message), and the
//! [`SessionController`] drives it all and owns cancellation.

pub mod frame;
pub mod line_decoder;
pub mod observer;
mod pipeline;
pub mod reducer;
mod session;


pub use frame::{ProtocolEvent, StepKind, parse_frame};
pub use line_decoder::LineDecoder;
pub use observer::{ChannelObserver, SessionUpdate, StreamObserver};
pub use pipeline::{SessionOutcome, run_pipeline};
pub use reducer::{AgentReducer, ChatReducer, ModeReducer, PendingToolCall, Transition, reducer_for};
pub use session::{CancelHandle, SessionController, StreamRequest, StreamSession};
