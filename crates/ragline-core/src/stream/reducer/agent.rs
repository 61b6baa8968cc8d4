//! Reducer for the SQL agent transcript
//!
//! Tool invocations arrive as two separate frames: a `tool_call` followed by
//! its `tool_result`. The call is parked in a single-slot register until the
//! result shows up. The backend alternates calls and results strictly, so a
//! second call before a result overwrites the first, and a result with nothing
//! parked is dropped. Both cases lose data silently.

use super::{ModeReducer, Transition, error_content};
use crate::stream::frame::{ProtocolEvent, StepKind};
use crate::types::{AgentStep, ChatMode, Message, Source};
use serde_json::Value;

const THINKING: &str = "Thinking...";
const UNKNOWN_TOOL: &str = "unknown";

/// An issued tool invocation still waiting for its result
#[derive(Debug, Clone, PartialEq)]
pub struct PendingToolCall {
    pub tool: String,
    pub input: Value,
}

impl PendingToolCall {
    /// Decode the content of a `tool_call` frame: `{"tool": .., "input": ..}`.
    ///
    /// Anything else becomes a call to an `unknown` tool whose input is the
    /// raw content.
    pub fn from_content(content: &str) -> Self {
        match serde_json::from_str::<Value>(content) {
            Ok(Value::Object(mut object)) => {
                let tool = object
                    .get("tool")
                    .and_then(Value::as_str)
                    .unwrap_or(UNKNOWN_TOOL)
                    .to_string();
                let input = object.remove("input").unwrap_or(Value::Null);
                Self { tool, input }
            }
            _ => Self {
                tool: UNKNOWN_TOOL.to_string(),
                input: Value::String(content.to_string()),
            },
        }
    }

    /// Input as display text; structured input is rendered as JSON
    pub fn input_text(&self) -> String {
        match &self.input {
            Value::String(text) => text.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }

    fn complete(self, result: String) -> AgentStep {
        AgentStep {
            input: self.input_text(),
            tool: self.tool,
            result,
        }
    }
}

/// Builds the agent transcript and final answer
#[derive(Debug)]
pub struct AgentReducer {
    steps: Vec<AgentStep>,
    pending: Option<PendingToolCall>,
    answer: String,
    sources: Vec<Source>,
    status: String,
}

impl Default for AgentReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentReducer {
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            pending: None,
            answer: String::new(),
            sources: Vec::new(),
            status: THINKING.to_string(),
        }
    }

    /// Completed steps so far
    pub fn steps(&self) -> &[AgentStep] {
        &self.steps
    }

    /// The parked tool call, if any
    pub fn pending(&self) -> Option<&PendingToolCall> {
        self.pending.as_ref()
    }

    fn snapshot(&mut self, status: String) -> Transition {
        self.status = status;
        Transition::Snapshot(self.current())
    }

    fn apply_step(&mut self, kind: StepKind, content: String) -> Transition {
        match kind {
            StepKind::ToolCall => {
                let call = PendingToolCall::from_content(&content);
                if let Some(replaced) = self.pending.replace(call) {
                    tracing::debug!(
                        "Tool call '{}' overwritten before its result arrived",
                        replaced.tool
                    );
                }
                Transition::Snapshot(self.current())
            }
            StepKind::ToolResult => match self.pending.take() {
                Some(call) => {
                    self.steps.push(call.complete(content));
                    let status = format!("Running... ({} steps)", self.steps.len());
                    self.snapshot(status)
                }
                None => {
                    tracing::debug!("Dropping tool result without a pending tool call");
                    Transition::Idle
                }
            },
            StepKind::Answer => {
                self.answer = content;
                Transition::Idle
            }
        }
    }
}

impl ModeReducer for AgentReducer {
    fn mode(&self) -> ChatMode {
        ChatMode::Agent
    }

    fn apply(&mut self, event: ProtocolEvent) -> Transition {
        match event {
            ProtocolEvent::Step { kind, content } => self.apply_step(kind, content),
            ProtocolEvent::Sources { sources } => {
                self.sources = sources;
                Transition::Idle
            }
            ProtocolEvent::End => Transition::Completed(
                Message::assistant(self.answer.clone())
                    .with_steps(self.steps.clone())
                    .with_sources(self.sources.clone()),
            ),
            ProtocolEvent::Error { message } => Transition::Failed {
                message: Message::assistant(error_content(&message)),
                error: message,
            },
            ProtocolEvent::Chunk { .. } => {
                tracing::debug!("Agent stream ignoring chat chunk");
                Transition::Idle
            }
        }
    }

    fn current(&self) -> Message {
        Message::assistant(self.status.clone()).with_steps(self.steps.clone())
    }
}
