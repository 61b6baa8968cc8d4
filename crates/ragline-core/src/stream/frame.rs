//! Wire frame parsing
//!
//! Each meaningful line of a response body looks like `data: <JSON>`. The
//! literal payload `[DONE]` ends the stream. Anything else is ignored.
//!
//! Parsing is deliberately lenient: a frame whose payload is not a JSON
//! object, or whose `type` is unknown, produces no event at all rather than an
//! error. Transports occasionally deliver garbled frames and one bad frame must
//! not abort an otherwise healthy answer.

use crate::types::Source;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Prefix of every frame line
pub const DATA_PREFIX: &str = "data: ";

/// Payload that marks the graceful end of a stream
pub const DONE_SENTINEL: &str = "[DONE]";

/// Sub-kind of an agent `step` frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    ToolCall,
    ToolResult,
    Answer,
}

impl StepKind {
    fn from_wire(value: &str) -> Option<Self> {
        match value {
            "tool_call" => Some(Self::ToolCall),
            "tool_result" => Some(Self::ToolResult),
            "answer" => Some(Self::Answer),
            _ => None,
        }
    }

    /// Wire name of this step kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ToolCall => "tool_call",
            Self::ToolResult => "tool_result",
            Self::Answer => "answer",
        }
    }
}

/// A decoded application-level event
#[derive(Debug, Clone, PartialEq)]
pub enum ProtocolEvent {
    /// Next slice of chat answer text
    Chunk { text: String },
    /// Retrieved sources backing the answer
    Sources { sources: Vec<Source> },
    /// One agent transcript entry
    Step { kind: StepKind, content: String },
    /// Backend-reported failure
    Error { message: String },
    /// Graceful end of stream
    End,
}

/// Parse one decoded line into at most one event.
pub fn parse_frame(line: &str) -> Option<ProtocolEvent> {
    let payload = line.strip_prefix(DATA_PREFIX)?.trim();

    if payload == DONE_SENTINEL {
        return Some(ProtocolEvent::End);
    }

    let object = match serde_json::from_str::<Value>(payload) {
        Ok(Value::Object(object)) => object,
        Ok(_) => {
            tracing::trace!("Ignoring non-object frame payload");
            return None;
        }
        Err(e) => {
            tracing::trace!("Ignoring malformed frame payload: {}", e);
            return None;
        }
    };

    classify(object)
}

fn classify(object: Map<String, Value>) -> Option<ProtocolEvent> {
    let kind = object.get("type").and_then(Value::as_str)?;

    match kind {
        "chunk" => {
            let text = object.get("content").and_then(Value::as_str)?;
            Some(ProtocolEvent::Chunk {
                text: text.to_string(),
            })
        }
        "sources" => {
            let Some(items) = object.get("sources").and_then(Value::as_array) else {
                tracing::trace!("Ignoring sources frame without a sources array");
                return None;
            };
            let sources = items.iter().filter_map(parse_source).collect();
            Some(ProtocolEvent::Sources { sources })
        }
        "error" => {
            let message = object
                .get("error")
                .or_else(|| object.get("message"))
                .and_then(Value::as_str)
                .unwrap_or("Stream error");
            Some(ProtocolEvent::Error {
                message: message.to_string(),
            })
        }
        "step" => {
            let step_kind = ["stepType", "step_type", "stepKind", "kind"]
                .iter()
                .find_map(|key| object.get(*key).and_then(Value::as_str))
                .and_then(StepKind::from_wire)?;
            Some(step_event(step_kind, &object))
        }
        // A step envelope whose duplicate `type` key collapsed onto the
        // sub-kind.
        other => StepKind::from_wire(other).map(|step_kind| step_event(step_kind, &object)),
    }
}

/// One bad entry drops only itself, not its siblings.
fn parse_source(item: &Value) -> Option<Source> {
    match Source::deserialize(item) {
        Ok(source) => Some(source),
        Err(e) => {
            tracing::trace!("Skipping source entry with unexpected shape: {}", e);
            None
        }
    }
}

fn step_event(kind: StepKind, object: &Map<String, Value>) -> ProtocolEvent {
    let content = match object.get("content") {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };
    ProtocolEvent::Step { kind, content }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_frame() {
        let event = parse_frame(r#"data: {"type":"chunk","content":"Hello"}"#);
        assert_eq!(
            event,
            Some(ProtocolEvent::Chunk {
                text: "Hello".to_string()
            })
        );
    }

    #[test]
    fn test_chunk_whitespace_is_preserved_inside_content() {
        let event = parse_frame("data:  {\"type\":\"chunk\",\"content\":\"The \"}  ");
        assert_eq!(
            event,
            Some(ProtocolEvent::Chunk {
                text: "The ".to_string()
            })
        );
    }

    #[test]
    fn test_done_sentinel() {
        assert_eq!(parse_frame("data: [DONE]"), Some(ProtocolEvent::End));
        assert_eq!(parse_frame("data: [DONE]  "), Some(ProtocolEvent::End));
    }

    #[test]
    fn test_non_data_lines_are_ignored() {
        assert_eq!(parse_frame(""), None);
        assert_eq!(parse_frame(": keep-alive"), None);
        assert_eq!(parse_frame("event: message"), None);
        assert_eq!(parse_frame("data:{\"type\":\"chunk\",\"content\":\"x\"}"), None);
    }

    #[test]
    fn test_malformed_json_yields_no_event() {
        assert_eq!(parse_frame("data: {not valid json"), None);
        assert_eq!(parse_frame("data: \"just a string\""), None);
        assert_eq!(parse_frame("data: "), None);
    }

    #[test]
    fn test_unknown_type_yields_no_event() {
        assert_eq!(parse_frame(r#"data: {"type":"usage","tokens":3}"#), None);
        assert_eq!(parse_frame(r#"data: {"content":"no type"}"#), None);
    }

    #[test]
    fn test_sources_frame() {
        let line = r#"data: {"type":"sources","sources":[{"documentId":"d1","fileName":"a.pdf","chunkIndex":0,"content":"...","score":0.91}]}"#;
        match parse_frame(line) {
            Some(ProtocolEvent::Sources { sources }) => {
                assert_eq!(sources.len(), 1);
                assert_eq!(sources[0].document_id, "d1");
                assert_eq!(sources[0].file_name, "a.pdf");
                assert!((sources[0].score - 0.91).abs() < f64::EPSILON);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_sources_frame_keeps_valid_entries_next_to_odd_ones() {
        let line = r#"data: {"type":"sources","sources":[{"documentId":"d1","fileName":"a.pdf","chunkIndex":0,"content":"...","score":0.9},{"documentId":"d2","fileName":"b.pdf","chunkIndex":"1","content":"...","score":null},"stray"]}"#;
        match parse_frame(line) {
            Some(ProtocolEvent::Sources { sources }) => {
                let ids: Vec<&str> = sources.iter().map(|s| s.document_id.as_str()).collect();
                assert_eq!(ids, ["d1", "d2"]);
                assert!((sources[0].score - 0.9).abs() < f64::EPSILON);
                assert_eq!(sources[1].score, 0.0);
                assert_eq!(sources[1].chunk_index, 0);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_sources_with_wrong_shape_yields_no_event() {
        assert_eq!(parse_frame(r#"data: {"type":"sources","sources":"nope"}"#), None);
    }

    #[test]
    fn test_error_frame() {
        assert_eq!(
            parse_frame(r#"data: {"type":"error","error":"quota exceeded"}"#),
            Some(ProtocolEvent::Error {
                message: "quota exceeded".to_string()
            })
        );
        assert_eq!(
            parse_frame(r#"data: {"type":"error"}"#),
            Some(ProtocolEvent::Error {
                message: "Stream error".to_string()
            })
        );
    }

    #[test]
    fn test_step_frame_with_explicit_sub_kind() {
        assert_eq!(
            parse_frame(r#"data: {"type":"step","stepType":"tool_result","content":"3 rows"}"#),
            Some(ProtocolEvent::Step {
                kind: StepKind::ToolResult,
                content: "3 rows".to_string()
            })
        );
    }

    #[test]
    fn test_step_frame_with_duplicate_type_key() {
        let line = r#"data: {"type":"step","type":"tool_call","content":"{\"tool\":\"run_sql\",\"input\":\"SELECT 1\"}"}"#;
        assert_eq!(
            parse_frame(line),
            Some(ProtocolEvent::Step {
                kind: StepKind::ToolCall,
                content: r#"{"tool":"run_sql","input":"SELECT 1"}"#.to_string()
            })
        );
    }

    #[test]
    fn test_step_frame_without_sub_kind_yields_no_event() {
        assert_eq!(parse_frame(r#"data: {"type":"step","content":"x"}"#), None);
    }

    #[test]
    fn test_answer_step_missing_content_is_empty() {
        assert_eq!(
            parse_frame(r#"data: {"type":"answer"}"#),
            Some(ProtocolEvent::Step {
                kind: StepKind::Answer,
                content: String::new()
            })
        );
    }
}
