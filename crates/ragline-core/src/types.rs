//! Conversation types shared by the reducers and the presentation layer

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Which backend pipeline answers a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatMode {
    /// Retrieval-augmented chat: streamed text plus cited sources
    #[default]
    Chat,
    /// SQL agent: tool-call transcript plus a final answer
    Agent,
}

impl ChatMode {
    /// Stable lowercase name, used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::Agent => "agent",
        }
    }
}

impl fmt::Display for ChatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Author of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A retrieved document chunk cited by an answer.
///
/// The backend owns this shape; fields the client does not know about are
/// kept in `extra` so the payload survives a round trip unmodified. A known
/// field that is null or of the wrong type falls back to its default.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    #[serde(default, deserialize_with = "lenient")]
    pub document_id: String,
    #[serde(default, deserialize_with = "lenient")]
    pub file_name: String,
    #[serde(default, deserialize_with = "lenient")]
    pub chunk_index: u64,
    #[serde(default, deserialize_with = "lenient")]
    pub content: String,
    #[serde(default, deserialize_with = "lenient")]
    pub score: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// One completed tool invocation of the agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentStep {
    pub tool: String,
    pub input: String,
    pub result: String,
}

/// A chat message as the presentation layer sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<Source>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<AgentStep>>,
}

impl Message {
    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            sources: None,
            steps: None,
        }
    }

    /// Create an assistant message without sources or steps
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            sources: None,
            steps: None,
        }
    }

    /// The message shown before the first event of a session arrives
    pub fn placeholder(mode: ChatMode) -> Self {
        match mode {
            ChatMode::Chat => Self::assistant(""),
            ChatMode::Agent => Self::assistant("Thinking...").with_steps(Vec::new()),
        }
    }

    pub fn with_sources(mut self, sources: Vec<Source>) -> Self {
        self.sources = Some(sources);
        self
    }

    pub fn with_steps(mut self, steps: Vec<AgentStep>) -> Self {
        self.steps = Some(steps);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_source_preserves_unknown_fields() {
        let raw = json!({
            "documentId": "d1",
            "fileName": "a.pdf",
            "chunkIndex": 3,
            "content": "...",
            "score": 0.5,
            "page": 12
        });
        let source: Source = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(source.document_id, "d1");
        assert_eq!(source.chunk_index, 3);
        assert_eq!(source.extra.get("page"), Some(&json!(12)));
        assert_eq!(serde_json::to_value(&source).unwrap(), raw);
    }

    #[test]
    fn test_source_tolerates_null_and_mistyped_fields() {
        let source: Source = serde_json::from_value(json!({
            "documentId": "d2",
            "fileName": null,
            "chunkIndex": "7",
            "score": null,
            "page": 4
        }))
        .unwrap();
        assert_eq!(source.document_id, "d2");
        assert_eq!(source.file_name, "");
        assert_eq!(source.chunk_index, 0);
        assert_eq!(source.score, 0.0);
        assert_eq!(source.extra.get("page"), Some(&json!(4)));
    }

    #[test]
    fn test_message_serialization_omits_empty_options() {
        let value = serde_json::to_value(Message::assistant("hi")).unwrap();
        assert_eq!(value, json!({"role": "assistant", "content": "hi"}));
    }

    #[test]
    fn test_placeholder_per_mode() {
        assert_eq!(Message::placeholder(ChatMode::Chat).content, "");
        let agent = Message::placeholder(ChatMode::Agent);
        assert_eq!(agent.content, "Thinking...");
        assert_eq!(agent.steps, Some(Vec::new()));
    }
}
