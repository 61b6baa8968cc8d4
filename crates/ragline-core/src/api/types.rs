//! Wire types of the backend REST endpoints

use crate::error::{RaglineError, RaglineResult};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Which model catalogue to list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    Llm,
    Embedding,
}

impl ModelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Llm => "llm",
            Self::Embedding => "embedding",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A selectable model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelOption {
    pub id: String,
    pub name: String,
}

/// Models offered per provider, keyed by provider name
pub type ModelsMap = BTreeMap<String, Vec<ModelOption>>;

#[derive(Debug, Deserialize)]
pub(crate) struct ModelsResponse {
    pub models: ModelsMap,
}

/// An indexed document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMeta {
    pub id: String,
    pub file_name: String,
    #[serde(default)]
    pub file_type: String,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default)]
    pub total_chunks: u64,
    #[serde(default)]
    pub owner_id: String,
    #[serde(default)]
    pub embedding_provider: String,
    #[serde(default)]
    pub embedding_model: String,
    pub uploaded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DocumentsResponse {
    pub documents: Vec<DocumentMeta>,
}

/// Kind of a knowledge-graph node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Document,
    Chunk,
    Table,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

/// Nodes and edges of one graph view
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    #[serde(default)]
    pub nodes: Vec<GraphNode>,
    #[serde(default)]
    pub edges: Vec<GraphEdge>,
}

impl GraphData {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes of the given kind
    pub fn nodes_of(&self, kind: NodeKind) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter().filter(move |node| node.kind == kind)
    }
}

/// A document connected to another through shared entities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedDocument {
    pub document_id: String,
    pub file_name: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub connection_count: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RelatedResponse {
    pub related: Vec<RelatedDocument>,
}

/// Identifies one foreign key of the extracted schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignKeyRef {
    pub from_table: String,
    pub to_table: String,
    pub from_column: String,
    pub to_column: String,
}

/// A file to upload
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub contents: Bytes,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, contents: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            contents: contents.into(),
        }
    }

    /// Read a file from disk, naming it after the last path component
    pub async fn from_path(path: &Path) -> RaglineResult<Self> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                RaglineError::invalid_input(format!("Not a file path: {}", path.display()))
            })?
            .to_string();
        let contents = tokio::fs::read(path)
            .await
            .map_err(|e| RaglineError::io_with_path(e.to_string(), path.display().to_string()))?;
        Ok(Self::new(file_name, contents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_meta_from_backend() {
        let doc: DocumentMeta = serde_json::from_value(json!({
            "id": "d1",
            "fileName": "orders.pdf",
            "fileType": "application/pdf",
            "fileSize": 2048,
            "totalChunks": 12,
            "ownerId": "u1",
            "embeddingProvider": "openai",
            "embeddingModel": "text-embedding-3-large",
            "uploadedAt": "2024-05-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(doc.file_name, "orders.pdf");
        assert_eq!(doc.total_chunks, 12);
        assert_eq!(
            doc.uploaded_at.unwrap().to_rfc3339(),
            "2024-05-01T10:00:00+00:00"
        );
    }

    #[test]
    fn test_unknown_node_kind_is_tolerated() {
        let graph: GraphData = serde_json::from_value(json!({
            "nodes": [
                {"id": "d1", "label": "a.pdf", "type": "document", "properties": {}},
                {"id": "x", "label": "?", "type": "entity"}
            ],
            "edges": [{"source": "d1", "target": "x", "type": "MENTIONS"}]
        }))
        .unwrap();
        assert_eq!(graph.nodes[1].kind, NodeKind::Unknown);
        assert_eq!(graph.nodes_of(NodeKind::Document).count(), 1);
        assert_eq!(graph.edges[0].kind, "MENTIONS");
    }

    #[test]
    fn test_foreign_key_body_is_camel_case() {
        let fk = ForeignKeyRef {
            from_table: "orders".into(),
            to_table: "users".into(),
            from_column: "user_id".into(),
            to_column: "id".into(),
        };
        assert_eq!(
            serde_json::to_value(&fk).unwrap(),
            json!({"fromTable": "orders", "toTable": "users", "fromColumn": "user_id", "toColumn": "id"})
        );
    }

    #[tokio::test]
    async fn test_upload_file_from_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();

        let file = UploadFile::from_path(&path).await.unwrap();
        assert_eq!(file.file_name, "notes.txt");
        assert_eq!(&file.contents[..], b"hello");

        let missing = UploadFile::from_path(&dir.path().join("missing.txt")).await;
        assert!(missing.is_err());
    }
}
