//! Backend REST endpoints outside the streaming path

mod client;
pub(crate) mod error_body;
mod types;

pub use client::BackendClient;
pub use types::{
    DocumentMeta, ForeignKeyRef, GraphData, GraphEdge, GraphNode, ModelKind, ModelOption,
    ModelsMap, NodeKind, RelatedDocument, UploadFile,
};
