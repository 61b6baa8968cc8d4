//! REST client for the non-streaming backend endpoints

use super::error_body::error_message;
use super::types::{
    DocumentMeta, DocumentsResponse, ForeignKeyRef, GraphData, ModelKind, ModelsMap,
    ModelsResponse, RelatedDocument, RelatedResponse, UploadFile,
};
use crate::config::ApiConfig;
use crate::error::{RaglineError, RaglineResult};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Client for model listing, document management and graph queries
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base: Url,
}

impl BackendClient {
    /// Create a client with connect and request timeouts from `config`
    pub fn new(config: &ApiConfig) -> RaglineResult<Self> {
        config.validate()?;
        let http = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| RaglineError::config(format!("Failed to build HTTP client: {}", e)))?;
        Self::with_client(http, config)
    }

    /// Create a client around an existing HTTP client
    pub fn with_client(http: Client, config: &ApiConfig) -> RaglineResult<Self> {
        let base = Url::parse(config.base_url.trim()).map_err(|e| {
            RaglineError::invalid_field("api.base_url", format!("Invalid base URL: {}", e))
        })?;
        if base.cannot_be_a_base() {
            return Err(RaglineError::invalid_field(
                "api.base_url",
                format!("Not a base URL: {}", base),
            ));
        }
        Ok(Self { http, base })
    }

    /// Build `<base>/<segments...>`; each segment is percent-encoded.
    fn url(&self, segments: &[&str]) -> RaglineResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| RaglineError::config(format!("Not a base URL: {}", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn with_document_filter(mut url: Url, document_id: Option<&str>) -> Url {
        if let Some(id) = document_id.filter(|id| !id.is_empty()) {
            url.query_pairs_mut().append_pair("documentId", id);
        }
        url
    }

    async fn send(&self, request: RequestBuilder, url: &Url, fallback: &str) -> RaglineResult<Response> {
        tracing::debug!("Backend request: {}", url);
        let response = request
            .send()
            .await
            .map_err(|e| RaglineError::from(e).with_url(url.as_str()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = error_message(response, fallback).await;
        tracing::debug!("Backend returned {} for {}: {}", status, url, message);
        Err(RaglineError::http_with_status(message, status.as_u16()).with_url(url.as_str()))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, fallback: &str) -> RaglineResult<T> {
        let response = self.send(self.http.get(url.clone()), &url, fallback).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| RaglineError::json(format!("Unexpected response from {}: {}", url, e)))
    }

    /// Read an acknowledgement body whose shape the client does not rely on
    async fn opaque(response: Response) -> Value {
        match response.json::<Value>().await {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!("Ignoring unreadable acknowledgement body: {}", e);
                Value::Null
            }
        }
    }

    /// Models offered per provider
    pub async fn list_models(&self, kind: ModelKind) -> RaglineResult<ModelsMap> {
        let url = self.url(&["api", "models", kind.as_str()])?;
        let body: ModelsResponse = self.get_json(url, "Failed to fetch models").await?;
        Ok(body.models)
    }

    /// All indexed documents
    pub async fn list_documents(&self) -> RaglineResult<Vec<DocumentMeta>> {
        let url = self.url(&["api", "documents"])?;
        let body: DocumentsResponse = self.get_json(url, "Failed to fetch documents").await?;
        Ok(body.documents)
    }

    /// Upload files for indexing with the given embedding model
    pub async fn upload_documents(
        &self,
        files: Vec<UploadFile>,
        embedding_provider: &str,
        embedding_model: &str,
    ) -> RaglineResult<Value> {
        if files.is_empty() {
            return Err(RaglineError::invalid_field("files", "No files to upload"));
        }

        let mut form = Form::new();
        for file in files {
            let part = Part::bytes(file.contents.to_vec()).file_name(file.file_name);
            form = form.part("files", part);
        }
        let form = form
            .text("embeddingProvider", embedding_provider.to_string())
            .text("embeddingModel", embedding_model.to_string());

        let url = self.url(&["api", "documents", "upload"])?;
        let response = self
            .send(self.http.post(url.clone()).multipart(form), &url, "Upload failed")
            .await?;
        Ok(Self::opaque(response).await)
    }

    pub async fn delete_document(&self, id: &str) -> RaglineResult<Value> {
        let url = self.url(&["api", "documents", id])?;
        let response = self
            .send(self.http.delete(url.clone()), &url, "Failed to delete document")
            .await?;
        Ok(Self::opaque(response).await)
    }

    /// Document-level knowledge graph, optionally centred on one document
    pub async fn document_graph(&self, document_id: Option<&str>) -> RaglineResult<GraphData> {
        let url = Self::with_document_filter(self.url(&["api", "graph", "documents"])?, document_id);
        self.get_json(url, "Failed to fetch graph").await
    }

    pub async fn related_documents(&self, document_id: &str) -> RaglineResult<Vec<RelatedDocument>> {
        let url = self.url(&["api", "graph", "documents", document_id, "related"])?;
        let body: RelatedResponse = self.get_json(url, "Failed to fetch related documents").await?;
        Ok(body.related)
    }

    /// Chunks of one document and their links
    pub async fn chunk_graph(&self, document_id: &str) -> RaglineResult<GraphData> {
        let url = self.url(&["api", "graph", "documents", document_id, "chunks"])?;
        self.get_json(url, "Failed to fetch chunk graph").await
    }

    /// Tables and foreign keys extracted from uploaded schema documents
    pub async fn schema_graph(&self, document_id: Option<&str>) -> RaglineResult<GraphData> {
        let url = Self::with_document_filter(self.url(&["api", "graph", "schema"])?, document_id);
        self.get_json(url, "Failed to fetch schema graph").await
    }

    pub async fn delete_schema_table(&self, table: &str) -> RaglineResult<Value> {
        let url = self.url(&["api", "graph", "schema", "tables", table])?;
        let response = self
            .send(self.http.delete(url.clone()), &url, "Failed to delete table")
            .await?;
        Ok(Self::opaque(response).await)
    }

    pub async fn delete_foreign_key(&self, key: &ForeignKeyRef) -> RaglineResult<Value> {
        let url = self.url(&["api", "graph", "schema", "foreign-keys"])?;
        let response = self
            .send(
                self.http.delete(url.clone()).json(key),
                &url,
                "Failed to delete foreign key",
            )
            .await?;
        Ok(Self::opaque(response).await)
    }
}
