use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::documents::ContentType;

/// A file ready to be sent to `POST /upload`.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// Create an upload from in-memory bytes.
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk, inferring its content type from the extension.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let content_type = ContentType::mime_for_filename(&filename);

        Ok(Self::new(filename, content_type, bytes))
    }

    /// The allow-listed content type, if this file has one.
    pub fn allowed_content_type(&self) -> Option<ContentType> {
        ContentType::parse(&self.content_type)
    }
}

/// Response from `POST /upload`
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub id: String,
    /// OCR text extracted by the backend.
    #[serde(default)]
    pub text: Option<String>,
}

/// Request body for `POST /ask`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AskRequest {
    pub document_ids: Vec<String>,
    pub text: String,
}

impl AskRequest {
    pub fn new(document_ids: Vec<String>, text: impl Into<String>) -> Self {
        Self {
            document_ids,
            text: text.into(),
        }
    }
}

/// Response from `POST /ask`
#[derive(Debug, Clone, Deserialize)]
pub struct AskResponse {
    pub answer: String,
}

/// Response from `POST /generate-evaluation`
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluationResponse {
    pub evaluation: String,
}

/// Error body returned by the backend on non-2xx responses
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    /// Either a plain message or a structured validation report.
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Parse an error body and extract a human-readable detail, if any.
    pub fn detail_from(body: &str) -> Option<String> {
        let parsed: ErrorBody = serde_json::from_str(body).ok()?;
        match parsed.detail? {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s),
            serde_json::Value::String(_) | serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

/// Metadata the backend stores alongside each ingested document
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteMetadata {
    pub filename: String,
    pub content_type: String,
}

/// A document as listed by `GET /documents`
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteDocument {
    pub id: String,
    pub metadata: RemoteMetadata,
}

/// Response from `GET /documents`
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentListResponse {
    pub documents: Vec<RemoteDocument>,
}

/// Response from `GET /test-claude`
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status == "success"
    }
}
