//! Document registry and selection model.
//!
//! This module provides:
//! - [`Document`]: a backend-ingested file, immutable once created
//! - [`ContentType`]: the allow-list of uploadable MIME types
//! - [`DocumentRegistry`]: append-only, insertion-ordered document list
//! - [`SelectionSet`]: the documents the next question is asked against

mod selection;


pub use selection::SelectionSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

/// MIME types the backend can ingest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentType {
    /// `application/pdf`
    #[serde(rename = "application/pdf")]
    Pdf,
    /// `image/png`
    #[serde(rename = "image/png")]
    Png,
    /// `image/jpeg`
    #[serde(rename = "image/jpeg")]
    Jpeg,
}

impl ContentType {
    /// All accepted content types, in display order.
    pub const ALL: [ContentType; 3] = [ContentType::Pdf, ContentType::Png, ContentType::Jpeg];

    /// Parse a MIME string against the allow-list.
    pub fn parse(mime: &str) -> Option<Self> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "application/pdf" => Some(Self::Pdf),
            "image/png" => Some(Self::Png),
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            _ => None,
        }
    }

    /// Infer a MIME string from a filename extension.
    ///
    /// Unknown extensions map to `application/octet-stream`, which is not on
    /// the allow-list.
    pub fn mime_for_filename(filename: &str) -> &'static str {
        let ext = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "pdf" => Self::Pdf.as_str(),
            "png" => Self::Png.as_str(),
            "jpg" | "jpeg" => Self::Jpeg.as_str(),
            _ => "application/octet-stream",
        }
    }

    /// Canonical MIME string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A document the backend has ingested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Opaque backend-assigned identifier.
    pub id: String,
    /// Original filename as submitted.
    pub filename: String,
    /// MIME type the file was uploaded with.
    pub content_type: ContentType,
    /// When the upload batch containing this document was merged.
    pub uploaded_at: DateTime<Utc>,
}

impl Document {
    /// Create a document record stamped with the current time.
    pub fn new(id: impl Into<String>, filename: impl Into<String>, content_type: ContentType) -> Self {
        Self {
            id: id.into(),
            filename: filename.into(),
            content_type,
            uploaded_at: Utc::now(),
        }
    }
}

/// Insertion-ordered, append-only list of known documents.
#[derive(Debug, Clone, Default)]
pub struct DocumentRegistry {
    documents: Vec<Document>,
}

impl DocumentRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append documents in the given order.
    ///
    /// Callers check [`DocumentRegistry::first_collision`] first; ids are
    /// not deduplicated here.
    pub fn add_documents(&mut self, docs: impl IntoIterator<Item = Document>) {
        for doc in docs {
            debug!(document_id = %doc.id, filename = %doc.filename, "Document registered");
            self.documents.push(doc);
        }
    }

    /// First id in `docs` that is already registered or repeated within `docs`.
    ///
    /// The backend derives ids from document content, so the same file
    /// uploaded twice comes back with the same id.
    pub fn first_collision<'a>(&'a self, docs: &'a [Document]) -> Option<&'a str> {
        let mut seen = HashSet::new();
        docs.iter()
            .map(|d| d.id.as_str())
            .find(|id| self.contains(id) || !seen.insert(*id))
    }

    /// Whether a document with this id is known.
    pub fn contains(&self, id: &str) -> bool {
        self.documents.iter().any(|d| d.id == id)
    }

    /// Look up a document by id.
    pub fn get(&self, id: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }

    /// All documents in insertion order.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Iterate over document ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.documents.iter().map(|d| d.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
