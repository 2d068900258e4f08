//! Upload orchestration.
//!
//! A batch of files is validated as a whole, uploaded with one request per
//! file in parallel, and merged into the document registry only if every
//! request succeeded.

mod orchestrator;

pub use orchestrator::UploadOrchestrator;

use serde::Serialize;
use uuid::Uuid;

use crate::backend::UploadFile;
use crate::documents::ContentType;

/// Progress of a single file within a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Pending,
    Done,
    Failed,
}

/// One file of an in-flight batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadEntry {
    pub filename: String,
    pub status: UploadStatus,
}

/// Files currently uploading, exposed for progress display.
///
/// Exists only while a batch is in flight; it is cleared once every request
/// in the batch has settled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadBatch {
    pub id: Uuid,
    pub entries: Vec<UploadEntry>,
}

impl UploadBatch {
    /// Start a batch with every file pending.
    pub fn pending<'a>(filenames: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            id: Uuid::new_v4(),
            entries: filenames
                .into_iter()
                .map(|filename| UploadEntry {
                    filename: filename.to_string(),
                    status: UploadStatus::Pending,
                })
                .collect(),
        }
    }

    /// Record the outcome of the file at `index`.
    pub fn mark(&mut self, index: usize, status: UploadStatus) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.status = status;
        }
    }

    pub fn is_settled(&self) -> bool {
        self.entries
            .iter()
            .all(|e| e.status != UploadStatus::Pending)
    }
}

/// A file that passed the content-type allow-list.
#[derive(Debug, Clone)]
pub struct AcceptedFile {
    pub content_type: ContentType,
    pub file: UploadFile,
}

/// Split candidate files into allow-listed files and rejected filenames.
pub fn partition_files(files: Vec<UploadFile>) -> (Vec<AcceptedFile>, Vec<String>) {
    let mut accepted = Vec::new();
    let mut rejected = Vec::new();

    for file in files {
        match file.allowed_content_type() {
            Some(content_type) => accepted.push(AcceptedFile { content_type, file }),
            None => rejected.push(file.filename),
        }
    }

    (accepted, rejected)
}
