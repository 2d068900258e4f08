use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::{partition_files, AcceptedFile, UploadBatch, UploadStatus};
use crate::backend::{DocumentService, UploadFile};
use crate::documents::Document;
use crate::error::{SessionError, SessionResult};
use crate::session::{InFlightGuard, SessionState};

/// Runs upload batches against the backend and commits them to the session.
#[derive(Clone)]
pub struct UploadOrchestrator {
    service: Arc<dyn DocumentService>,
    state: Arc<RwLock<SessionState>>,
}

impl UploadOrchestrator {
    /// Create an orchestrator writing into the given session state.
    pub fn new(service: Arc<dyn DocumentService>, state: Arc<RwLock<SessionState>>) -> Self {
        Self { service, state }
    }

    /// Validate and upload candidate files.
    pub async fn upload(&self, files: Vec<UploadFile>) -> SessionResult<Vec<Document>> {
        let (accepted, rejected) = partition_files(files);
        self.upload_batch(accepted, rejected).await
    }

    /// Upload a pre-validated batch.
    ///
    /// Any rejected file refuses the whole batch before a request is sent.
    /// Otherwise every file is dispatched at once; the resulting documents are
    /// appended in submission order, and only if every upload succeeded and
    /// no returned id is already registered or repeated in the batch.
    pub async fn upload_batch(
        &self,
        accepted: Vec<AcceptedFile>,
        rejected: Vec<String>,
    ) -> SessionResult<Vec<Document>> {
        if !rejected.is_empty() {
            warn!(rejected = ?rejected, "Refusing upload batch with invalid file types");
            return Err(SessionError::Validation { rejected });
        }

        if accepted.is_empty() {
            debug!("Empty upload batch, nothing to do");
            return Ok(Vec::new());
        }

        let batch = UploadBatch::pending(accepted.iter().map(|a| a.file.filename.as_str()));
        let batch_id = batch.id;
        let guard = {
            let mut state = self.state.write().await;
            if state.upload.is_some() {
                return Err(SessionError::UploadInFlight);
            }
            state.upload = Some(batch);
            InFlightGuard::new(Arc::clone(&self.state), move |state| {
                if state.upload.as_ref().map(|b| b.id) == Some(batch_id) {
                    state.upload = None;
                }
            })
        };

        let start = Instant::now();
        let file_count = accepted.len();
        info!(batch_id = %batch_id, files = file_count, "Upload batch started");

        let uploads = accepted.into_iter().enumerate().map(|(index, accepted)| {
            let service = Arc::clone(&self.service);
            let state = Arc::clone(&self.state);
            async move {
                let AcceptedFile { content_type, file } = accepted;
                let filename = file.filename.clone();
                let result = service.upload(file).await;

                let status = match result {
                    Ok(_) => UploadStatus::Done,
                    Err(_) => UploadStatus::Failed,
                };
                if let Some(batch) = state.write().await.upload.as_mut() {
                    batch.mark(index, status);
                }

                match result {
                    Ok(uploaded) => Ok(Document::new(uploaded.id, filename, content_type)),
                    Err(_) => Err(filename),
                }
            }
        });

        // All requests run at once; results come back in submission order.
        let results: Vec<Result<Document, String>> = stream::iter(uploads)
            .buffered(file_count)
            .collect()
            .await;

        let mut documents = Vec::with_capacity(results.len());
        let mut failed = Vec::new();
        for result in results {
            match result {
                Ok(doc) => documents.push(doc),
                Err(filename) => failed.push(filename),
            }
        }

        let mut state = self.state.write().await;
        guard.disarm();
        state.upload = None;

        if !failed.is_empty() {
            let orphaned_ids: Vec<&str> = documents.iter().map(|d| d.id.as_str()).collect();
            warn!(
                batch_id = %batch_id,
                failed = ?failed,
                orphaned_ids = ?orphaned_ids,
                latency_ms = start.elapsed().as_millis(),
                "Upload batch failed, discarding successful uploads"
            );
            return Err(SessionError::UploadBatchFailed { failed });
        }

        if let Some(id) = state.registry.first_collision(&documents) {
            let id = id.to_string();
            warn!(
                batch_id = %batch_id,
                document_id = %id,
                "Upload batch returned a document id already in use, discarding batch"
            );
            return Err(SessionError::DuplicateDocument { id });
        }

        state.registry.add_documents(documents.iter().cloned());
        info!(
            batch_id = %batch_id,
            added = documents.len(),
            total = state.registry.len(),
            latency_ms = start.elapsed().as_millis(),
            "Upload batch merged"
        );

        Ok(documents)
    }
}
