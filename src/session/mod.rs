//! The document intake and query session.
//!
//! A [`Session`] is the single owner of the registry, selection, question,
//! answer and evaluation state. Handles are cheap to clone and share one
//! underlying state, so the presentation layer can observe progress while
//! a remote call is pending. Three flows run independently:
//!
//! - upload: a validated batch, fanned out in parallel, merged all-or-nothing
//! - ask: `Idle -> Asking -> Idle`, at most one in flight
//! - evaluation: `Idle -> Generating -> Idle`, started once on session start
//!
//! The state lock is never held across a remote call.

mod evaluation;
mod flight;
mod query;
mod state;


pub use evaluation::EvaluationSession;
pub use query::QuerySession;
pub use state::{SessionSnapshot, SessionState};

pub(crate) use flight::InFlightGuard;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::backend::{AskRequest, DocumentService, UploadFile};
use crate::documents::Document;
use crate::error::{AppResult, SessionError, SessionResult};
use crate::export;
use crate::upload::{AcceptedFile, UploadBatch, UploadOrchestrator};

/// Handle to a client session.
#[derive(Clone)]
pub struct Session {
    service: Arc<dyn DocumentService>,
    state: Arc<RwLock<SessionState>>,
    uploads: UploadOrchestrator,
}

impl Session {
    /// Create an idle session. Call [`Session::start`] to kick off the
    /// automatic evaluation.
    pub fn new(service: Arc<dyn DocumentService>) -> Self {
        let state = Arc::new(RwLock::new(SessionState::new()));
        let uploads = UploadOrchestrator::new(Arc::clone(&service), Arc::clone(&state));
        Self {
            service,
            state,
            uploads,
        }
    }

    /// Start the session: generate the evaluation report in the background.
    pub fn start(&self) -> JoinHandle<SessionResult<String>> {
        let session = self.clone();
        info!("Session started, generating evaluation");
        tokio::spawn(async move { session.generate_evaluation().await })
    }

    // ------------------------------------------------------------------
    // Upload flow
    // ------------------------------------------------------------------

    /// Validate and upload files, merging them only if the whole batch succeeds.
    pub async fn upload(&self, files: Vec<UploadFile>) -> SessionResult<Vec<Document>> {
        self.uploads.upload(files).await
    }

    /// Upload a batch whose type validation happened elsewhere.
    pub async fn upload_validated(
        &self,
        accepted: Vec<AcceptedFile>,
        rejected: Vec<String>,
    ) -> SessionResult<Vec<Document>> {
        self.uploads.upload_batch(accepted, rejected).await
    }

    /// The batch currently uploading, if any.
    pub async fn pending_upload(&self) -> Option<UploadBatch> {
        self.state.read().await.upload.clone()
    }

    // ------------------------------------------------------------------
    // Registry and selection
    // ------------------------------------------------------------------

    /// Flip selection of a known document, returning its new state.
    ///
    /// Unknown ids leave the selection untouched.
    pub async fn toggle_selection(&self, id: &str) -> SessionResult<bool> {
        let mut state = self.state.write().await;
        let SessionState {
            registry,
            selection,
            ..
        } = &mut *state;

        selection
            .toggle(registry, id)
            .ok_or_else(|| SessionError::UnknownDocument { id: id.to_string() })
    }

    /// Whether `id` is currently selected.
    pub async fn is_selected(&self, id: &str) -> bool {
        self.state.read().await.selection.is_selected(id)
    }

    /// Number of selected documents.
    pub async fn selection_count(&self) -> usize {
        self.state.read().await.selection.count()
    }

    /// Registered documents in upload order.
    pub async fn documents(&self) -> Vec<Document> {
        self.state.read().await.registry.documents().to_vec()
    }

    // ------------------------------------------------------------------
    // Ask flow
    // ------------------------------------------------------------------

    /// Replace the question text.
    pub async fn set_question(&self, text: impl Into<String>) {
        self.state.write().await.query.question_text = text.into();
    }

    /// Ask the current question against the current selection.
    ///
    /// A second call while one is in flight is refused without contacting
    /// the backend. On failure the previous answer is kept.
    pub async fn ask(&self) -> SessionResult<String> {
        let (request, guard) = {
            let mut state = self.state.write().await;
            let request = state.begin_ask()?;
            (request, self.ask_guard())
        };
        self.dispatch_ask(request, guard).await
    }

    /// Set the question and ask it.
    ///
    /// The question is left untouched if an ask is already in flight.
    pub async fn ask_question(&self, text: impl Into<String>) -> SessionResult<String> {
        let (request, guard) = {
            let mut state = self.state.write().await;
            if state.query.ask_in_flight {
                return Err(SessionError::AskInFlight);
            }
            state.query.question_text = text.into();
            let request = state.begin_ask()?;
            (request, self.ask_guard())
        };
        self.dispatch_ask(request, guard).await
    }

    fn ask_guard(&self) -> InFlightGuard {
        InFlightGuard::new(Arc::clone(&self.state), |state| state.query.fail_ask())
    }

    async fn dispatch_ask(
        &self,
        request: AskRequest,
        guard: InFlightGuard,
    ) -> SessionResult<String> {
        info!(selected = request.document_ids.len(), "Asking question");

        let result = self.service.ask(request).await;

        let mut state = self.state.write().await;
        guard.disarm();
        match result {
            Ok(response) => {
                state.query.complete_ask(response.answer.clone());
                Ok(response.answer)
            }
            Err(e) => {
                state.query.fail_ask();
                warn!(error = %e, "Ask failed");
                Err(e.into())
            }
        }
    }

    /// The last successful answer.
    pub async fn answer(&self) -> Option<String> {
        self.state.read().await.query.answer_text.clone()
    }

    // ------------------------------------------------------------------
    // Evaluation flow
    // ------------------------------------------------------------------

    /// Generate the evaluation report, replacing the current text on success.
    pub async fn generate_evaluation(&self) -> SessionResult<String> {
        let guard = {
            self.state.write().await.evaluation.begin()?;
            InFlightGuard::new(Arc::clone(&self.state), |state| state.evaluation.fail())
        };

        let result = self.service.generate_evaluation().await;

        let mut state = self.state.write().await;
        guard.disarm();
        match result {
            Ok(response) => {
                state.evaluation.complete(response.evaluation.clone());
                Ok(response.evaluation)
            }
            Err(e) => {
                state.evaluation.fail();
                warn!(error = %e, "Evaluation generation failed");
                Err(e.into())
            }
        }
    }

    /// Replace the evaluation text locally. Nothing is sent to the backend.
    pub async fn edit_evaluation(&self, text: impl Into<String>) -> SessionResult<()> {
        self.state.write().await.evaluation.edit(text)
    }

    /// Current evaluation text, generated or edited.
    pub async fn evaluation(&self) -> String {
        self.state.read().await.evaluation.evaluation_text.clone()
    }

    /// Write the current evaluation text to `loan-evaluation.txt` in `dir`.
    pub async fn export_evaluation(&self, dir: &Path) -> AppResult<PathBuf> {
        let text = self.evaluation().await;
        Ok(export::write_evaluation(&text, dir).await?)
    }

    // ------------------------------------------------------------------
    // Presentation
    // ------------------------------------------------------------------

    /// Point-in-time view of everything the presentation layer renders.
    pub async fn snapshot(&self) -> SessionSnapshot {
        self.state.read().await.snapshot()
    }
}
