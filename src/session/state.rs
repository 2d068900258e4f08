use serde::Serialize;

use super::{EvaluationSession, QuerySession};
use crate::backend::AskRequest;
use crate::documents::{Document, DocumentRegistry, SelectionSet};
use crate::error::SessionResult;
use crate::upload::UploadBatch;

/// Everything a session owns. Mutated only through [`super::Session`] and the
/// upload orchestrator, never across a remote call.
#[derive(Debug, Default)]
pub struct SessionState {
    pub(crate) registry: DocumentRegistry,
    pub(crate) selection: SelectionSet,
    pub(crate) upload: Option<UploadBatch>,
    pub(crate) query: QuerySession,
    pub(crate) evaluation: EvaluationSession,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the ask flow to `Asking` and build the request for the current
    /// question and selection.
    pub(crate) fn begin_ask(&mut self) -> SessionResult<AskRequest> {
        let question = self.query.begin_ask(self.selection.count())?;
        Ok(AskRequest::new(
            self.selection.ordered_ids(&self.registry),
            question,
        ))
    }

    /// Copy out the state the presentation layer renders.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            documents: self.registry.documents().to_vec(),
            selected_ids: self.selection.ordered_ids(&self.registry),
            question: self.query.question_text.clone(),
            answer: self.query.answer_text.clone(),
            ask_in_flight: self.query.ask_in_flight,
            can_ask: self.query.can_ask(self.selection.count()),
            evaluation: self.evaluation.evaluation_text.clone(),
            generating: self.evaluation.generating,
            evaluation_edited: self.evaluation.edited,
            pending_upload: self.upload.clone(),
        }
    }
}

/// Point-in-time view of a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub documents: Vec<Document>,
    /// Selected ids in registry order.
    pub selected_ids: Vec<String>,
    pub question: String,
    pub answer: Option<String>,
    pub ask_in_flight: bool,
    pub can_ask: bool,
    pub evaluation: String,
    pub generating: bool,
    pub evaluation_edited: bool,
    pub pending_upload: Option<UploadBatch>,
}
