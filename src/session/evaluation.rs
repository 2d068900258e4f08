use serde::Serialize;

use crate::error::{SessionError, SessionResult};

/// The generated evaluation report and its generation state.
///
/// Independent of the ask flow. Local edits never reach the backend;
/// `edited` only tells the presentation layer the text differs from what was
/// generated.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EvaluationSession {
    pub evaluation_text: String,
    pub generating: bool,
    pub edited: bool,
}

impl EvaluationSession {
    /// Move `Idle -> Generating`.
    pub fn begin(&mut self) -> SessionResult<()> {
        if self.generating {
            return Err(SessionError::EvaluationInFlight);
        }
        self.generating = true;
        Ok(())
    }

    /// Store a freshly generated report.
    pub fn complete(&mut self, text: String) {
        self.evaluation_text = text;
        self.edited = false;
        self.generating = false;
    }

    /// Return to `Idle`, keeping whatever text was there before.
    pub fn fail(&mut self) {
        self.generating = false;
    }

    /// Replace the report text with a local edit.
    pub fn edit(&mut self, text: impl Into<String>) -> SessionResult<()> {
        if self.generating {
            return Err(SessionError::EvaluationInFlight);
        }
        self.evaluation_text = text.into();
        self.edited = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_lifecycle() {
        let mut evaluation = EvaluationSession::default();
        evaluation.begin().unwrap();
        assert!(evaluation.generating);
        assert!(matches!(
            evaluation.begin(),
            Err(SessionError::EvaluationInFlight)
        ));

        evaluation.complete("Risk: Low...".to_string());
        assert!(!evaluation.generating);
        assert_eq!(evaluation.evaluation_text, "Risk: Low...");
        assert!(!evaluation.edited);
    }

    #[test]
    fn test_failure_keeps_previous_text() {
        let mut evaluation = EvaluationSession::default();
        evaluation.begin().unwrap();
        evaluation.fail();
        assert_eq!(evaluation.evaluation_text, "");
        assert!(!evaluation.generating);

        evaluation.complete("v1".to_string());
        evaluation.begin().unwrap();
        evaluation.fail();
        assert_eq!(evaluation.evaluation_text, "v1");
    }

    #[test]
    fn test_edit_blocked_while_generating() {
        let mut evaluation = EvaluationSession::default();
        evaluation.begin().unwrap();
        assert!(matches!(
            evaluation.edit("draft"),
            Err(SessionError::EvaluationInFlight)
        ));
        assert_eq!(evaluation.evaluation_text, "");
    }

    #[test]
    fn test_edit_marks_edited_and_regeneration_clears_it() {
        let mut evaluation = EvaluationSession::default();
        evaluation.begin().unwrap();
        evaluation.complete("Risk: Low...".to_string());

        evaluation.edit("Risk: Low. Reviewed.").unwrap();
        assert_eq!(evaluation.evaluation_text, "Risk: Low. Reviewed.");
        assert!(evaluation.edited);

        evaluation.begin().unwrap();
        evaluation.complete("Risk: Medium".to_string());
        assert!(!evaluation.edited);
    }
}
