use serde::Serialize;

use crate::error::{SessionError, SessionResult};

/// Question text plus the state of the ask flow.
///
/// `ask_in_flight` is true exactly while a dispatched ask has neither
/// resolved nor rejected.
#[derive(Debug, Clone, Default, Serialize)]
pub struct QuerySession {
    pub question_text: String,
    pub answer_text: Option<String>,
    pub ask_in_flight: bool,
}

impl QuerySession {
    /// Move `Idle -> Asking`, returning the trimmed question to send.
    ///
    /// Refused while another ask is in flight, when nothing is selected, or
    /// when the question is blank. A refusal leaves the state untouched.
    pub fn begin_ask(&mut self, selection_count: usize) -> SessionResult<String> {
        if self.ask_in_flight {
            return Err(SessionError::AskInFlight);
        }
        if selection_count == 0 {
            return Err(SessionError::EmptySelection);
        }
        let question = self.question_text.trim();
        if question.is_empty() {
            return Err(SessionError::BlankQuestion);
        }

        self.ask_in_flight = true;
        Ok(question.to_string())
    }

    /// Replace the previous answer and return to `Idle`.
    pub fn complete_ask(&mut self, answer: String) {
        self.answer_text = Some(answer);
        self.ask_in_flight = false;
    }

    /// Return to `Idle`, keeping the previous answer.
    pub fn fail_ask(&mut self) {
        self.ask_in_flight = false;
    }

    /// Whether the ask trigger should be enabled.
    pub fn can_ask(&self, selection_count: usize) -> bool {
        !self.ask_in_flight && selection_count > 0 && !self.question_text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_question(text: &str) -> QuerySession {
        QuerySession {
            question_text: text.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_begin_ask_trims_question() {
        let mut query = with_question("  What is the net income?  ");
        let question = query.begin_ask(2).unwrap();
        assert_eq!(question, "What is the net income?");
        assert!(query.ask_in_flight);
    }

    #[test]
    fn test_begin_ask_guards() {
        let mut query = with_question("   ");
        assert!(matches!(query.begin_ask(1), Err(SessionError::BlankQuestion)));
        assert!(!query.ask_in_flight);

        let mut query = with_question("Revenue?");
        assert!(matches!(query.begin_ask(0), Err(SessionError::EmptySelection)));
        assert!(!query.ask_in_flight);

        query.begin_ask(1).unwrap();
        assert!(matches!(query.begin_ask(1), Err(SessionError::AskInFlight)));
        assert!(query.ask_in_flight);
    }

    #[test]
    fn test_complete_overwrites_answer() {
        let mut query = with_question("Revenue?");
        query.answer_text = Some("A".to_string());

        query.begin_ask(1).unwrap();
        query.complete_ask("B".to_string());

        assert_eq!(query.answer_text.as_deref(), Some("B"));
        assert!(!query.ask_in_flight);
    }

    #[test]
    fn test_fail_keeps_previous_answer() {
        let mut query = with_question("Revenue?");
        query.answer_text = Some("A".to_string());

        query.begin_ask(1).unwrap();
        query.fail_ask();

        assert_eq!(query.answer_text.as_deref(), Some("A"));
        assert!(!query.ask_in_flight);
        assert!(query.can_ask(1));
    }

    #[test]
    fn test_can_ask() {
        let query = with_question("Revenue?");
        assert!(query.can_ask(1));
        assert!(!query.can_ask(0));
        assert!(!with_question("").can_ask(3));
    }
}
