use thiserror::Error;

/// Generic message surfaced when an ask fails without backend detail.
pub const ASK_FAILED_MESSAGE: &str = "Failed to get answer";

/// Generic message surfaced when evaluation generation fails without backend detail.
pub const EVALUATION_FAILED_MESSAGE: &str = "Failed to generate evaluation";

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Remote service errors
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Upload failed for {filename}: {reason}")]
    UploadFailed { filename: String, reason: String },

    #[error("Query failed{}: {message}", status_suffix(.status))]
    QueryFailed { status: Option<u16>, message: String },

    #[error("Evaluation failed: {message}")]
    EvaluationFailed { message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({})", s)).unwrap_or_default()
}

/// Orchestration errors raised by the session before or after a remote call
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Invalid file type. Please upload PDF, PNG, or JPG files.")]
    Validation { rejected: Vec<String> },

    #[error("Failed to upload one or more documents")]
    UploadBatchFailed { failed: Vec<String> },

    #[error("An upload batch is already in progress")]
    UploadInFlight,

    #[error("Select at least one document before asking")]
    EmptySelection,

    #[error("Question cannot be empty")]
    BlankQuestion,

    #[error("A question is already being answered")]
    AskInFlight,

    #[error("The evaluation is still being generated")]
    EvaluationInFlight,

    #[error("Unknown document: {id}")]
    UnknownDocument { id: String },

    #[error("Document {id} is already in this session")]
    DuplicateDocument { id: String },

    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for remote service operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Result type alias for session operations
pub type SessionResult<T> = Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::Config {
            message: "bad url".to_string(),
        };
        assert_eq!(err.to_string(), "Configuration error: bad url");
    }

    #[test]
    fn test_backend_error_display() {
        let err = BackendError::UploadFailed {
            filename: "report.pdf".to_string(),
            reason: "status 500".to_string(),
        };
        assert_eq!(err.to_string(), "Upload failed for report.pdf: status 500");

        let err = BackendError::QueryFailed {
            status: Some(404),
            message: "Documents not found".to_string(),
        };
        assert_eq!(err.to_string(), "Query failed (404): Documents not found");

        let err = BackendError::QueryFailed {
            status: None,
            message: ASK_FAILED_MESSAGE.to_string(),
        };
        assert_eq!(err.to_string(), "Query failed: Failed to get answer");

        let err = BackendError::EvaluationFailed {
            message: EVALUATION_FAILED_MESSAGE.to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Evaluation failed: Failed to generate evaluation"
        );
    }

    #[test]
    fn test_session_error_display() {
        let err = SessionError::Validation {
            rejected: vec!["photo.txt".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Invalid file type. Please upload PDF, PNG, or JPG files."
        );

        let err = SessionError::UploadBatchFailed {
            failed: vec!["a.pdf".to_string()],
        };
        assert_eq!(err.to_string(), "Failed to upload one or more documents");

        let err = SessionError::UnknownDocument {
            id: "d9".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown document: d9");
    }

    #[test]
    fn test_backend_error_is_transparent_in_session_error() {
        let err: SessionError = BackendError::EvaluationFailed {
            message: "model offline".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Evaluation failed: model offline");
    }

    #[test]
    fn test_session_error_conversion_to_app_error() {
        let app_err: AppError = SessionError::AskInFlight.into();
        assert!(matches!(app_err, AppError::Session(SessionError::AskInFlight)));
    }
}
