use crate::backend::RemoteDocument;
use crate::documents::Document;
use crate::error::AppError;
use crate::session::SessionSnapshot;
use crate::upload::UploadStatus;

/// Command reference printed at startup and by `help`.
pub const HELP_TEXT: &str = "\
Commands:
  upload <path>...   upload PDF, PNG or JPG files as one batch
  docs               list documents in this session
  toggle <id>        select or deselect a document
  ask <question>     ask a question about the selected documents
  evaluate           regenerate the loan evaluation report
  edit <text>        replace the evaluation text (local only)
  show               print the whole session state
  export [dir]       save the evaluation as loan-evaluation.txt
  remote             list documents stored on the backend
  health             check the backend's model connection
  quit               end the session
";

/// Render an error as a transient notification.
pub fn render_error(err: &AppError) -> String {
    match err {
        AppError::Session(e) => format!("error: {}", e),
        AppError::Backend(e) => format!("error: {}", e),
        other => format!("error: {}", other),
    }
}

/// Summarise a merged upload batch.
pub fn render_uploaded(added: &[Document]) -> String {
    if added.is_empty() {
        return "nothing to upload".to_string();
    }
    let mut out = format!("uploaded {} document(s):", added.len());
    for doc in added {
        out.push_str(&format!("\n  {}  {} ({})", doc.id, doc.filename, doc.content_type));
    }
    out
}

/// List session documents, marking selected ones with `*`.
pub fn render_documents(snapshot: &SessionSnapshot) -> String {
    if snapshot.documents.is_empty() {
        return "no documents yet".to_string();
    }

    let mut out = String::from("Documents:");
    for doc in &snapshot.documents {
        let marker = if snapshot.selected_ids.contains(&doc.id) {
            '*'
        } else {
            ' '
        };
        out.push_str(&format!(
            "\n {} {}  {} ({})",
            marker, doc.id, doc.filename, doc.content_type
        ));
    }
    out.push_str(&format!("\n{} selected", snapshot.selected_ids.len()));
    out
}

/// List documents held by the backend across all sessions.
pub fn render_remote_documents(docs: &[RemoteDocument]) -> String {
    if docs.is_empty() {
        return "backend holds no documents".to_string();
    }
    let mut out = format!("Backend documents ({}):", docs.len());
    for doc in docs {
        out.push_str(&format!(
            "\n  {}  {} ({})",
            doc.id, doc.metadata.filename, doc.metadata.content_type
        ));
    }
    out
}

/// Full session view.
pub fn render_snapshot(snapshot: &SessionSnapshot) -> String {
    let mut out = render_documents(snapshot);

    if let Some(batch) = &snapshot.pending_upload {
        out.push_str("\n\nUploading:");
        for entry in &batch.entries {
            let status = match entry.status {
                UploadStatus::Pending => "pending",
                UploadStatus::Done => "done",
                UploadStatus::Failed => "failed",
            };
            out.push_str(&format!("\n  {}  {}", entry.filename, status));
        }
    }

    out.push_str("\n\nQuestion: ");
    out.push_str(if snapshot.question.is_empty() {
        "(none)"
    } else {
        snapshot.question.as_str()
    });
    if snapshot.ask_in_flight {
        out.push_str("\nAnswer: processing...");
    } else if let Some(answer) = &snapshot.answer {
        out.push_str("\nAnswer:\n");
        out.push_str(answer);
    }

    out.push_str("\n\nEvaluation");
    if snapshot.generating {
        out.push_str(": generating evaluation report...");
    } else if snapshot.evaluation.is_empty() {
        out.push_str(": (empty)");
    } else {
        out.push_str(if snapshot.evaluation_edited {
            " (edited):\n"
        } else {
            ":\n"
        });
        out.push_str(&snapshot.evaluation);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::ContentType;
    use crate::error::SessionError;
    use crate::upload::UploadBatch;

    fn snapshot() -> SessionSnapshot {
        SessionSnapshot {
            documents: vec![
                Document::new("d1", "report.pdf", ContentType::Pdf),
                Document::new("d2", "scan.png", ContentType::Png),
            ],
            selected_ids: vec!["d2".to_string()],
            question: String::new(),
            answer: None,
            ask_in_flight: false,
            can_ask: false,
            evaluation: String::new(),
            generating: false,
            evaluation_edited: false,
            pending_upload: None,
        }
    }

    #[test]
    fn test_render_documents_marks_selection() {
        let text = render_documents(&snapshot());
        assert!(text.contains("   d1  report.pdf (application/pdf)"));
        assert!(text.contains(" * d2  scan.png (image/png)"));
        assert!(text.ends_with("1 selected"));
    }

    #[test]
    fn test_render_documents_empty() {
        let mut snap = snapshot();
        snap.documents.clear();
        snap.selected_ids.clear();
        assert_eq!(render_documents(&snap), "no documents yet");
    }

    #[test]
    fn test_render_snapshot_states() {
        let mut snap = snapshot();
        snap.pending_upload = Some(UploadBatch::pending(["big.pdf"]));
        snap.ask_in_flight = true;
        snap.question = "Revenue?".to_string();
        snap.generating = true;

        let text = render_snapshot(&snap);
        assert!(text.contains("big.pdf  pending"));
        assert!(text.contains("Question: Revenue?"));
        assert!(text.contains("Answer: processing..."));
        assert!(text.contains("generating evaluation report"));

        snap.ask_in_flight = false;
        snap.answer = Some("$120,000".to_string());
        snap.generating = false;
        snap.evaluation = "Risk: Low. Reviewed.".to_string();
        snap.evaluation_edited = true;

        let text = render_snapshot(&snap);
        assert!(text.contains("Answer:\n$120,000"));
        assert!(text.contains("Evaluation (edited):\nRisk: Low. Reviewed."));
    }

    #[test]
    fn test_render_error() {
        let err = AppError::Session(SessionError::Validation {
            rejected: vec!["photo.txt".to_string()],
        });
        assert_eq!(
            render_error(&err),
            "error: Invalid file type. Please upload PDF, PNG, or JPG files."
        );
    }
}
