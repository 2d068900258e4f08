//! Unit tests for backend request/response types.

use super::*;
use crate::documents::ContentType;
use serde_json::json;

// UploadFile tests
#[test]
fn test_upload_file_new() {
    let file = UploadFile::new("report.pdf", "application/pdf", b"%PDF-1.4".to_vec());
    assert_eq!(file.filename, "report.pdf");
    assert_eq!(file.allowed_content_type(), Some(ContentType::Pdf));
    assert_eq!(file.bytes.len(), 8);
}

#[test]
fn test_upload_file_disallowed_content_type() {
    let file = UploadFile::new("photo.txt", "text/plain", Vec::new());
    assert_eq!(file.allowed_content_type(), None);
}

#[tokio::test]
async fn test_upload_file_from_path_infers_type() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scan.JPG");
    std::fs::write(&path, b"jpegbytes").unwrap();

    let file = tokio_test::assert_ok!(UploadFile::from_path(&path).await);
    assert_eq!(file.filename, "scan.JPG");
    assert_eq!(file.content_type, "image/jpeg");
    assert_eq!(file.bytes, b"jpegbytes");
}

#[tokio::test]
async fn test_upload_file_from_missing_path() {
    let dir = tempfile::tempdir().unwrap();
    let result = UploadFile::from_path(dir.path().join("nope.pdf")).await;
    tokio_test::assert_err!(result);
}

// AskRequest tests
#[test]
fn test_ask_request_serialization() {
    let req = AskRequest::new(
        vec!["d1".to_string(), "d2".to_string()],
        "What is the net income?",
    );
    let value = serde_json::to_value(&req).unwrap();
    assert_eq!(
        value,
        json!({
            "document_ids": ["d1", "d2"],
            "text": "What is the net income?"
        })
    );
}

// Response tests
#[test]
fn test_upload_response_with_and_without_text() {
    let with_text: UploadResponse =
        serde_json::from_value(json!({"id": "123", "text": "Balance sheet"})).unwrap();
    assert_eq!(with_text.id, "123");
    assert_eq!(with_text.text.as_deref(), Some("Balance sheet"));

    let bare: UploadResponse = serde_json::from_value(json!({"id": "456"})).unwrap();
    assert!(bare.text.is_none());
}

#[test]
fn test_upload_response_requires_id() {
    let result: Result<UploadResponse, _> = serde_json::from_value(json!({"text": "x"}));
    assert!(result.is_err());
}

#[test]
fn test_document_list_response() {
    let listing: DocumentListResponse = serde_json::from_value(json!({
        "documents": [
            {"id": "1", "metadata": {"filename": "a.pdf", "content_type": "application/pdf"}},
            {"id": "2", "metadata": {"filename": "b.png", "content_type": "image/png"}}
        ]
    }))
    .unwrap();
    assert_eq!(listing.documents.len(), 2);
    assert_eq!(listing.documents[1].metadata.filename, "b.png");
}

#[test]
fn test_health_status() {
    let ok: HealthStatus =
        serde_json::from_value(json!({"status": "success", "message": "Claude API is working!"}))
            .unwrap();
    assert!(ok.is_ok());

    let down: HealthStatus =
        serde_json::from_value(json!({"status": "error", "message": "bad key"})).unwrap();
    assert!(!down.is_ok());
}

// ErrorBody tests
#[test]
fn test_error_body_string_detail() {
    let detail = ErrorBody::detail_from(r#"{"detail": "Documents not found"}"#);
    assert_eq!(detail.as_deref(), Some("Documents not found"));
}

#[test]
fn test_error_body_structured_detail() {
    let detail = ErrorBody::detail_from(r#"{"detail": [{"loc": ["body", "text"], "msg": "field required"}]}"#)
        .unwrap();
    assert!(detail.contains("field required"));
}

#[test]
fn test_error_body_missing_or_blank_detail() {
    assert!(ErrorBody::detail_from(r#"{"error": "boom"}"#).is_none());
    assert!(ErrorBody::detail_from(r#"{"detail": "   "}"#).is_none());
    assert!(ErrorBody::detail_from(r#"{"detail": null}"#).is_none());
    assert!(ErrorBody::detail_from("Internal Server Error").is_none());
    assert!(ErrorBody::detail_from("").is_none());
}
