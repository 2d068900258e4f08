use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::types::{
    AskRequest, AskResponse, DocumentListResponse, ErrorBody, EvaluationResponse, HealthStatus,
    RemoteDocument, UploadFile, UploadResponse,
};
use super::DocumentService;
use crate::config::{BackendConfig, RequestConfig};
use crate::error::{BackendError, BackendResult, ASK_FAILED_MESSAGE, EVALUATION_FAILED_MESSAGE};

/// HTTP client for the underwriting backend
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

/// Why a single request did not produce a parsed body.
enum RequestFailure {
    Transport(reqwest::Error),
    Status { status: u16, detail: Option<String> },
    Parse { status: u16, error: reqwest::Error },
}

impl RequestFailure {
    fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(_) => None,
            Self::Status { status, .. } | Self::Parse { status, .. } => Some(*status),
        }
    }

    fn detail(&self) -> Option<String> {
        match self {
            Self::Status { detail, .. } => detail.clone(),
            _ => None,
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Transport(e) => format!("request failed: {}", e),
            Self::Status { status, detail } => match detail {
                Some(d) => format!("status {}: {}", status, d),
                None => format!("status {}", status),
            },
            Self::Parse { error, .. } => format!("malformed response: {}", error),
        }
    }
}

impl BackendClient {
    /// Create a new backend client
    pub fn new(config: &BackendConfig, request_config: &RequestConfig) -> BackendResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = request_config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(BackendError::Http)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get the base URL (for testing)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// List every document the backend has ingested, across all sessions.
    pub async fn list_documents(&self) -> BackendResult<Vec<RemoteDocument>> {
        let start = Instant::now();
        let result = self
            .client
            .get(self.url("/documents"))
            .send()
            .await
            .map_err(RequestFailure::Transport);

        let listing = match result {
            Ok(response) => read_json::<DocumentListResponse>(response).await,
            Err(e) => Err(e),
        };
        let listing = listing.map_err(|failure| {
            warn!(error = %failure.describe(), "Listing documents failed");
            BackendError::QueryFailed {
                status: failure.status(),
                message: failure
                    .detail()
                    .unwrap_or_else(|| "Failed to list documents".to_string()),
            }
        })?;

        debug!(
            count = listing.documents.len(),
            latency_ms = start.elapsed().as_millis(),
            "Listed backend documents"
        );
        Ok(listing.documents)
    }

    /// Check that the backend can reach its language model.
    pub async fn health_check(&self) -> BackendResult<HealthStatus> {
        let result = self
            .client
            .get(self.url("/test-claude"))
            .send()
            .await
            .map_err(RequestFailure::Transport);

        let health = match result {
            Ok(response) => read_json::<HealthStatus>(response).await,
            Err(e) => Err(e),
        };

        health.map_err(|failure| BackendError::QueryFailed {
            status: failure.status(),
            message: failure.describe(),
        })
    }
}

#[async_trait]
impl DocumentService for BackendClient {
    async fn upload(&self, file: UploadFile) -> BackendResult<UploadResponse> {
        let start = Instant::now();
        let UploadFile {
            filename,
            content_type,
            bytes,
        } = file;
        let size = bytes.len();

        debug!(filename = %filename, content_type = %content_type, size, "Uploading document");

        let part = Part::bytes(bytes)
            .file_name(filename.clone())
            .mime_str(&content_type)
            .map_err(|e| BackendError::UploadFailed {
                filename: filename.clone(),
                reason: format!("invalid content type: {}", e),
            })?;
        let form = Form::new().part("file", part);

        let result = match self
            .client
            .post(self.url("/upload"))
            .multipart(form)
            .send()
            .await
        {
            Ok(response) => read_json::<UploadResponse>(response).await,
            Err(e) => Err(RequestFailure::Transport(e)),
        };

        match result {
            Ok(uploaded) => {
                info!(
                    filename = %filename,
                    document_id = %uploaded.id,
                    text_len = uploaded.text.as_ref().map(|t| t.len()).unwrap_or(0),
                    latency_ms = start.elapsed().as_millis(),
                    "Document uploaded"
                );
                Ok(uploaded)
            }
            Err(failure) => {
                let reason = failure.describe();
                warn!(
                    filename = %filename,
                    error = %reason,
                    latency_ms = start.elapsed().as_millis(),
                    "Document upload failed"
                );
                Err(BackendError::UploadFailed { filename, reason })
            }
        }
    }

    async fn ask(&self, request: AskRequest) -> BackendResult<AskResponse> {
        let start = Instant::now();

        debug!(
            documents = request.document_ids.len(),
            question_len = request.text.len(),
            "Asking question"
        );

        let result = match self
            .client
            .post(self.url("/ask"))
            .json(&request)
            .send()
            .await
        {
            Ok(response) => read_json::<AskResponse>(response).await,
            Err(e) => Err(RequestFailure::Transport(e)),
        };

        match result {
            Ok(answer) => {
                info!(
                    documents = request.document_ids.len(),
                    latency_ms = start.elapsed().as_millis(),
                    "Question answered"
                );
                Ok(answer)
            }
            Err(failure) => {
                warn!(
                    error = %failure.describe(),
                    latency_ms = start.elapsed().as_millis(),
                    "Question failed"
                );
                Err(BackendError::QueryFailed {
                    status: failure.status(),
                    message: failure
                        .detail()
                        .unwrap_or_else(|| ASK_FAILED_MESSAGE.to_string()),
                })
            }
        }
    }

    async fn generate_evaluation(&self) -> BackendResult<EvaluationResponse> {
        let start = Instant::now();

        debug!("Requesting evaluation report");

        let result = match self
            .client
            .post(self.url("/generate-evaluation"))
            .send()
            .await
        {
            Ok(response) => read_json::<EvaluationResponse>(response).await,
            Err(e) => Err(RequestFailure::Transport(e)),
        };

        match result {
            Ok(evaluation) => {
                info!(
                    evaluation_len = evaluation.evaluation.len(),
                    latency_ms = start.elapsed().as_millis(),
                    "Evaluation generated"
                );
                Ok(evaluation)
            }
            Err(failure) => {
                warn!(
                    error = %failure.describe(),
                    latency_ms = start.elapsed().as_millis(),
                    "Evaluation generation failed"
                );
                Err(BackendError::EvaluationFailed {
                    message: failure
                        .detail()
                        .unwrap_or_else(|| EVALUATION_FAILED_MESSAGE.to_string()),
                })
            }
        }
    }
}

/// Check the status and decode a JSON body.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, RequestFailure> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(RequestFailure::Status {
            status: status.as_u16(),
            detail: ErrorBody::detail_from(&body),
        });
    }

    response.json().await.map_err(|error| RequestFailure::Parse {
        status: status.as_u16(),
        error,
    })
}
