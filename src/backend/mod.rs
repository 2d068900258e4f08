//! Remote service client for the underwriting backend.
//!
//! This module provides:
//! - [`DocumentService`]: the three request kinds the session depends on
//! - [`BackendClient`]: the HTTP implementation over `reqwest`
//! - Request and response types for the backend's JSON endpoints

mod client;
mod types;

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;

pub use client::BackendClient;
pub use types::*;

use async_trait::async_trait;

use crate::error::BackendResult;

/// Remote operations the session orchestrates.
///
/// Implementations perform no retries and no caching: each call is a single
/// attempt whose failure is reported to the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentService: Send + Sync {
    /// Ingest one file. The caller has already checked the content type.
    async fn upload(&self, file: UploadFile) -> BackendResult<UploadResponse>;

    /// Ask a question against a non-empty set of document ids.
    async fn ask(&self, request: AskRequest) -> BackendResult<AskResponse>;

    /// Generate the loan evaluation report from whatever the backend holds.
    async fn generate_evaluation(&self) -> BackendResult<EvaluationResponse>;
}
