//! # Loan Docs Client
//!
//! Client-side document intake and query orchestration for the SBA loan
//! underwriting assistant backend.
//!
//! ## Features
//!
//! - **Batch Upload**: all-or-nothing upload of PDF/PNG/JPG batches, fanned out in parallel
//! - **Selection**: choose which uploaded documents a question is asked against
//! - **Ask**: single-flight question answering over the selection
//! - **Evaluation**: generated loan evaluation report, editable locally and exportable
//!
//! ## Architecture
//!
//! ```text
//! Console → Session ─┬→ UploadOrchestrator ─┐
//!                    └→ ask / evaluation ───┴→ BackendClient (HTTP) → backend
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use loan_docs_client::{BackendClient, Config, Session, UploadFile};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let client = BackendClient::new(&config.backend, &config.request)?;
//!     let session = Session::new(Arc::new(client));
//!     session.start();
//!
//!     let docs = session.upload(vec![UploadFile::from_path("tax-return.pdf").await?]).await?;
//!     session.toggle_selection(&docs[0].id).await?;
//!     let answer = session.ask_question("What is the net income?").await?;
//!     println!("{}", answer);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

/// Remote service client and wire types.
pub mod backend;
/// Configuration management.
pub mod config;
/// Line-oriented console front end.
pub mod console;
/// Document registry and selection model.
pub mod documents;
/// Error types and result aliases.
pub mod error;
/// Local export of the evaluation report.
pub mod export;
/// The session object owning all client state.
pub mod session;
/// Upload batch orchestration.
pub mod upload;

pub use backend::{BackendClient, DocumentService, UploadFile};
pub use config::Config;
pub use documents::{ContentType, Document, DocumentRegistry, SelectionSet};
pub use error::{AppError, AppResult, BackendError, SessionError};
pub use session::{Session, SessionSnapshot};
