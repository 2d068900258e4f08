//! Local export of the evaluation report.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

/// Filename the evaluation report is saved under.
pub const EVALUATION_FILENAME: &str = "loan-evaluation.txt";

/// MIME type of the exported report.
pub const EVALUATION_MIME: &str = "text/plain";

/// Write `text` verbatim to [`EVALUATION_FILENAME`] inside `dir`.
pub fn export_evaluation(text: &str, dir: &Path) -> io::Result<PathBuf> {
    let path = dir.join(EVALUATION_FILENAME);
    fs::write(&path, text)?;
    info!(path = %path.display(), bytes = text.len(), "Evaluation exported");
    Ok(path)
}

/// Async variant of [`export_evaluation`] for use on the runtime.
pub async fn write_evaluation(text: &str, dir: &Path) -> io::Result<PathBuf> {
    let path = dir.join(EVALUATION_FILENAME);
    tokio::fs::write(&path, text).await?;
    info!(path = %path.display(), bytes = text.len(), "Evaluation exported");
    Ok(path)
}
