//! Line-oriented console over stdin/stdout.
//!
//! This module provides:
//! - [`Command`]: parsing of one input line
//! - [`Console`]: the read-eval loop driving a [`Session`]
//! - Rendering helpers that turn a [`SessionSnapshot`] into text
//!
//! Every failure is printed and the loop carries on; only EOF or `quit`
//! ends the session. Uploads, asks and evaluations run as background tasks
//! so `show` can report progress while they are in flight.

mod render;

pub use render::*;

use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

use crate::backend::{BackendClient, UploadFile};
use crate::error::AppError;
use crate::session::Session;

/// A parsed console command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Upload one batch of files from disk.
    Upload(Vec<PathBuf>),
    /// List documents in this session.
    Docs,
    /// Toggle selection of a document id.
    Toggle(String),
    /// Ask a question against the selection.
    Ask(String),
    /// Regenerate the evaluation report.
    Evaluate,
    /// Replace the evaluation text locally.
    Edit(String),
    /// Print the whole session state.
    Show,
    /// Write the evaluation report to disk.
    Export(Option<PathBuf>),
    /// List documents the backend holds.
    Remote,
    /// Check backend health.
    Health,
    Help,
    Quit,
}

impl Command {
    /// Parse a single input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "upload" => {
                if rest.is_empty() {
                    return Err("usage: upload <path>...".to_string());
                }
                Command::Upload(rest.split_whitespace().map(PathBuf::from).collect())
            }
            "docs" | "ls" => Command::Docs,
            "toggle" | "select" => {
                if rest.is_empty() || rest.contains(char::is_whitespace) {
                    return Err("usage: toggle <document-id>".to_string());
                }
                Command::Toggle(rest.to_string())
            }
            "ask" => Command::Ask(rest.to_string()),
            "evaluate" | "eval" => Command::Evaluate,
            "edit" => Command::Edit(rest.to_string()),
            "show" => Command::Show,
            "export" | "download" => {
                Command::Export((!rest.is_empty()).then(|| PathBuf::from(rest)))
            }
            "remote" => Command::Remote,
            "health" => Command::Health,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(format!("unknown command '{}', type 'help'", other)),
        };

        Ok(Some(command))
    }

    /// Commands that wait on the backend and run without blocking input.
    pub fn runs_in_background(&self) -> bool {
        matches!(self, Command::Upload(_) | Command::Ask(_) | Command::Evaluate)
    }
}

/// Interactive front end for one session.
#[derive(Clone)]
pub struct Console {
    session: Session,
    client: BackendClient,
    export_dir: PathBuf,
}

impl Console {
    /// Create a console over a session that talks to `client`.
    pub fn new(session: Session, client: BackendClient, export_dir: PathBuf) -> Self {
        Self {
            session,
            client,
            export_dir,
        }
    }

    /// Run over stdin/stdout until EOF or `quit`.
    ///
    /// Starts the automatic evaluation in the background first.
    pub async fn run(&self) -> std::io::Result<()> {
        info!("Console session starting");
        let _evaluation = self.session.start();

        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// Read commands from `reader` until EOF or `quit`, writing to `out`.
    ///
    /// Background commands buffer their output and write it whole once they
    /// finish. On EOF the loop waits for them; `quit` aborts them.
    pub async fn serve<R, W>(&self, mut reader: R, out: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let out = Arc::new(Mutex::new(out));
        let mut tasks = JoinSet::new();
        let mut line = String::new();

        {
            let mut out = out.lock().await;
            out.write_all(HELP_TEXT.as_bytes()).await?;
            out.flush().await?;
        }

        let quit = loop {
            line.clear();
            let bytes_read = reader.read_line(&mut line).await?;

            // EOF reached
            if bytes_read == 0 {
                info!("EOF received, ending session");
                break false;
            }

            debug!(input = %line.trim(), "Received command");

            let command = match Command::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(usage) => {
                    let mut out = out.lock().await;
                    write_line(&mut *out, &usage).await?;
                    out.flush().await?;
                    continue;
                }
            };

            if command.runs_in_background() {
                let console = self.clone();
                let out = Arc::clone(&out);
                tasks.spawn(async move {
                    let mut buffer = Vec::new();
                    console.execute(command, &mut buffer).await?;
                    let mut out = out.lock().await;
                    out.write_all(&buffer).await?;
                    out.flush().await
                });
                continue;
            }

            let mut out = out.lock().await;
            let keep_going = self.execute(command, &mut *out).await?;
            out.flush().await?;
            if !keep_going {
                break true;
            }
        };

        if quit {
            tasks.abort_all();
        }
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Err(e)) => error!(error = %e, "Failed to write command output"),
                Err(e) if !e.is_cancelled() => error!(error = %e, "Command task failed"),
                _ => {}
            }
        }

        info!("Console session ended");
        Ok(())
    }

    /// Execute one command, writing its output. Returns `false` to stop.
    pub async fn execute<W>(&self, command: Command, out: &mut W) -> std::io::Result<bool>
    where
        W: AsyncWrite + Unpin,
    {
        match command {
            Command::Upload(paths) => {
                let mut files = Vec::with_capacity(paths.len());
                for path in &paths {
                    match UploadFile::from_path(path).await {
                        Ok(file) => files.push(file),
                        Err(e) => {
                            error!(path = %path.display(), error = %e, "Cannot read file");
                            let msg = format!("cannot read {}: {}", path.display(), e);
                            write_line(out, &msg).await?;
                            return Ok(true);
                        }
                    }
                }
                let msg = match self.session.upload(files).await {
                    Ok(added) => render_uploaded(&added),
                    Err(e) => render_error(&AppError::from(e)),
                };
                write_line(out, &msg).await?;
            }
            Command::Docs => {
                let snapshot = self.session.snapshot().await;
                write_line(out, &render_documents(&snapshot)).await?;
            }
            Command::Toggle(id) => {
                let msg = match self.session.toggle_selection(&id).await {
                    Ok(true) => format!("selected {}", id),
                    Ok(false) => format!("deselected {}", id),
                    Err(e) => render_error(&AppError::from(e)),
                };
                write_line(out, &msg).await?;
            }
            Command::Ask(question) => {
                let msg = match self.session.ask_question(question).await {
                    Ok(answer) => format!("Answer:\n{}", answer),
                    Err(e) => render_error(&AppError::from(e)),
                };
                write_line(out, &msg).await?;
            }
            Command::Evaluate => {
                let msg = match self.session.generate_evaluation().await {
                    Ok(text) => format!("Evaluation:\n{}", text),
                    Err(e) => render_error(&AppError::from(e)),
                };
                write_line(out, &msg).await?;
            }
            Command::Edit(text) => {
                let msg = match self.session.edit_evaluation(text).await {
                    Ok(()) => "evaluation updated".to_string(),
                    Err(e) => render_error(&AppError::from(e)),
                };
                write_line(out, &msg).await?;
            }
            Command::Show => {
                let snapshot = self.session.snapshot().await;
                write_line(out, &render_snapshot(&snapshot)).await?;
            }
            Command::Export(dir) => {
                let dir = dir.unwrap_or_else(|| self.export_dir.clone());
                let msg = match self.session.export_evaluation(&dir).await {
                    Ok(path) => format!("saved {}", path.display()),
                    Err(e) => render_error(&e),
                };
                write_line(out, &msg).await?;
            }
            Command::Remote => {
                let msg = match self.client.list_documents().await {
                    Ok(docs) => render_remote_documents(&docs),
                    Err(e) => render_error(&AppError::Backend(e)),
                };
                write_line(out, &msg).await?;
            }
            Command::Health => {
                let msg = match self.client.health_check().await {
                    Ok(health) if health.is_ok() => format!("backend ok: {}", health.message),
                    Ok(health) => format!("backend degraded: {}", health.message),
                    Err(e) => render_error(&AppError::Backend(e)),
                };
                write_line(out, &msg).await?;
            }
            Command::Help => write_line(out, HELP_TEXT.trim_end()).await?,
            Command::Quit => return Ok(false),
        }

        Ok(true)
    }
}

async fn write_line<W>(out: &mut W, text: &str) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    out.write_all(text.as_bytes()).await?;
    out.write_all(b"\n").await
}
