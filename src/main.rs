use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use loan_docs_client::{
    config::{BackendConfig, Config, LogFormat},
    console::Console,
    BackendClient, Session,
};

/// Upload loan documents, ask questions about them and review the evaluation report.
#[derive(Parser, Debug)]
#[command(name = "loan-docs", version, about)]
struct Cli {
    /// Backend root URL (overrides BACKEND_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Directory for the exported evaluation (overrides EXPORT_DIR)
    #[arg(long)]
    export_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(base_url) = cli.base_url {
        config.backend = match BackendConfig::new(base_url) {
            Ok(b) => b,
            Err(e) => {
                eprintln!("Configuration error: {}", e);
                std::process::exit(1);
            }
        };
    }
    if let Some(dir) = cli.export_dir {
        config.export.dir = dir;
    }

    // Initialize logging
    init_logging(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        base_url = %config.backend.base_url,
        timeout_ms = ?config.request.timeout_ms,
        "Loan docs client starting..."
    );

    let client = match BackendClient::new(&config.backend, &config.request) {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "Failed to initialize backend client");
            return Err(e.into());
        }
    };

    let session = Session::new(Arc::new(client.clone()));
    let console = Console::new(session, client, config.export.dir.clone());

    if let Err(e) = console.run().await {
        error!(error = %e, "Console error");
        return Err(e.into());
    }

    info!("Session closed");
    Ok(())
}

/// Initialize tracing/logging
fn init_logging(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
