//! # insight-server
//!
//! Long-running HTTP service exposing file insights for one project root.
//!
//! ```bash
//! insight-server --root ~/project
//! curl -s localhost:4477/analyze -d '{"filePath":"src/App.jsx"}'
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

use insight::InsightConfig;
use insight_server::{AppState, serve};

#[derive(Parser, Debug)]
#[command(name = "insight-server")]
#[command(about = "HTTP service returning JSX/TypeScript file insights")]
#[command(version)]
struct Args {
    /// Project root; requested files must live under it
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Address to bind (overrides `[server] bind` in .insight/config.toml)
    #[arg(long)]
    bind: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

async fn run_server() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.parse().unwrap_or_default()),
        )
        .init();

    info!("Starting insight-server v{}", env!("CARGO_PKG_VERSION"));

    let config = InsightConfig::load(&args.root);
    let bind = args.bind.unwrap_or_else(|| config.server.bind.clone());
    let state = AppState::new(&args.root, &config)
        .with_context(|| format!("invalid project root {}", args.root.display()))?;

    let listener = TcpListener::bind(&bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;

    tokio::select! {
        result = serve(listener, Arc::new(state)) => result.context("server stopped")?,
        _ = tokio::signal::ctrl_c() => info!("Shutting down"),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    match run_server().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[insight-server] Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
