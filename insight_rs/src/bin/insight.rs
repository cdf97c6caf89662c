//! # insight
//!
//! One-shot CLI: analyze a single JSX/TypeScript file and print its
//! [`FileInsight`](insight::FileInsight) as JSON on stdout.
//!
//! ```bash
//! insight src/components/Counter.jsx --pretty
//! insight app/page.tsx --root ~/project --with-content
//! ```
//!
//! Logs go to stderr so stdout stays machine-readable.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use insight::{InsightConfig, analyze_file};

#[derive(Parser, Debug)]
#[command(name = "insight")]
#[command(about = "Extract components, hooks, state, props and imports from a JSX/TS file")]
#[command(version)]
struct Args {
    /// File to analyze
    file: PathBuf,

    /// Project root holding `.insight/config.toml`
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,

    /// Include the analyzed source as `fileContent`
    #[arg(long)]
    with_content: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn run() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.parse().unwrap_or_default()),
        )
        .init();

    let config = InsightConfig::load(&args.root);
    debug!(root = %args.root.display(), ?config, "config loaded");

    let analyzed = analyze_file(&args.file, &config.analysis)
        .with_context(|| format!("analysis of {} failed", args.file.display()))?;

    let json = match (args.with_content, args.pretty) {
        (true, true) => serde_json::to_string_pretty(&analyzed),
        (true, false) => serde_json::to_string(&analyzed),
        (false, true) => serde_json::to_string_pretty(&analyzed.insight),
        (false, false) => serde_json::to_string(&analyzed.insight),
    }
    .context("failed to serialize report")?;

    println!("{json}");
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[insight] Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
