//! Request routing and the analyze handler.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use insight::fs_utils::resolve_within_root;
use insight::{AnalysisConfig, InsightConfig, InsightError, analyze_file};

use crate::http::{Request, Response};

/// Shared, read-only server state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Canonical project root; every analyzed file must live under it.
    pub root: PathBuf,
    pub analysis: AnalysisConfig,
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn new(root: &Path, config: &InsightConfig) -> std::io::Result<Self> {
        Ok(Self {
            root: root.canonicalize()?,
            analysis: config.analysis.clone(),
            max_body_bytes: config.server.max_body_bytes,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeRequest {
    file_path: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ErrorBody {
    pub error: String,
    pub details: String,
}

pub(crate) fn error_response(status: u16, error: &str, details: impl Into<String>) -> Response {
    let body = ErrorBody {
        error: error.to_string(),
        details: details.into(),
    };
    Response::json(status, serde_json::to_vec(&body).unwrap_or_default())
}

pub async fn route(state: Arc<AppState>, request: Request) -> Response {
    match (request.method.as_str(), request.path.as_str()) {
        ("POST", "/analyze" | "/api/comprehensive-file-insights") => {
            analyze(state, &request.body).await
        }
        ("GET", "/health") => health(),
        (_, "/analyze" | "/api/comprehensive-file-insights" | "/health") => {
            error_response(405, "Method not allowed", format!("{} {}", request.method, request.path))
        }
        _ => error_response(404, "Not found", request.path),
    }
}

fn health() -> Response {
    let body = serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    });
    Response::json(200, body.to_string().into_bytes())
}

async fn analyze(state: Arc<AppState>, body: &[u8]) -> Response {
    let request: AnalyzeRequest = match serde_json::from_slice(body) {
        Ok(request) => request,
        Err(e) => return error_response(400, "Invalid request body", e.to_string()),
    };
    if request.file_path.trim().is_empty() {
        return error_response(400, "Invalid request body", "filePath must not be empty");
    }

    let path = match resolve_within_root(&state.root, &request.file_path) {
        Ok(path) => path,
        Err(e @ InsightError::PathEscape { .. }) => {
            warn!(file = %request.file_path, "rejected path outside project root");
            return error_response(403, "Forbidden", e.to_string());
        }
        Err(e) => return error_response(500, "Failed to analyze file", e.to_string()),
    };

    let analysis = state.analysis.clone();
    let joined = tokio::task::spawn_blocking(move || analyze_file(&path, &analysis)).await;

    let mut analyzed = match joined {
        Ok(Ok(analyzed)) => analyzed,
        Ok(Err(e)) => {
            debug!(file = %request.file_path, error = %e, "analysis failed");
            return error_response(500, "Failed to analyze file", e.to_string());
        }
        Err(e) => return error_response(500, "Failed to analyze file", e.to_string()),
    };
    // Report the path the way the client named it
    analyzed.insight.file_path = request.file_path;

    match serde_json::to_vec(&analyzed) {
        Ok(bytes) => Response::json(200, bytes),
        Err(e) => error_response(500, "Failed to analyze file", e.to_string()),
    }
}
