use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort an analysis. Shape mismatches inside a file are not
/// errors; they surface as [`crate::types::InsightWarning`]s.
#[derive(Debug, Error)]
pub enum InsightError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {} ({line}:{column}): {message}", .path.display())]
    Parse {
        path: PathBuf,
        message: String,
        line: usize,
        column: usize,
    },

    #[error("'{requested}' resolves outside project root {}", .root.display())]
    PathEscape { requested: String, root: PathBuf },

    #[error("invalid config {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },
}

impl InsightError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
