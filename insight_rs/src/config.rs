//! Configuration file support for insight.
//!
//! Loads optional `.insight/config.toml` from the project root.

use serde::Deserialize;
use std::path::Path;
use tracing::warn;

use crate::error::InsightError;

/// Root configuration structure
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    pub analysis: AnalysisConfig,
    pub server: ServerConfig,
}

/// Naming conventions the analyzer keys on.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Identifier prefix that marks a call as a hook.
    pub hook_prefix: String,
    /// Hook whose `[value, setter]` destructuring is recorded as state.
    pub state_hook: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            hook_prefix: "use".to_string(),
            state_hook: "useState".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    /// Requests with a larger body are rejected with 413.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:4477".to_string(),
            max_body_bytes: 64 * 1024,
        }
    }
}

impl InsightConfig {
    /// Load config from `.insight/config.toml` in the given root directory.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(".insight").join("config.toml");
        Self::load_from_path(&config_path)
    }

    /// Load config from a specific path, falling back to defaults.
    pub fn load_from_path(path: &Path) -> Self {
        match Self::try_load_from_path(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("{e}; using defaults");
                Self::default()
            }
        }
    }

    /// Strict variant of [`InsightConfig::load_from_path`]. A missing file is
    /// not an error.
    pub fn try_load_from_path(path: &Path) -> Result<Self, InsightError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| InsightError::io(path, e))?;
        toml::from_str(&content).map_err(|e| InsightError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
