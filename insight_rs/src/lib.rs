//! # insight
//!
//! **Static source insight extraction** for JSX and TypeScript files.
//!
//! One call parses one file with the OXC parser and returns a [`FileInsight`]:
//! the components it declares, the hooks and state those components use, the
//! props passed to child components, top-level functions, imports, exports and
//! the relative files the source refers to.
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,no_run
//! use insight::{analyze_source, AnalysisConfig};
//! use std::path::Path;
//!
//! let source = r#"
//!     import { useState } from 'react';
//!     const Counter = () => {
//!         const [count, setCount] = useState(0);
//!         return <Display value={count} />;
//!     };
//! "#;
//! let insight = analyze_source(source, Path::new("src/Counter.jsx"), &AnalysisConfig::default())
//!     .expect("valid source");
//! assert_eq!(insight.state_variables["count"].setter_name, "setCount");
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! insight src/components/Counter.jsx --pretty
//! ```
//!
//! The HTTP surface lives in the `insight-server` crate.

// ============================================================================
// Core Modules
// ============================================================================

/// JSX/TypeScript analyzer built on OXC.
///
/// # Submodules
///
/// - [`analyzer::value`] - literal value rendering
/// - [`analyzer::references`] - raw-text relative import resolution
pub mod analyzer;

/// Configuration file support (`.insight/config.toml`).
pub mod config;

/// Error taxonomy shared by the library and its binaries.
pub mod error;

/// Path helpers: lexical normalization and project-root containment.
pub mod fs_utils;

/// Serializable report types.
pub mod types;

pub use analyzer::{analyze_file, analyze_source};
pub use config::{AnalysisConfig, InsightConfig, ServerConfig};
pub use error::InsightError;
pub use types::{AnalyzedFile, FileInsight};
