//! Raw-text relative import scan.
//!
//! Runs over the source text, not the AST, so it also matches `from '...'`
//! inside comments and strings. Treat the result as best-effort: it can
//! disagree with [`FileInsight::imports`](crate::types::FileInsight::imports)
//! in both directions. Nothing here touches the filesystem; resolution is
//! purely lexical and no extension probing happens.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use crate::fs_utils::{absolutize, normalize_lexically};

fn regex_from_specifier() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"\bfrom\s*['"]([^'"]+)['"]"#).expect("valid regex literal"))
}

/// Absolute paths of every relative `from '...'` specifier in `source`,
/// resolved against the directory of `file_path`. Duplicates are kept.
pub fn resolve_file_references(source: &str, file_path: &Path) -> Vec<String> {
    let base_dir = absolutize(file_path)
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("/"));

    regex_from_specifier()
        .captures_iter(source)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|specifier| specifier.starts_with('.'))
        .map(|specifier| {
            normalize_lexically(&base_dir.join(specifier))
                .to_string_lossy()
                .into_owned()
        })
        .collect()
}
