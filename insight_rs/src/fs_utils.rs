//! Path helpers.

use std::path::{Component, Path, PathBuf};

use crate::error::InsightError;

/// Fold `.` and `..` components without touching the filesystem.
///
/// `..` at the root stays at the root, the same way `path.resolve('/..')`
/// behaves.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let at_root = matches!(
                    out.components().next_back(),
                    None | Some(Component::RootDir) | Some(Component::Prefix(_))
                );
                if !at_root {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Absolute, lexically normalized form of `path`, using the process working
/// directory for relative input.
pub fn absolutize(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    normalize_lexically(&absolute)
}

/// Resolve a client-supplied path against `root` and make sure the target
/// stays inside it after symlinks are followed.
///
/// `root` must already be canonical.
pub fn resolve_within_root(root: &Path, requested: &str) -> Result<PathBuf, InsightError> {
    let requested_path = Path::new(requested);
    let joined = if requested_path.is_absolute() {
        requested_path.to_path_buf()
    } else {
        root.join(requested_path)
    };

    // Reject lexical escapes before hitting the filesystem so a missing file
    // outside the root is still reported as an escape.
    if !normalize_lexically(&joined).starts_with(root) {
        return Err(InsightError::PathEscape {
            requested: requested.to_string(),
            root: root.to_path_buf(),
        });
    }

    let canonical = joined
        .canonicalize()
        .map_err(|e| InsightError::io(&joined, e))?;
    if !canonical.starts_with(root) {
        return Err(InsightError::PathEscape {
            requested: requested.to_string(),
            root: root.to_path_buf(),
        });
    }
    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_normalize_folds_dots() {
        assert_eq!(
            normalize_lexically(Path::new("/app/src/./components/../lib/util")),
            PathBuf::from("/app/src/lib/util")
        );
        assert_eq!(
            normalize_lexically(Path::new("/../etc")),
            PathBuf::from("/etc")
        );
    }

    #[test]
    fn test_absolutize_relative_uses_cwd() {
        let cwd = std::env::current_dir().expect("cwd");
        assert_eq!(absolutize(Path::new("./a/../b.ts")), cwd.join("b.ts"));
    }

    #[test]
    fn test_resolve_within_root_accepts_nested_file() {
        let temp = TempDir::new().expect("temp dir");
        let root = temp.path().canonicalize().expect("canonical root");
        std::fs::create_dir_all(root.join("src")).expect("mkdir");
        std::fs::write(root.join("src/App.tsx"), "export {};").expect("write");

        let resolved = resolve_within_root(&root, "src/App.tsx").expect("inside root");
        assert_eq!(resolved, root.join("src/App.tsx"));
    }

    #[test]
    fn test_resolve_within_root_rejects_traversal() {
        let temp = TempDir::new().expect("temp dir");
        let root = temp.path().join("project");
        std::fs::create_dir_all(&root).expect("mkdir");
        std::fs::write(temp.path().join("secret.txt"), "nope").expect("write");
        let root = root.canonicalize().expect("canonical root");

        let err = resolve_within_root(&root, "../secret.txt").unwrap_err();
        assert!(matches!(err, InsightError::PathEscape { .. }));

        let outside = temp.path().join("secret.txt");
        let err = resolve_within_root(&root, outside.to_str().expect("utf8")).unwrap_err();
        assert!(matches!(err, InsightError::PathEscape { .. }));
    }

    #[test]
    fn test_resolve_within_root_missing_file_is_io() {
        let temp = TempDir::new().expect("temp dir");
        let root = temp.path().canonicalize().expect("canonical root");
        let err = resolve_within_root(&root, "missing.tsx").unwrap_err();
        assert!(matches!(err, InsightError::Io { .. }));
    }
}
