//! File system traversal for scan targets.
//!
//! The walker supplies candidate file paths; reading and scanning them is
//! the caller's concern. Well-known build and dependency directories are
//! pruned, and include/exclude filters use plain substring matching against
//! the full path.

use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Directory names never descended into.
pub const DEFAULT_EXCLUDES: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "build",
    ".next",
    ".venv",
    "__pycache__",
    "target",
];

/// Collect files under `root`, applying substring include/exclude filters.
///
/// A non-empty include list keeps only paths containing at least one of the
/// substrings. Unreadable directories are skipped silently.
pub fn walk_files(root: &Path, include: &[String], exclude: &[String]) -> Vec<PathBuf> {
    let files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| {
            // the root itself is never pruned, only entries below it
            if entry.depth() == 0 {
                return true;
            }
            let path = entry.path().to_string_lossy();
            !DEFAULT_EXCLUDES.iter().any(|ex| path.contains(ex))
                && !exclude.iter().any(|ex| path.contains(ex.as_str()))
        })
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            if include.is_empty() {
                return true;
            }
            let path = entry.path().to_string_lossy();
            include.iter().any(|inc| path.contains(inc.as_str()))
        })
        .map(|entry| entry.into_path())
        .collect();

    debug!("Walker found {} files under {}", files.len(), root.display());
    files
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "content").unwrap();
    }

    #[test]
    fn skips_well_known_directories() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("src/app.js"));
        touch(&dir.path().join("node_modules/lib/index.js"));
        touch(&dir.path().join(".git/config"));

        let files = walk_files(dir.path(), &[], &[]);
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("src/app.js"));
    }

    #[test]
    fn include_filter_is_substring_based() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("src/app.js"));
        touch(&dir.path().join("lib/util.py"));

        let files = walk_files(dir.path(), &["src".to_string()], &[]);
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("src/app.js"));
    }

    #[test]
    fn exclude_filter_prunes_subtrees() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("src/app.js"));
        touch(&dir.path().join("generated/out.js"));

        let files = walk_files(dir.path(), &[], &["generated".to_string()]);
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("src/app.js"));
    }

    #[test]
    fn missing_root_yields_no_files() {
        let files = walk_files(Path::new("/nonexistent/project"), &[], &[]);
        assert!(files.is_empty());
    }
}
