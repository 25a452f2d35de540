//! Candidate file discovery under a root directory.
//!
//! Include patterns match file names; exclude patterns match bare directory
//! names at any depth and prune the whole subtree. Entries are visited in
//! file-name order so repeated runs see the same sequence.

use crate::error::{Result, SetupError};
use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Directory names pruned when no exclude list is configured.
pub const DEFAULT_EXCLUDES: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    ".bzr",
    "_darcs",
    "CVS",
    "build",
    "cmake-build-*",
    "target",
    "node_modules",
    "__pycache__",
    ".venv",
    "venv",
];

#[derive(Debug, Clone)]
/// Compiled include/exclude filter.
pub struct FileFilter {
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
    follow_symlinks: bool,
}

fn compile(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| {
            Pattern::new(p).map_err(|e| SetupError::InvalidPattern {
                pattern: p.clone(),
                reason: e.msg.to_string(),
            })
        })
        .collect()
}

impl FileFilter {
    pub fn new(include: &[String], exclude: &[String], follow_symlinks: bool) -> Result<Self> {
        Ok(FileFilter {
            include: compile(include)?,
            exclude: compile(exclude)?,
            follow_symlinks,
        })
    }

    /// A file is a candidate when no include pattern is set or one matches its name.
    pub fn accepts_file(&self, name: &str) -> bool {
        self.include.is_empty() || self.include.iter().any(|p| p.matches(name))
    }

    /// True when a directory with this bare name must not be descended into.
    pub fn prunes_dir(&self, name: &str) -> bool {
        self.exclude.iter().any(|p| p.matches(name))
    }
}

fn is_pruned(entry: &DirEntry, filter: &FileFilter) -> bool {
    // The root is always walked, whatever its name.
    entry.depth() > 0
        && entry.file_type().is_dir()
        && filter.prunes_dir(&entry.file_name().to_string_lossy())
}

fn is_candidate(entry: &DirEntry, filter: &FileFilter) -> bool {
    let ft = entry.file_type();
    let file_like = if ft.is_symlink() {
        // Unfollowed symlinks count unless they lead to a directory; dangling
        // ones are kept so reading them reports the failure.
        !entry.path().is_dir()
    } else {
        ft.is_file()
    };
    file_like && filter.accepts_file(&entry.file_name().to_string_lossy())
}

/// A walk error on a non-directory path (e.g. a dangling followed symlink)
/// still names a file that must be reported as unreadable.
fn unreadable_candidate(err: &walkdir::Error, filter: &FileFilter) -> Option<PathBuf> {
    if err.loop_ancestor().is_some() {
        return None;
    }
    let path = err.path()?;
    if path.is_dir() {
        return None;
    }
    let name = path.file_name()?.to_string_lossy();
    filter.accepts_file(&name).then(|| path.to_path_buf())
}

/// Collect every candidate file below `root`, sorted by walk order.
///
/// Directories that cannot be read and symlink loops are logged and skipped.
/// Broken file links are returned so the scan reports them as read failures.
pub fn collect_files(root: &Path, filter: &FileFilter) -> Vec<PathBuf> {
    let walker = WalkDir::new(root)
        .follow_links(filter.follow_symlinks)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_pruned(e, filter));

    let mut files = Vec::new();
    for next in walker {
        match next {
            Ok(entry) => {
                if is_candidate(&entry, filter) {
                    files.push(entry.into_path());
                }
            }
            Err(err) => match unreadable_candidate(&err, filter) {
                Some(path) => {
                    tracing::warn!(error = %err, "unreadable entry kept as candidate");
                    files.push(path);
                }
                None => tracing::warn!(error = %err, "skipping unreadable entry"),
            },
        }
    }
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn defaults() -> Vec<String> {
        DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect()
    }

    fn names(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|p| {
                p.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_include_matches_file_names_only() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src/cpp")).unwrap();
        fs::write(root.join("src/a.hpp"), "").unwrap();
        fs::write(root.join("src/cpp/b.cpp"), "").unwrap();
        fs::write(root.join("README.md"), "").unwrap();
        let filter =
            FileFilter::new(&["*.hpp".into(), "*.cpp".into()], &defaults(), false).unwrap();
        let got = names(root, &collect_files(root, &filter));
        assert_eq!(got, vec!["src/a.hpp", "src/cpp/b.cpp"]);
    }

    #[test]
    fn test_empty_include_accepts_everything() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("b.txt"), "").unwrap();
        fs::write(root.join("a.hpp"), "").unwrap();
        let filter = FileFilter::new(&[], &[], false).unwrap();
        assert_eq!(names(root, &collect_files(root, &filter)), vec!["a.hpp", "b.txt"]);
    }

    #[test]
    fn test_excluded_directory_names_are_pruned_at_any_depth() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("build")).unwrap();
        fs::create_dir_all(root.join("lib/build/deep")).unwrap();
        fs::create_dir_all(root.join("lib/cmake-build-debug")).unwrap();
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::write(root.join("build/x.hpp"), "").unwrap();
        fs::write(root.join("lib/build/deep/y.hpp"), "").unwrap();
        fs::write(root.join("lib/cmake-build-debug/z.hpp"), "").unwrap();
        fs::write(root.join(".git/HEAD"), "").unwrap();
        fs::write(root.join("lib/keep.hpp"), "").unwrap();
        let filter = FileFilter::new(&[], &defaults(), false).unwrap();
        assert_eq!(names(root, &collect_files(root, &filter)), vec!["lib/keep.hpp"]);
    }

    #[test]
    fn test_exclude_does_not_match_file_names_or_full_paths() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(root.join("src/build"), "").unwrap();
        let filter = FileFilter::new(&[], &["src/*".into(), "build".into()], false).unwrap();
        assert_eq!(names(root, &collect_files(root, &filter)), vec!["src/build"]);
    }

    #[test]
    fn test_root_is_walked_even_if_its_name_is_excluded() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("build");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("a.hpp"), "").unwrap();
        let filter = FileFilter::new(&[], &defaults(), false).unwrap();
        assert_eq!(collect_files(&root, &filter).len(), 1);
    }

    #[test]
    fn test_invalid_pattern_is_a_setup_error() {
        let err = FileFilter::new(&["[".into()], &[], false).unwrap_err();
        assert!(matches!(err, SetupError::InvalidPattern { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directories_follow_flag() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("root");
        let outside = dir.path().join("outside");
        fs::create_dir_all(&root).unwrap();
        fs::create_dir_all(&outside).unwrap();
        fs::write(outside.join("o.hpp"), "").unwrap();
        fs::write(root.join("r.hpp"), "").unwrap();
        std::os::unix::fs::symlink(&outside, root.join("link")).unwrap();

        let nofollow = FileFilter::new(&[], &[], false).unwrap();
        assert_eq!(names(&root, &collect_files(&root, &nofollow)), vec!["r.hpp"]);

        let follow = FileFilter::new(&[], &[], true).unwrap();
        assert_eq!(
            names(&root, &collect_files(&root, &follow)),
            vec!["link/o.hpp", "r.hpp"]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_is_kept_with_and_without_follow() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        std::os::unix::fs::symlink(root.join("nowhere.hpp"), root.join("dangling.hpp")).unwrap();
        std::os::unix::fs::symlink(root.join("nowhere.txt"), root.join("dangling.txt")).unwrap();
        for follow in [false, true] {
            let filter = FileFilter::new(&["*.hpp".into()], &[], follow).unwrap();
            assert_eq!(names(root, &collect_files(root, &filter)), vec!["dangling.hpp"]);
        }
    }
}
