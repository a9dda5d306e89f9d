//! Project traversal.
//!
//! Walks every regular file below the project root and reports it relative to
//! that root. A symlink counts as a file when it points at a regular file;
//! linked directories are not descended. Traversal order is whatever the
//! filesystem yields and must not be relied upon.

use std::collections::HashSet;

use camino::{Utf8Path, Utf8PathBuf};
use walkdir::WalkDir;

use crate::error::ScanError;

/// Extension allow-list.
///
/// An empty filter accepts every file. The empty string matches files that
/// have no extension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionFilter {
    allowed: HashSet<String>,
}

impl ExtensionFilter {
    /// Add extensions (without the leading dot) to the allow-list.
    pub fn extend<I, S>(&mut self, extensions: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed.extend(extensions.into_iter().map(Into::into));
    }

    /// Returns `true` if no extension was registered.
    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }

    /// Whether a file should be scanned.
    pub fn accepts(&self, path: &Utf8Path) -> bool {
        self.is_empty() || self.allowed.contains(file_extension(path))
    }
}

impl<S: Into<String>> FromIterator<S> for ExtensionFilter {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut filter = Self::default();
        filter.extend(iter);
        filter
    }
}

/// Text after the last `.` of the file name.
///
/// Names without a dot, or ending with one, have the empty extension.
/// Dotfiles such as `.gitignore` report `gitignore`.
pub fn file_extension(path: &Utf8Path) -> &str {
    let Some(name) = path.file_name() else {
        return "";
    };
    match name.rfind('.') {
        Some(idx) if idx + 1 < name.len() => &name[idx + 1..],
        _ => "",
    }
}

/// Collect root-relative paths of all regular files under `root`.
///
/// Fails fast on the first traversal error, including a missing root.
pub fn project_files(root: &Utf8Path) -> Result<Vec<Utf8PathBuf>, ScanError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|source| ScanError::Walk {
            root: absolute(root),
            source,
        })?;
        if !is_regular_file(&entry) {
            continue;
        }
        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let relative = Utf8Path::from_path(relative).ok_or_else(|| ScanError::NonUtf8Path {
            path: entry.path().to_path_buf(),
        })?;
        files.push(relative.to_path_buf());
    }
    Ok(files)
}

/// Regular files, and symlinks resolving to one. Dangling links are skipped.
fn is_regular_file(entry: &walkdir::DirEntry) -> bool {
    let file_type = entry.file_type();
    if file_type.is_symlink() {
        return std::fs::metadata(entry.path()).is_ok_and(|meta| meta.is_file());
    }
    file_type.is_file()
}

/// Best-effort absolute form of `path` for error messages.
pub(crate) fn absolute(path: &Utf8Path) -> Utf8PathBuf {
    std::path::absolute(path)
        .ok()
        .and_then(|p| Utf8PathBuf::from_path_buf(p).ok())
        .unwrap_or_else(|| path.to_path_buf())
}
