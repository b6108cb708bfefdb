//! RootScanner port - lists the files below a source or resource root

use std::path::{Path, PathBuf};

use crate::domain::value_objects::ExcludePatterns;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ScanError {
    #[error("root does not exist: {}", root.display())]
    Missing { root: PathBuf },

    #[error("root is not a directory: {}", root.display())]
    NotADirectory { root: PathBuf },

    #[error("failed to scan {}: {message}", root.display())]
    Io { root: PathBuf, message: String },
}

/// Lists regular files below a root, as paths relative to it.
///
/// Implementations must skip entries matched by `excludes` (checked with
/// the path relative to the root) and must not apply any other filter.
/// Order of the returned paths is unspecified; the merger sorts them.
pub trait RootScanner: Send + Sync {
    fn scan(&self, root: &Path, excludes: &ExcludePatterns) -> Result<Vec<PathBuf>, ScanError>;
}
