//! Filesystem root scanner
//!
//! Walks a root with the `ignore` walker, standard filters off: hidden
//! files and files that a `.gitignore` would hide are still part of the
//! unit. Only the descriptor's exclude patterns prune entries.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::domain::ports::{RootScanner, ScanError};
use crate::domain::value_objects::ExcludePatterns;

#[derive(Debug, Clone, Copy, Default)]
pub struct FsRootScanner;

impl FsRootScanner {
    pub fn new() -> Self {
        Self
    }
}

impl RootScanner for FsRootScanner {
    fn scan(&self, root: &Path, excludes: &ExcludePatterns) -> Result<Vec<PathBuf>, ScanError> {
        let metadata = match std::fs::metadata(root) {
            Ok(m) => m,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ScanError::Missing {
                    root: root.to_path_buf(),
                })
            }
            Err(e) => {
                return Err(ScanError::Io {
                    root: root.to_path_buf(),
                    message: e.to_string(),
                })
            }
        };
        if !metadata.is_dir() {
            return Err(ScanError::NotADirectory {
                root: root.to_path_buf(),
            });
        }

        let prune_root = root.to_path_buf();
        let prune = excludes.clone();
        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .hidden(false)
            .follow_links(true)
            .filter_entry(move |entry| {
                let Ok(rel) = entry.path().strip_prefix(&prune_root) else {
                    return true;
                };
                if rel.as_os_str().is_empty() {
                    return true;
                }
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                !prune.is_excluded(rel, is_dir)
            })
            .build();

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| ScanError::Io {
                root: root.to_path_buf(),
                message: e.to_string(),
            })?;
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            if let Ok(rel) = entry.path().strip_prefix(root) {
                files.push(rel.to_path_buf());
            }
        }
        files.sort();

        tracing::trace!(root = %root.display(), files = files.len(), "scanned root");
        Ok(files)
    }
}
