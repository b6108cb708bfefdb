//! Source-set merger
//!
//! Merges ordered physical roots into one logical unit per scope:
//! - Non-overlapping relative paths: all are kept
//! - Same relative path: the duplicates policy decides
//!
//! Earlier roots take precedence. The result is keyed by relative path so
//! iteration order never depends on filesystem order.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::domain::entities::{DroppedDuplicate, MergedFile, MergedUnit, UnitKind};
use crate::domain::ports::{RootScanner, ScanError};
use crate::domain::value_objects::{
    DuplicateDecision, DuplicatesPolicy, ExcludePatterns, SourceScope,
};

/// Files found below one root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootListing {
    /// Root as declared
    pub root: PathBuf,
    /// Absolute location of the root
    pub base: PathBuf,
    /// Files relative to `base`
    pub files: Vec<PathBuf>,
}

impl RootListing {
    pub fn new(root: impl Into<PathBuf>, base: impl Into<PathBuf>, files: Vec<PathBuf>) -> Self {
        Self {
            root: root.into(),
            base: base.into(),
            files,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MergeError {
    #[error("missing {scope} root: {}", root.display())]
    MissingRoot { root: PathBuf, scope: SourceScope },

    #[error("{} is not a directory", root.display())]
    NotADirectory { root: PathBuf },

    #[error("duplicate {}: {} conflicts with {}", relative.display(), first.display(), second.display())]
    Conflict {
        relative: PathBuf,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("failed to scan {}: {message}", root.display())]
    Scan { root: PathBuf, message: String },
}

/// Pure merge over already-listed roots.
pub fn merge_listings(
    scope: SourceScope,
    kind: UnitKind,
    listings: &[RootListing],
    policy: &dyn DuplicatesPolicy,
) -> Result<MergedUnit, MergeError> {
    let mut files: BTreeMap<PathBuf, MergedFile> = BTreeMap::new();
    let mut dropped = Vec::new();

    for listing in listings {
        let mut relatives: Vec<&PathBuf> = listing.files.iter().collect();
        relatives.sort();

        for relative in relatives {
            let incoming = MergedFile {
                root: listing.root.clone(),
                relative: relative.clone(),
                path: listing.base.join(relative),
            };

            let Some(existing) = files.get(relative) else {
                files.insert(relative.clone(), incoming);
                continue;
            };

            match policy.decide(relative, &existing.root, &incoming.root) {
                DuplicateDecision::KeepExisting => {
                    dropped.push(DroppedDuplicate {
                        relative: relative.clone(),
                        kept: existing.display_path(),
                        dropped: incoming.display_path(),
                    });
                }
                DuplicateDecision::KeepExistingWithWarning => {
                    tracing::warn!(
                        kept = %existing.display_path().display(),
                        dropped = %incoming.display_path().display(),
                        "duplicate {} in {} {}",
                        relative.display(),
                        scope,
                        kind.as_str()
                    );
                    dropped.push(DroppedDuplicate {
                        relative: relative.clone(),
                        kept: existing.display_path(),
                        dropped: incoming.display_path(),
                    });
                }
                DuplicateDecision::Replace => {
                    dropped.push(DroppedDuplicate {
                        relative: relative.clone(),
                        kept: incoming.display_path(),
                        dropped: existing.display_path(),
                    });
                    files.insert(relative.clone(), incoming);
                }
                DuplicateDecision::Reject => {
                    return Err(MergeError::Conflict {
                        relative: relative.clone(),
                        first: existing.display_path(),
                        second: incoming.display_path(),
                    });
                }
            }
        }
    }

    Ok(MergedUnit {
        scope,
        kind,
        roots: listings.iter().map(|l| l.root.clone()).collect(),
        files,
        dropped,
    })
}

/// Merges roots read through a `RootScanner`.
pub struct SourceSetMerger<'a> {
    scanner: &'a dyn RootScanner,
    policy: &'a dyn DuplicatesPolicy,
}

impl<'a> SourceSetMerger<'a> {
    pub fn new(scanner: &'a dyn RootScanner, policy: &'a dyn DuplicatesPolicy) -> Self {
        Self { scanner, policy }
    }

    /// Merge `roots` (relative roots resolve against `base_dir`).
    pub fn merge(
        &self,
        scope: SourceScope,
        kind: UnitKind,
        base_dir: &Path,
        roots: &[PathBuf],
        excludes: &ExcludePatterns,
    ) -> Result<MergedUnit, MergeError> {
        let mut listings = Vec::with_capacity(roots.len());
        for root in roots {
            let base = if root.is_absolute() {
                root.clone()
            } else {
                base_dir.join(root)
            };
            let files = self.scanner.scan(&base, excludes).map_err(|e| match e {
                ScanError::Missing { .. } => MergeError::MissingRoot {
                    root: root.clone(),
                    scope,
                },
                ScanError::NotADirectory { .. } => MergeError::NotADirectory { root: root.clone() },
                ScanError::Io { message, .. } => MergeError::Scan {
                    root: root.clone(),
                    message,
                },
            })?;
            listings.push(RootListing::new(root.clone(), base, files));
        }

        let unit = merge_listings(scope, kind, &listings, self.policy)?;
        tracing::debug!(
            scope = %scope,
            kind = kind.as_str(),
            policy = self.policy.name(),
            files = unit.len(),
            dropped = unit.dropped.len(),
            "merged {} root(s)",
            roots.len()
        );
        Ok(unit)
    }
}
