//! Merged compilation unit
//!
//! The derived result of merging ordered roots for one scope. Never stored;
//! rebuilt on every invocation.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::domain::entities::UnitKind;
use crate::domain::value_objects::SourceScope;

/// One file selected into a merged unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedFile {
    /// Root as declared (relative to the project when declared that way)
    pub root: PathBuf,
    /// Path relative to its root; the merge key
    pub relative: PathBuf,
    /// Absolute location on disk
    pub path: PathBuf,
}

impl MergedFile {
    /// `root/relative` as the user declared it
    pub fn display_path(&self) -> PathBuf {
        self.root.join(&self.relative)
    }
}

/// A duplicate the strategy dropped or replaced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedDuplicate {
    pub relative: PathBuf,
    pub kept: PathBuf,
    pub dropped: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedUnit {
    pub scope: SourceScope,
    pub kind: UnitKind,
    pub roots: Vec<PathBuf>,
    pub files: BTreeMap<PathBuf, MergedFile>,
    pub dropped: Vec<DroppedDuplicate>,
}

impl MergedUnit {
    pub fn empty(scope: SourceScope, kind: UnitKind) -> Self {
        Self {
            scope,
            kind,
            roots: Vec::new(),
            files: BTreeMap::new(),
            dropped: Vec::new(),
        }
    }

    /// Files sorted by relative path
    pub fn files(&self) -> impl Iterator<Item = &MergedFile> + '_ {
        self.files.values()
    }

    pub fn get(&self, relative: &Path) -> Option<&MergedFile> {
        self.files.get(relative)
    }

    pub fn contains(&self, relative: &Path) -> bool {
        self.files.contains_key(relative)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Files with one of the given extensions (e.g. `java`)
    pub fn files_with_extensions<'a>(
        &'a self,
        extensions: &'a [&'a str],
    ) -> impl Iterator<Item = &'a MergedFile> + 'a {
        self.files.values().filter(move |f| {
            f.relative
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| extensions.contains(&e))
        })
    }
}
