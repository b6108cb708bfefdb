//! Entry point verification: the declared main class must map to exactly
//! one source file of the merged main unit.

use std::path::{Path, PathBuf};

use crate::domain::entities::MergedUnit;
use crate::domain::value_objects::EntryPoint;

/// Source extensions a JVM entry point may be declared in
pub const JVM_SOURCE_EXTENSIONS: [&str; 3] = ["java", "kt", "groovy"];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EntryPointError {
    #[error("entry point {entry_point} of '{application}' not found in merged sources (expected {})", expected.display())]
    NotFound {
        application: String,
        entry_point: EntryPoint,
        expected: PathBuf,
    },

    #[error("entry point {entry_point} of '{application}' is ambiguous: {}", candidates.iter().map(|c| c.display().to_string()).collect::<Vec<_>>().join(", "))]
    Ambiguous {
        application: String,
        entry_point: EntryPoint,
        candidates: Vec<PathBuf>,
    },

    #[error("entry point {entry_point} of '{application}' is declared in {}, which is never compiled (compiled: {})", path.display(), compiled.join(", "))]
    NotCompiled {
        application: String,
        entry_point: EntryPoint,
        path: PathBuf,
        compiled: Vec<String>,
    },
}

/// Returns the declared path (`root/relative`) of the entry point's source.
///
/// Sources in any JVM language count toward ambiguity, but the single match
/// must have one of the `compiled` extensions.
pub fn verify_entry_point(
    application: &str,
    entry_point: &EntryPoint,
    unit: &MergedUnit,
    compiled: &[&str],
) -> Result<PathBuf, EntryPointError> {
    let extensions: Vec<String> = JVM_SOURCE_EXTENSIONS.iter().map(|e| e.to_string()).collect();
    let candidates = entry_point.source_candidates(&extensions);

    let found: Vec<PathBuf> = candidates
        .iter()
        .filter_map(|c| unit.get(c))
        .map(|f| f.display_path())
        .collect();

    match found.as_slice() {
        [only] if has_extension(only, compiled) => Ok(only.clone()),
        [only] => Err(EntryPointError::NotCompiled {
            application: application.to_string(),
            entry_point: entry_point.clone(),
            path: only.clone(),
            compiled: compiled.iter().map(|e| e.to_string()).collect(),
        }),
        [] => Err(EntryPointError::NotFound {
            application: application.to_string(),
            entry_point: entry_point.clone(),
            expected: candidates.into_iter().next().unwrap_or_default(),
        }),
        _ => Err(EntryPointError::Ambiguous {
            application: application.to_string(),
            entry_point: entry_point.clone(),
            candidates: found.clone(),
        }),
    }
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| extensions.contains(&e))
}
