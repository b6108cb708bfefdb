//! Error types for skein
//!
//! Each port and service has its own focused error; `SkeinError` wraps them
//! all and maps them to the process exit code.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::entities::{DependencyTableError, RegistryError};
use crate::domain::ports::{CompileError, ProcessError, ResolveError, ToolchainError};
use crate::domain::services::{EntryPointError, GraphError, MergeError, PlanError};
use crate::domain::value_objects::ExcludeError;
use crate::infrastructure::fs::LockError;

/// Result type alias for skein operations
pub type SkeinResult<T> = Result<T, SkeinError>;

/// Main error type for skein operations
#[derive(Error, Debug)]
pub enum SkeinError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    DependencyTable(#[from] DependencyTableError),

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error(transparent)]
    EntryPoint(#[from] EntryPointError),

    #[error(transparent)]
    Exclude(#[from] ExcludeError),

    #[error(transparent)]
    Toolchain(#[from] ToolchainError),

    #[error(transparent)]
    Resolution(#[from] ResolveError),

    #[error(transparent)]
    Merge(#[from] MergeError),

    /// Compiler diagnostics; `From<CompileError>` routes cancellation elsewhere
    #[error("{}", render_compile(.0))]
    Compilation(CompileError),

    #[error("tests failed for '{application}': {failed} of {total} failed")]
    TestFailure {
        application: String,
        failed: usize,
        total: usize,
    },

    #[error(transparent)]
    Process(ProcessError),

    #[error(transparent)]
    Locked(#[from] LockError),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `skein check` found errors; `category` is that of the first one
    #[error("{failed} of {total} checks failed")]
    Check {
        failed: usize,
        total: usize,
        category: &'static str,
    },

    #[error("build cancelled")]
    Cancelled,
}

fn render_compile(err: &CompileError) -> String {
    match err {
        CompileError::Failed { diagnostics, .. } if !diagnostics.is_empty() => {
            let mut out = err.to_string();
            for d in diagnostics {
                out.push_str("\n  ");
                out.push_str(&d.to_string());
            }
            out
        }
        _ => err.to_string(),
    }
}

impl From<ProcessError> for SkeinError {
    fn from(err: ProcessError) -> Self {
        match err {
            ProcessError::Cancelled { .. } => SkeinError::Cancelled,
            other => SkeinError::Process(other),
        }
    }
}

impl From<GraphError> for SkeinError {
    fn from(err: GraphError) -> Self {
        SkeinError::Plan(err.into())
    }
}

impl From<CompileError> for SkeinError {
    fn from(err: CompileError) -> Self {
        match err {
            CompileError::Process(process) => process.into(),
            failed => SkeinError::Compilation(failed),
        }
    }
}

impl SkeinError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SkeinError::Io {
            path: path.into(),
            source,
        }
    }

    /// Stable category name used in JSON error events
    pub fn category(&self) -> &'static str {
        match self {
            SkeinError::Config(_)
            | SkeinError::Registry(_)
            | SkeinError::DependencyTable(_)
            | SkeinError::Plan(_)
            | SkeinError::EntryPoint(_)
            | SkeinError::Exclude(_) => "configuration",
            SkeinError::Toolchain(_) => "toolchain",
            SkeinError::Resolution(_) => "resolution",
            SkeinError::Merge(_) => "merge",
            SkeinError::Compilation(_) => "compilation",
            SkeinError::TestFailure { .. } => "test",
            SkeinError::Process(_) => "process",
            SkeinError::Locked(LockError::Held { .. }) => "locked",
            SkeinError::Locked(_) | SkeinError::Io { .. } => "io",
            SkeinError::Check { category, .. } => *category,
            SkeinError::Cancelled => "cancelled",
        }
    }

    pub fn exit_code(&self) -> i32 {
        exit_code_for(self.category())
    }
}

/// Process exit code of an error category
pub fn exit_code_for(category: &str) -> i32 {
    match category {
        "configuration" => 2,
        "resolution" => 3,
        "compilation" => 4,
        "test" => 5,
        "toolchain" => 6,
        "merge" => 7,
        "locked" => 8,
        "cancelled" => 130,
        _ => 1,
    }
}
