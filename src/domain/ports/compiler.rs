//! Compiler, TestRunner and ApplicationLauncher ports
//!
//! The three external processes a build drives. All of them observe the
//! build's `CancellationToken` and stop their child when it fires.

use std::fmt;
use std::path::PathBuf;

use crate::domain::ports::Toolchain;
use crate::domain::value_objects::{CancellationToken, EntryPoint, LanguageVersion};

#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("failed to start {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} was cancelled")]
    Cancelled { tool: String },

    #[error("{tool}: {message}")]
    Io { tool: String, message: String },
}

/// A single compiler diagnostic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub file: PathBuf,
    pub line: Option<u32>,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}: {}", self.file.display(), line, self.message),
            None => write!(f, "{}: {}", self.file.display(), self.message),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("compilation failed with {} error(s)", diagnostics.len().max(1))]
    Failed {
        diagnostics: Vec<Diagnostic>,
        output: String,
    },

    #[error(transparent)]
    Process(#[from] ProcessError),
}

#[derive(Debug, Clone)]
pub struct CompileRequest {
    pub toolchain: Toolchain,
    pub release: LanguageVersion,
    /// Absolute source files, sorted by relative path
    pub sources: Vec<PathBuf>,
    pub classpath: Vec<PathBuf>,
    pub output_dir: PathBuf,
}

pub trait Compiler: Send + Sync {
    /// Extensions of the source files this compiler turns into classes
    fn source_extensions(&self) -> &[&'static str] {
        &["java"]
    }

    fn compile(&self, request: &CompileRequest, cancel: &CancellationToken)
        -> Result<(), CompileError>;
}

#[derive(Debug, Clone)]
pub struct TestRequest {
    pub toolchain: Toolchain,
    /// Runtime classpath: test classes first, then main classes and libraries
    pub classpath: Vec<PathBuf>,
    /// Directory holding the compiled test classes to scan
    pub test_classes: PathBuf,
    pub jvm_args: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestReport {
    pub total: usize,
    pub failed: usize,
    pub output: String,
}

impl TestReport {
    pub fn passed(&self) -> bool {
        self.failed == 0
    }
}

pub trait TestRunner: Send + Sync {
    fn run(&self, request: &TestRequest, cancel: &CancellationToken)
        -> Result<TestReport, ProcessError>;
}

#[derive(Debug, Clone)]
pub struct LaunchRequest {
    pub toolchain: Toolchain,
    pub classpath: Vec<PathBuf>,
    pub entry_point: EntryPoint,
    pub jvm_args: Vec<String>,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
}

pub trait ApplicationLauncher: Send + Sync {
    /// Run the application with inherited stdio, returning its exit status
    fn launch(&self, request: &LaunchRequest, cancel: &CancellationToken)
        -> Result<i32, ProcessError>;
}
