//! Build Event Port
//!
//! Observable interface for build operations.
//! Drives console progress and the NDJSON event stream.

use std::path::PathBuf;

use crate::domain::value_objects::{ClasspathKind, SourceScope};

/// Event emitted during a build
#[derive(Debug, Clone, PartialEq)]
pub enum BuildEvent {
    /// Invocation started
    Started {
        command: String,
        applications: Vec<String>,
    },

    /// Toolchain selected for an application
    ToolchainSelected {
        application: String,
        version: u32,
        home: PathBuf,
    },

    /// A classpath was resolved
    Resolved {
        application: String,
        classpath: ClasspathKind,
        libraries: usize,
    },

    /// Roots merged into one unit
    Merged {
        application: String,
        scope: SourceScope,
        kind: String,
        files: usize,
        dropped: usize,
    },

    /// A duplicate lost to an earlier (or later) root
    DuplicateDropped {
        relative: PathBuf,
        kept: PathBuf,
        dropped: PathBuf,
    },

    /// A target began executing
    TargetStarted { target: String },

    /// A target did not run (up to date, shared or blocked)
    TargetSkipped { target: String, reason: String },

    /// A target finished successfully
    TargetFinished { target: String },

    /// Test phase result
    TestsFinished {
        application: String,
        total: usize,
        failed: usize,
    },

    /// Install image published
    Packaged { application: String, path: PathBuf },

    /// An application could not be built
    ApplicationFailed { application: String, error: String },

    /// Invocation finished
    Completed { succeeded: usize, failed: usize },
}

/// Trait for receiving build events
///
/// Implementations can be:
/// - ConsoleEventSink: progress lines on stderr
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: silent operation
pub trait BuildEventSink: Send + Sync {
    fn on_event(&self, event: BuildEvent);

    /// Whether this sink wants per-target and per-file events
    fn wants_detailed_events(&self) -> bool {
        true
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl BuildEventSink for NoopEventSink {
    fn on_event(&self, _event: BuildEvent) {}

    fn wants_detailed_events(&self) -> bool {
        false
    }
}
