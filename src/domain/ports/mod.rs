//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

mod build_events;
mod compiler;
mod dependency_resolver;
mod root_scanner;
mod toolchain;

pub use build_events::{BuildEvent, BuildEventSink, NoopEventSink};
pub use compiler::{
    ApplicationLauncher, CompileError, CompileRequest, Compiler, Diagnostic, LaunchRequest,
    ProcessError, TestReport, TestRequest, TestRunner,
};
pub use dependency_resolver::{DependencyResolver, Library, ResolveError};
pub use root_scanner::{RootScanner, ScanError};
pub use toolchain::{Toolchain, ToolchainError, ToolchainProvider};
