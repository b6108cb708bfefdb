//! skein - build descriptor resolver for multi-application JVM projects
//!
//! One project declares its dependencies once, merges source roots that
//! live in several physical directories into logical main/test units, and
//! builds any number of runnable applications from that shared tree. Each
//! application compiles only against the dependencies it names, and work
//! that two applications share is done once.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod telemetry;
pub mod ui;

// Re-exports for convenience
pub use application::{BuildMode, BuildOptions, BuildPorts, BuildReport, BuildUseCase};
pub use config::{discover, load, ProjectConfig, Settings};
pub use domain::entities::Project;
pub use domain::value_objects::{CancellationToken, DuplicatesStrategy};
pub use error::{SkeinError, SkeinResult};
