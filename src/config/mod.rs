//! Configuration module for skein
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (SKEIN_*)
//! 3. Project file (skein.toml)
//! 4. Built-in defaults (lowest priority)

mod loader;
#[cfg(test)]
mod tests;
mod types;

pub use crate::domain::value_objects::ConfigWarning;

pub use loader::{
    discover, find_project_file, load, parse, with_env_overrides, with_env_overrides_from,
    ConfigError, ProjectConfig, PROJECT_FILE,
};
pub use types::{
    ApplicationEntry, BuildSection, DependencyEntry, ProjectFile, ProjectSection,
    RepositorySection, Settings, SourceSetSection, SourceSetsSection, TestSection,
    ToolchainSection,
};
