//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `BuildUseCase` - Plans and evaluates the target graph (build, test, run)
//! - `CheckUseCase` - Validates roots, entry points, toolchains and declarations
//! - `inspect` - Read-only queries behind `list`, `deps` and `sources`

pub mod build;
pub mod check;
pub mod inspect;

pub use build::{
    ApplicationOutcome, ApplicationStatus, BuildMode, BuildOptions, BuildPorts, BuildReport,
    BuildUseCase, LaunchManifest,
};
pub use check::{CheckItem, CheckOptions, CheckResult, CheckStatus, CheckUseCase};
pub use inspect::{ApplicationSummary, DependencyRow, MergedSources};
