//! Build Module
//!
//! Drives planning and evaluation of the target graph.
//!
//! ## Structure
//!
//! - `options` - What to build and where (`BuildOptions`, `BuildMode`)
//! - `result` - Per-application outcomes (`BuildReport`)
//! - `manifest` - `launch.toml` of an install image
//! - `use_case` - Target evaluation (`BuildUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use skein::application::build::{BuildOptions, BuildPorts, BuildUseCase};
//!
//! let use_case = BuildUseCase::new(ports).with_events(sink);
//! let report = use_case.execute(&project, &BuildOptions::new("build"))?;
//! ```

mod manifest;
mod options;
mod result;
mod use_case;

pub use manifest::{LaunchManifest, MANIFEST_FILE};
pub use options::{BuildMode, BuildOptions};
pub use result::{ApplicationOutcome, ApplicationStatus, BuildReport, TargetFailure, TestSummary};
pub use use_case::{BuildPorts, BuildUseCase};
