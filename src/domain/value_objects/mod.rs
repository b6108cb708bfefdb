//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod cancellation;
mod config_warning;
mod coordinate;
mod duplicates;
mod entry_point;
mod exclude_patterns;
mod hash;
mod language_version;
mod scope;

pub use cancellation::CancellationToken;
pub use config_warning::ConfigWarning;
pub use coordinate::{Coordinate, CoordinateParseError};
pub use duplicates::{DuplicateDecision, DuplicatesPolicy, DuplicatesStrategy};
pub use entry_point::{EntryPoint, EntryPointParseError};
pub use exclude_patterns::{ExcludeError, ExcludePatterns};
pub use hash::{ContentHash, Fingerprint};
pub use language_version::LanguageVersion;
pub use scope::{ClasspathKind, DependencyScope, SourceScope};
