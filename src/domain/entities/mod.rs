//! Domain Entities
//!
//! Core business objects of a multi-application build.

mod dependency_table;
mod descriptor;
mod descriptor_registry;
mod merged_unit;
mod project;

pub use dependency_table::{Dependency, DependencyTable, DependencyTableError, Registration};
pub use descriptor::{ApplicationDescriptor, SourceSet, SourceSets, UnitKind};
pub use descriptor_registry::{DescriptorRegistry, RegistryError};
pub use merged_unit::{DroppedDuplicate, MergedFile, MergedUnit};
pub use project::{Project, ProjectMetadata};
