//! Domain Services
//!
//! Pure business logic services that operate on domain entities.
//! I/O happens only through the ports they are handed.

mod build_planner;
mod classpath;
mod entry_point_check;
mod source_merger;
mod target_graph;

pub use build_planner::{
    ApplicationPlan, BuildPlan, BuildPlanner, PlanError, PlanOptions, Target,
};
pub use classpath::{resolve_classpath, FetchCache};
pub use entry_point_check::{verify_entry_point, EntryPointError, JVM_SOURCE_EXTENSIONS};
pub use source_merger::{merge_listings, MergeError, RootListing, SourceSetMerger};
pub use target_graph::{GraphError, TargetGraph};
