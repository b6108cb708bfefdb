//! Configuration types
//!
//! Mirror of `skein.toml`. Sections are optional; missing keys take the
//! defaults below. Domain types are built from these by the loader.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::domain::value_objects::{
    Coordinate, DependencyScope, DuplicatesStrategy, EntryPoint, LanguageVersion,
};

/// The whole project file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectFile {
    pub project: ProjectSection,
    pub build: BuildSection,
    pub toolchain: ToolchainSection,
    pub repository: RepositorySection,
    pub test: TestSection,
    /// `group:artifact` -> version, applied to versionless declarations
    pub managed_versions: BTreeMap<String, String>,
    /// `[[dependency]]` entries, in declaration order
    #[serde(rename = "dependency")]
    pub dependencies: Vec<DependencyEntry>,
    pub source_sets: SourceSetsSection,
    /// `[[application]]` entries, in registration order
    #[serde(rename = "application")]
    pub applications: Vec<ApplicationEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectSection {
    pub group: String,
    pub version: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BuildSection {
    /// Output directory; relative paths resolve against the project root
    pub dir: PathBuf,
    pub duplicates: DuplicatesStrategy,
    pub continue_on_test_failure: bool,
    /// Exclude patterns applied to every application
    pub excludes: Vec<String>,
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("build"),
            duplicates: DuplicatesStrategy::default(),
            continue_on_test_failure: false,
            excludes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ToolchainSection {
    /// Project-wide language version
    pub version: Option<LanguageVersion>,
    /// Explicit JDK installations
    pub homes: Vec<PathBuf>,
    /// Directories whose children are JDK installations
    pub search_paths: Vec<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RepositorySection {
    /// Maven-layout repository; `~/.m2/repository` when unset
    pub local: Option<PathBuf>,
    /// Base URLs tried in order for jars missing locally; Maven Central
    /// when unset, none when empty
    pub remotes: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TestSection {
    pub jvm_args: Vec<String>,
    /// Main class of the console test launcher
    pub launcher_main: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DependencyEntry {
    pub name: String,
    pub coordinate: Coordinate,
    #[serde(default = "default_scope")]
    pub scope: DependencyScope,
}

fn default_scope() -> DependencyScope {
    DependencyScope::Compile
}

/// Roots of one scope. `None` means "not declared here".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SourceSetSection {
    pub sources: Option<Vec<PathBuf>>,
    pub resources: Option<Vec<PathBuf>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SourceSetsSection {
    pub main: SourceSetSection,
    pub test: SourceSetSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationEntry {
    pub name: String,
    pub entry_point: EntryPoint,
    /// Overrides `[toolchain].version`
    #[serde(default)]
    pub java_version: Option<LanguageVersion>,
    /// Subset of `[[dependency]]` names; all of them when absent
    #[serde(default)]
    pub dependencies: Option<Vec<String>>,
    /// Overrides the project-level source sets per scope and kind
    #[serde(default)]
    pub source_sets: SourceSetsSection,
    #[serde(default)]
    pub excludes: Vec<String>,
    #[serde(default)]
    pub jvm_args: Vec<String>,
    #[serde(default)]
    pub args: Vec<String>,
}

/// Build settings after defaults, the project file and the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub build_dir: PathBuf,
    pub duplicates: DuplicatesStrategy,
    pub continue_on_test_failure: bool,
    pub toolchain_homes: Vec<PathBuf>,
    pub toolchain_search_paths: Vec<PathBuf>,
    pub local_repository: PathBuf,
    pub remote_repositories: Vec<String>,
    pub test_jvm_args: Vec<String>,
    pub test_launcher_main: Option<String>,
}
