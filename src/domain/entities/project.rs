//! Project aggregate: metadata, dependency table, descriptors and managed
//! versions loaded from one `skein.toml`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::entities::{DependencyTable, DescriptorRegistry};
use crate::domain::value_objects::Coordinate;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    pub group: String,
    pub version: String,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct Project {
    pub metadata: ProjectMetadata,
    root: PathBuf,
    dependencies: DependencyTable,
    applications: DescriptorRegistry,
    managed_versions: BTreeMap<String, String>,
}

impl Project {
    pub fn new(root: impl Into<PathBuf>, metadata: ProjectMetadata) -> Self {
        Self {
            metadata,
            root: root.into(),
            dependencies: DependencyTable::new(),
            applications: DescriptorRegistry::new(),
            managed_versions: BTreeMap::new(),
        }
    }

    pub fn with_dependencies(mut self, dependencies: DependencyTable) -> Self {
        self.dependencies = dependencies;
        self
    }

    pub fn with_applications(mut self, applications: DescriptorRegistry) -> Self {
        self.applications = applications;
        self
    }

    /// `group:artifact` → version, used for versionless declarations
    pub fn with_managed_versions(mut self, managed: BTreeMap<String, String>) -> Self {
        self.managed_versions = managed;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn dependencies(&self) -> &DependencyTable {
        &self.dependencies
    }

    pub fn applications(&self) -> &DescriptorRegistry {
        &self.applications
    }

    pub fn managed_versions(&self) -> &BTreeMap<String, String> {
        &self.managed_versions
    }

    /// Coordinate with its version filled in from managed versions if needed.
    ///
    /// Returns the coordinate unchanged when neither source has a version.
    pub fn effective_coordinate(&self, coordinate: &Coordinate) -> Coordinate {
        if coordinate.version().is_some() {
            return coordinate.clone();
        }
        match self.managed_versions.get(&coordinate.module()) {
            Some(version) => coordinate.with_version(version),
            None => coordinate.clone(),
        }
    }

    /// Resolve a declared root against the project directory
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}
