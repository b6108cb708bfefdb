//! Application descriptor entity
//!
//! A named, immutable record describing one runnable application: its entry
//! point, runtime version, the source/resource roots it merges and the
//! subset of declared dependencies it needs.

use std::path::PathBuf;

use crate::domain::value_objects::{EntryPoint, ExcludePatterns, LanguageVersion, SourceScope};

/// What a root contributes: compilable sources or copied resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UnitKind {
    Sources,
    Resources,
}

impl UnitKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitKind::Sources => "sources",
            UnitKind::Resources => "resources",
        }
    }
}

/// Ordered source and resource roots of one scope
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceSet {
    pub sources: Vec<PathBuf>,
    pub resources: Vec<PathBuf>,
}

impl SourceSet {
    pub fn new(sources: Vec<PathBuf>, resources: Vec<PathBuf>) -> Self {
        Self { sources, resources }
    }

    pub fn roots(&self, kind: UnitKind) -> &[PathBuf] {
        match kind {
            UnitKind::Sources => &self.sources,
            UnitKind::Resources => &self.resources,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty() && self.resources.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceSets {
    pub main: SourceSet,
    pub test: SourceSet,
}

impl SourceSets {
    pub fn get(&self, scope: SourceScope) -> &SourceSet {
        match scope {
            SourceScope::Main => &self.main,
            SourceScope::Test => &self.test,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApplicationDescriptor {
    name: String,
    entry_point: EntryPoint,
    runtime_version: LanguageVersion,
    source_sets: SourceSets,
    dependencies: Option<Vec<String>>,
    excludes: ExcludePatterns,
    jvm_args: Vec<String>,
    args: Vec<String>,
}

impl ApplicationDescriptor {
    pub fn new(name: impl Into<String>, entry_point: EntryPoint) -> Self {
        Self {
            name: name.into(),
            entry_point,
            runtime_version: LanguageVersion::default(),
            source_sets: SourceSets::default(),
            dependencies: None,
            excludes: ExcludePatterns::empty(),
            jvm_args: Vec::new(),
            args: Vec::new(),
        }
    }

    pub fn with_runtime_version(mut self, version: LanguageVersion) -> Self {
        self.runtime_version = version;
        self
    }

    pub fn with_source_sets(mut self, source_sets: SourceSets) -> Self {
        self.source_sets = source_sets;
        self
    }

    /// Restrict the descriptor to these dependency names (`None` = all declared)
    pub fn with_dependencies(mut self, dependencies: Option<Vec<String>>) -> Self {
        self.dependencies = dependencies;
        self
    }

    pub fn with_excludes(mut self, excludes: ExcludePatterns) -> Self {
        self.excludes = excludes;
        self
    }

    pub fn with_jvm_args(mut self, jvm_args: Vec<String>) -> Self {
        self.jvm_args = jvm_args;
        self
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entry_point(&self) -> &EntryPoint {
        &self.entry_point
    }

    pub fn runtime_version(&self) -> LanguageVersion {
        self.runtime_version
    }

    pub fn source_sets(&self) -> &SourceSets {
        &self.source_sets
    }

    pub fn roots(&self, scope: SourceScope, kind: UnitKind) -> &[PathBuf] {
        self.source_sets.get(scope).roots(kind)
    }

    pub fn source_roots(&self) -> &[PathBuf] {
        &self.source_sets.main.sources
    }

    pub fn resource_roots(&self) -> &[PathBuf] {
        &self.source_sets.main.resources
    }

    pub fn test_source_roots(&self) -> &[PathBuf] {
        &self.source_sets.test.sources
    }

    pub fn test_resource_roots(&self) -> &[PathBuf] {
        &self.source_sets.test.resources
    }

    pub fn dependencies(&self) -> Option<&[String]> {
        self.dependencies.as_deref()
    }

    pub fn uses_dependency(&self, name: &str) -> bool {
        self.dependencies
            .as_ref()
            .map_or(true, |names| names.iter().any(|n| n == name))
    }

    pub fn excludes(&self) -> &ExcludePatterns {
        &self.excludes
    }

    pub fn jvm_args(&self) -> &[String] {
        &self.jvm_args
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// A descriptor without test source roots skips the test phase.
    pub fn has_tests(&self) -> bool {
        !self.source_sets.test.sources.is_empty()
    }
}
