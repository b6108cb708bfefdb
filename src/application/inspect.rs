//! Read-only project queries behind `skein list`, `skein deps` and
//! `skein sources`.

use serde::Serialize;

use crate::domain::entities::{MergedUnit, Project, UnitKind};
use crate::domain::ports::RootScanner;
use crate::domain::services::SourceSetMerger;
use crate::domain::value_objects::{
    ClasspathKind, Coordinate, DependencyScope, DuplicatesStrategy, SourceScope,
};
use crate::error::SkeinError;

/// One registered application
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationSummary {
    pub name: String,
    pub entry_point: String,
    pub java_version: u32,
    /// Declared subset, or `None` for every dependency
    pub dependencies: Option<Vec<String>>,
    pub has_tests: bool,
}

pub fn list_applications(project: &Project) -> Vec<ApplicationSummary> {
    project
        .applications()
        .iter()
        .map(|d| ApplicationSummary {
            name: d.name().to_string(),
            entry_point: d.entry_point().to_string(),
            java_version: d.runtime_version().major(),
            dependencies: d.dependencies().map(<[String]>::to_vec),
            has_tests: d.has_tests(),
        })
        .collect()
}

/// A declaration with its managed version applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyRow {
    pub name: String,
    pub scope: DependencyScope,
    pub coordinate: String,
    /// False when no version is declared or managed
    pub versioned: bool,
}

/// Declarations in declaration order, optionally narrowed to what one
/// application sees and to one scope.
pub fn dependencies(
    project: &Project,
    application: Option<&str>,
    scope: Option<DependencyScope>,
) -> Result<Vec<DependencyRow>, SkeinError> {
    let subset = match application {
        Some(name) => project.applications().require(name)?.dependencies(),
        None => None,
    };

    let rows = project
        .dependencies()
        .classpath(ClasspathKind::TestRuntime, subset)
        .filter(|d| scope.map_or(true, |s| d.scope == s))
        .map(|d| {
            let coordinate: Coordinate = project.effective_coordinate(&d.coordinate);
            DependencyRow {
                name: d.name.clone(),
                scope: d.scope,
                versioned: coordinate.version().is_some(),
                coordinate: coordinate.to_string(),
            }
        })
        .collect();
    Ok(rows)
}

/// Merged sources and resources of one scope of an application
#[derive(Debug, Clone)]
pub struct MergedSources {
    pub sources: MergedUnit,
    pub resources: MergedUnit,
}

pub fn merged_sources(
    project: &Project,
    scanner: &dyn RootScanner,
    duplicates: DuplicatesStrategy,
    application: &str,
    scope: SourceScope,
) -> Result<MergedSources, SkeinError> {
    let descriptor = project.applications().require(application)?;
    let merger = SourceSetMerger::new(scanner, &duplicates);
    let merge = |kind: UnitKind| -> Result<MergedUnit, SkeinError> {
        let roots = descriptor.roots(scope, kind);
        if roots.is_empty() {
            return Ok(MergedUnit::empty(scope, kind));
        }
        Ok(merger.merge(scope, kind, project.root(), roots, descriptor.excludes())?)
    };

    Ok(MergedSources {
        sources: merge(UnitKind::Sources)?,
        resources: merge(UnitKind::Resources)?,
    })
}
