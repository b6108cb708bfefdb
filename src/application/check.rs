//! Check Use Case
//!
//! Validates a loaded project without building it: every root merges under
//! the configured duplicates strategy, every entry point is found, every
//! toolchain is installed and every declaration resolves.

use std::path::Path;

use crate::application::build::BuildPorts;
use crate::domain::entities::{ApplicationDescriptor, MergedUnit, Project, UnitKind};
use crate::domain::services::{
    resolve_classpath, verify_entry_point, FetchCache, SourceSetMerger,
};
use crate::domain::value_objects::{ClasspathKind, DuplicatesStrategy, SourceScope};
use crate::error::SkeinError;

/// Options for the check operation
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Applications to check; all of them when empty
    pub applications: Vec<String>,
    pub duplicates: DuplicatesStrategy,
}

/// Result of a single check
#[derive(Debug, Clone)]
pub struct CheckItem {
    pub application: String,
    /// Name of the check (`sources`, `entry_point`, `toolchain`, ...)
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    /// Dropped duplicates and similar per-file notes
    pub details: Vec<String>,
    /// Category of the failure, for error items
    pub category: Option<&'static str>,
}

/// Status of a check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warning,
    Error,
}

impl CheckStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Pass => "pass",
            CheckStatus::Warning => "warning",
            CheckStatus::Error => "error",
        }
    }
}

/// Result of the check operation
#[derive(Debug, Clone, Default)]
pub struct CheckResult {
    pub items: Vec<CheckItem>,
    pub passed: usize,
    pub warnings: usize,
    pub errors: usize,
}

impl CheckResult {
    pub fn is_success(&self) -> bool {
        self.errors == 0
    }

    /// `Err` carrying the category of the first failed check
    pub fn into_result(self) -> Result<Self, SkeinError> {
        let Some(first) = self.items.iter().find(|i| i.status == CheckStatus::Error) else {
            return Ok(self);
        };
        Err(SkeinError::Check {
            failed: self.errors,
            total: self.items.len(),
            category: first.category.unwrap_or("configuration"),
        })
    }

    fn push(&mut self, item: CheckItem) {
        match item.status {
            CheckStatus::Pass => self.passed += 1,
            CheckStatus::Warning => self.warnings += 1,
            CheckStatus::Error => self.errors += 1,
        }
        self.items.push(item);
    }
}

fn item(application: &str, name: &str, status: CheckStatus, message: String) -> CheckItem {
    CheckItem {
        application: application.to_string(),
        name: name.to_string(),
        status,
        message,
        details: Vec::new(),
        category: None,
    }
}

fn failed(application: &str, name: &str, err: SkeinError) -> CheckItem {
    CheckItem {
        category: Some(err.category()),
        ..item(application, name, CheckStatus::Error, err.to_string())
    }
}

pub struct CheckUseCase {
    ports: BuildPorts,
}

impl CheckUseCase {
    pub fn new(ports: BuildPorts) -> Self {
        Self { ports }
    }

    pub fn execute(
        &self,
        project: &Project,
        options: &CheckOptions,
    ) -> Result<CheckResult, SkeinError> {
        self.execute_with_callback(project, options, |_| {})
    }

    /// Execute with a callback for each check (for streaming output)
    pub fn execute_with_callback<F>(
        &self,
        project: &Project,
        options: &CheckOptions,
        mut on_check: F,
    ) -> Result<CheckResult, SkeinError>
    where
        F: FnMut(&CheckItem),
    {
        let descriptors: Vec<&ApplicationDescriptor> = if options.applications.is_empty() {
            project.applications().iter().collect()
        } else {
            options
                .applications
                .iter()
                .map(|name| project.applications().require(name))
                .collect::<Result<_, _>>()?
        };

        let fetches = FetchCache::new(&*self.ports.resolver);
        let mut result = CheckResult::default();
        for descriptor in descriptors {
            let _span = tracing::info_span!("check", application = descriptor.name()).entered();
            for item in self.check_application(project, descriptor, options.duplicates, &fetches) {
                on_check(&item);
                result.push(item);
            }
        }
        Ok(result)
    }

    fn check_application(
        &self,
        project: &Project,
        descriptor: &ApplicationDescriptor,
        duplicates: DuplicatesStrategy,
        fetches: &FetchCache<'_>,
    ) -> Vec<CheckItem> {
        let name = descriptor.name();
        let mut items = Vec::new();

        let mut scopes = vec![SourceScope::Main];
        if descriptor.has_tests() {
            scopes.push(SourceScope::Test);
        }
        let mut main_sources = None;
        for scope in scopes {
            for kind in [UnitKind::Sources, UnitKind::Resources] {
                let roots = descriptor.roots(scope, kind);
                if roots.is_empty() {
                    continue;
                }
                let check = format!("{}.{}", scope, kind.as_str());
                match self.merge(project.root(), descriptor, scope, kind, duplicates) {
                    Ok(unit) => {
                        items.push(merged_item(name, &check, &unit, duplicates));
                        if scope == SourceScope::Main && kind == UnitKind::Sources {
                            main_sources = Some(unit);
                        }
                    }
                    Err(err) => items.push(failed(name, &check, err)),
                }
            }
        }

        if let Some(unit) = &main_sources {
            let compiled = self.ports.compiler.source_extensions();
            items.push(match verify_entry_point(name, descriptor.entry_point(), unit, compiled) {
                Ok(path) => item(
                    name,
                    "entry_point",
                    CheckStatus::Pass,
                    format!("{} in {}", descriptor.entry_point(), path.display()),
                ),
                Err(err) => failed(name, "entry_point", err.into()),
            });
        }

        let version = descriptor.runtime_version();
        items.push(match self.ports.toolchains.provision(version) {
            Ok(toolchain) => item(
                name,
                "toolchain",
                CheckStatus::Pass,
                format!("Java {} at {}", version, toolchain.home.display()),
            ),
            Err(err) => failed(name, "toolchain", err.into()),
        });

        let mut kinds = vec![ClasspathKind::MainRuntime];
        if descriptor.has_tests() {
            kinds.push(ClasspathKind::TestRuntime);
        }
        for kind in kinds {
            let names: Vec<String> = project
                .dependencies()
                .classpath(kind, descriptor.dependencies())
                .map(|d| d.name.clone())
                .collect();
            let check = format!("dependencies.{}", kind.as_str());
            items.push(
                match resolve_classpath(project, &names, fetches) {
                    Ok(libraries) => item(
                        name,
                        &check,
                        CheckStatus::Pass,
                        format!("{} libraries", libraries.len()),
                    ),
                    Err(err) => failed(name, &check, err.into()),
                },
            );
        }

        items
    }

    fn merge(
        &self,
        base_dir: &Path,
        descriptor: &ApplicationDescriptor,
        scope: SourceScope,
        kind: UnitKind,
        duplicates: DuplicatesStrategy,
    ) -> Result<MergedUnit, SkeinError> {
        let merger = SourceSetMerger::new(&*self.ports.scanner, &duplicates);
        Ok(merger.merge(
            scope,
            kind,
            base_dir,
            descriptor.roots(scope, kind),
            descriptor.excludes(),
        )?)
    }
}

fn merged_item(
    application: &str,
    check: &str,
    unit: &MergedUnit,
    duplicates: DuplicatesStrategy,
) -> CheckItem {
    let status = if !unit.dropped.is_empty() && duplicates == DuplicatesStrategy::Warn {
        CheckStatus::Warning
    } else {
        CheckStatus::Pass
    };
    let mut message = format!("{} files from {} root(s)", unit.len(), unit.roots.len());
    if !unit.dropped.is_empty() {
        message.push_str(&format!(", {} duplicate(s) dropped", unit.dropped.len()));
    }
    CheckItem {
        details: unit
            .dropped
            .iter()
            .map(|d| format!("{} kept over {}", d.kept.display(), d.dropped.display()))
            .collect(),
        ..item(application, check, status, message)
    }
}
