//! Configuration loading
//!
//! Reads `skein.toml`, collects unknown keys as warnings and builds the
//! domain `Project` plus the build `Settings`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::entities::{
    ApplicationDescriptor, Dependency, DependencyTable, DescriptorRegistry, Project,
    ProjectMetadata, SourceSet, SourceSets,
};
use crate::domain::value_objects::{ConfigWarning, DuplicatesStrategy, ExcludePatterns};
use crate::error::SkeinResult;
use crate::infrastructure::fs::expand_home;
use crate::infrastructure::{LocalRepository, MAVEN_CENTRAL};

use super::types::{ProjectFile, Settings, SourceSetSection, SourceSetsSection};

pub const PROJECT_FILE: &str = "skein.toml";

/// Conventional roots used when neither the project nor the application
/// declares any. Only roots that exist are kept.
const CONVENTIONAL_ROOTS: [(&str, &str); 4] = [
    ("main.sources", "src/main/java"),
    ("main.resources", "src/main/resources"),
    ("test.sources", "src/test/java"),
    ("test.resources", "src/test/resources"),
];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no {PROJECT_FILE} found in {} or any parent directory", start.display())]
    NotFound { start: PathBuf },

    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("{}: {message}", path.display())]
    Invalid { path: PathBuf, message: String },
}

/// A loaded project file
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    pub file: PathBuf,
    pub project: Project,
    pub settings: Settings,
    pub warnings: Vec<ConfigWarning>,
}

/// Walk up from `start` to the nearest directory holding `skein.toml`.
pub fn find_project_file(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(PROJECT_FILE))
        .find(|candidate| candidate.is_file())
}

/// Load the project containing `start`.
pub fn discover(start: &Path) -> SkeinResult<ProjectConfig> {
    let file = find_project_file(start).ok_or_else(|| ConfigError::NotFound {
        start: start.to_path_buf(),
    })?;
    load(&file)
}

/// Load a project file. Relative paths inside it resolve against its directory.
pub fn load(path: &Path) -> SkeinResult<ProjectConfig> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let root = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    parse(&content, path, &root)
}

/// Parse project file `content` as if read from `path`, rooted at `root`.
pub fn parse(content: &str, path: &Path, root: &Path) -> SkeinResult<ProjectConfig> {
    let (file, warnings) = deserialize_with_warnings(content, path)?;
    for warning in &warnings {
        tracing::warn!(%warning, "ignoring unknown configuration key");
    }

    let settings = settings_from(&file, root);
    let project = project_from(file, path, root)?;
    Ok(ProjectConfig {
        file: path.to_path_buf(),
        project,
        settings,
        warnings,
    })
}

fn deserialize_with_warnings(
    content: &str,
    path: &Path,
) -> Result<(ProjectFile, Vec<ConfigWarning>), ConfigError> {
    let mut unknown: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);
    let file: ProjectFile = serde_ignored::deserialize(deserializer, |p| {
        unknown.push(p.to_string());
    })
    .map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown
        .into_iter()
        .map(|key| {
            let leaf = key.rsplit('.').next().unwrap_or(&key).to_string();
            ConfigWarning {
                line: find_line_number(content, &leaf),
                suggestion: suggest_key(&leaf),
                file: path.to_path_buf(),
                key,
            }
        })
        .collect();
    Ok((file, warnings))
}

fn resolve(root: &Path, path: &Path) -> PathBuf {
    let path = expand_home(path);
    if path.is_absolute() {
        path
    } else {
        root.join(path)
    }
}

fn settings_from(file: &ProjectFile, root: &Path) -> Settings {
    Settings {
        build_dir: resolve(root, &file.build.dir),
        duplicates: file.build.duplicates,
        continue_on_test_failure: file.build.continue_on_test_failure,
        toolchain_homes: file.toolchain.homes.iter().map(|p| resolve(root, p)).collect(),
        toolchain_search_paths: file
            .toolchain
            .search_paths
            .iter()
            .map(|p| resolve(root, p))
            .collect(),
        local_repository: file
            .repository
            .local
            .as_deref()
            .map(|p| resolve(root, p))
            .unwrap_or_else(LocalRepository::default_root),
        remote_repositories: file
            .repository
            .remotes
            .clone()
            .unwrap_or_else(|| vec![MAVEN_CENTRAL.to_string()]),
        test_jvm_args: file.test.jvm_args.clone(),
        test_launcher_main: file.test.launcher_main.clone(),
    }
}

/// Per-kind override: the application's roots when declared, else the project's
fn roots(
    app: Option<&SourceSetSection>,
    project: &SourceSetSection,
    conventional: &[PathBuf],
    pick: fn(&SourceSetSection) -> &Option<Vec<PathBuf>>,
) -> Vec<PathBuf> {
    app.and_then(|a| pick(a).clone())
        .or_else(|| pick(project).clone())
        .unwrap_or_else(|| conventional.to_vec())
}

fn source_sets(
    app: Option<&SourceSetsSection>,
    project: &SourceSetsSection,
    root: &Path,
) -> SourceSets {
    let conventional = |key: &str| -> Vec<PathBuf> {
        CONVENTIONAL_ROOTS
            .iter()
            .filter(|(k, dir)| *k == key && root.join(dir).is_dir())
            .map(|(_, dir)| PathBuf::from(dir))
            .collect()
    };
    let scope = |app: Option<&SourceSetSection>, project: &SourceSetSection, prefix: &str| {
        SourceSet::new(
            roots(app, project, &conventional(&format!("{}.sources", prefix)), |s| &s.sources),
            roots(app, project, &conventional(&format!("{}.resources", prefix)), |s| {
                &s.resources
            }),
        )
    };
    SourceSets {
        main: scope(app.map(|a| &a.main), &project.main, "main"),
        test: scope(app.map(|a| &a.test), &project.test, "test"),
    }
}

fn project_from(file: ProjectFile, path: &Path, root: &Path) -> SkeinResult<Project> {
    let invalid = |message: String| ConfigError::Invalid {
        path: path.to_path_buf(),
        message,
    };

    let mut table = DependencyTable::new();
    for entry in &file.dependencies {
        table.register(Dependency::new(
            entry.name.clone(),
            entry.coordinate.clone(),
            entry.scope,
        ))?;
    }

    if file.applications.is_empty() {
        return Err(invalid("no [[application]] declared".into()).into());
    }

    let project_version = file.toolchain.version.unwrap_or_default();
    let mut registry = DescriptorRegistry::new();
    for app in &file.applications {
        let mut patterns = file.build.excludes.clone();
        patterns.extend(app.excludes.iter().cloned());
        let excludes = ExcludePatterns::from_patterns(&patterns)?;

        let descriptor = ApplicationDescriptor::new(app.name.clone(), app.entry_point.clone())
            .with_runtime_version(app.java_version.unwrap_or(project_version))
            .with_source_sets(source_sets(Some(&app.source_sets), &file.source_sets, root))
            .with_dependencies(app.dependencies.clone())
            .with_excludes(excludes)
            .with_jvm_args(app.jvm_args.clone())
            .with_args(app.args.clone());

        if descriptor.source_roots().is_empty() {
            return Err(invalid(format!(
                "application '{}' has no main source roots",
                app.name
            ))
            .into());
        }
        registry.register(descriptor)?;
    }
    registry.validate_dependencies(&table)?;

    let metadata = ProjectMetadata {
        group: file.project.group,
        version: file.project.version,
        description: file.project.description,
    };
    Ok(Project::new(root, metadata)
        .with_dependencies(table)
        .with_applications(registry)
        .with_managed_versions(file.managed_versions))
}

/// Apply `SKEIN_*` environment overrides.
pub fn with_env_overrides(settings: Settings) -> Settings {
    with_env_overrides_from(settings, |name| std::env::var(name).ok())
}

/// Apply overrides read through `lookup`. Invalid values are ignored with a warning.
pub fn with_env_overrides_from(
    mut settings: Settings,
    lookup: impl Fn(&str) -> Option<String>,
) -> Settings {
    if let Some(dir) = lookup("SKEIN_BUILD_DIR").filter(|v| !v.is_empty()) {
        settings.build_dir = expand_home(Path::new(&dir));
    }

    if let Some(value) = lookup("SKEIN_DUPLICATES") {
        match value.parse::<DuplicatesStrategy>() {
            Ok(strategy) => settings.duplicates = strategy,
            Err(_) => warn_invalid(
                "SKEIN_DUPLICATES",
                &value,
                &["exclude", "fail", "warn", "last_wins"],
            ),
        }
    }

    if let Some(dir) = lookup("SKEIN_LOCAL_REPOSITORY").filter(|v| !v.is_empty()) {
        settings.local_repository = expand_home(Path::new(&dir));
    }

    if let Some(on) = lookup_flag(&lookup, "SKEIN_CONTINUE_ON_TEST_FAILURE") {
        settings.continue_on_test_failure = on;
    }

    if lookup_flag(&lookup, "SKEIN_OFFLINE") == Some(true) {
        settings.remote_repositories.clear();
    }

    settings
}

fn lookup_flag(lookup: &impl Fn(&str) -> Option<String>, var: &str) -> Option<bool> {
    let value = lookup(var)?;
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => {
            warn_invalid(var, &value, &["true", "false", "1", "0"]);
            None
        }
    }
}

fn warn_invalid(var: &str, value: &str, valid: &[&str]) {
    let suggestion = closest(&value.to_lowercase(), valid);
    tracing::warn!(
        var,
        value,
        suggestion = suggestion.unwrap_or("-"),
        valid = %valid.join(", "),
        "ignoring invalid environment override"
    );
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.trim_start().starts_with(needle))
        .map(|i| i + 1)
}

const KNOWN_KEYS: &[&str] = &[
    "project",
    "group",
    "version",
    "description",
    "build",
    "dir",
    "duplicates",
    "continue_on_test_failure",
    "excludes",
    "toolchain",
    "homes",
    "search_paths",
    "repository",
    "local",
    "remotes",
    "test",
    "jvm_args",
    "launcher_main",
    "managed_versions",
    "dependency",
    "name",
    "coordinate",
    "scope",
    "source_sets",
    "main",
    "sources",
    "resources",
    "application",
    "entry_point",
    "java_version",
    "dependencies",
    "args",
];

fn suggest_key(unknown: &str) -> Option<String> {
    closest(unknown, KNOWN_KEYS).map(String::from)
}

/// Candidate within two edits of `input`, if any
fn closest<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .map(|c| (*c, levenshtein(input, c)))
        .min_by_key(|(_, dist)| *dist)
        .filter(|(_, dist)| *dist <= 2)
        .map(|(c, _)| c)
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ac) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, bc) in b.iter().enumerate() {
            let cost = usize::from(ac != *bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}
