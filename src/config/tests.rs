//! Tests for the config module

use super::*;
use crate::domain::value_objects::{DependencyScope, DuplicatesStrategy, LanguageVersion};
use crate::error::SkeinError;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

const BOOTCAMP: &str = r#"
[project]
group = "com.wcc.bootcamp.java"
version = "0.0.1-SNAPSHOT"
description = "Mentorship bootcamp"

[build]
duplicates = "exclude"

[toolchain]
version = 23

[managed_versions]
"org.springframework.boot:spring-boot-starter" = "3.3.4"
"org.springframework.boot:spring-boot-starter-web" = "3.3.4"

[[dependency]]
name = "starter"
coordinate = "org.springframework.boot:spring-boot-starter"

[[dependency]]
name = "web"
coordinate = "org.springframework.boot:spring-boot-starter-web"

[[dependency]]
name = "junit"
coordinate = "org.junit.jupiter:junit-jupiter:5.10.2"
scope = "testImplementation"

[source_sets.main]
sources = ["src/main/java", "participants/victoria/project/src/main/java"]
resources = ["src/main/resources"]

[[application]]
name = "web"
entry_point = "com.wcc.bootcamp.java.mentorship.MentorshipWebApplication"

[[application]]
name = "matcher"
entry_point = "com.wcc.bootcamp.java.mentorship.MentorshipMatcherApp"
dependencies = ["starter", "junit"]
"#;

fn parse_str(content: &str) -> SkeinResult<ProjectConfig> {
    parse(content, Path::new("/work/skein.toml"), Path::new("/work"))
}

type SkeinResult<T> = Result<T, SkeinError>;

#[test]
fn test_bootcamp_project_parses() {
    let config = parse_str(BOOTCAMP).unwrap();
    let project = &config.project;

    assert_eq!(project.metadata.group, "com.wcc.bootcamp.java");
    assert_eq!(project.applications().list(), vec!["web", "matcher"]);
    assert_eq!(project.dependencies().len(), 3);
    assert_eq!(
        project.dependencies().get("junit").unwrap().scope,
        DependencyScope::TestCompile
    );

    let web = project.applications().get("web").unwrap();
    assert_eq!(web.runtime_version(), LanguageVersion::of(23));
    assert_eq!(
        web.source_roots(),
        [
            PathBuf::from("src/main/java"),
            PathBuf::from("participants/victoria/project/src/main/java")
        ]
    );
    assert!(web.dependencies().is_none());

    let matcher = project.applications().get("matcher").unwrap();
    assert_eq!(
        matcher.dependencies().unwrap(),
        ["starter".to_string(), "junit".to_string()]
    );
    assert!(config.warnings.is_empty());
}

#[test]
fn test_settings_defaults() {
    let config = parse_str(BOOTCAMP).unwrap();
    assert_eq!(config.settings.build_dir, PathBuf::from("/work/build"));
    assert_eq!(config.settings.duplicates, DuplicatesStrategy::Exclude);
    assert!(!config.settings.continue_on_test_failure);
    assert_eq!(
        config.settings.remote_repositories,
        vec!["https://repo.maven.apache.org/maven2".to_string()]
    );
}

#[test]
fn test_remotes_replace_maven_central() {
    let toml = BOOTCAMP.replace(
        "[toolchain]",
        "[repository]\nremotes = [\"https://mirror.example/maven2\"]\n\n[toolchain]",
    );
    let config = parse_str(&toml).unwrap();
    assert!(config.warnings.is_empty(), "{:?}", config.warnings);
    assert_eq!(
        config.settings.remote_repositories,
        vec!["https://mirror.example/maven2".to_string()]
    );

    let offline = BOOTCAMP.replace("[toolchain]", "[repository]\nremotes = []\n\n[toolchain]");
    assert!(parse_str(&offline)
        .unwrap()
        .settings
        .remote_repositories
        .is_empty());
}

#[test]
fn test_offline_env_drops_remotes() {
    let config = parse_str(BOOTCAMP).unwrap();
    let settings = with_env_overrides_from(config.settings.clone(), |name| {
        (name == "SKEIN_OFFLINE").then(|| "1".to_string())
    });
    assert!(settings.remote_repositories.is_empty());
    assert_eq!(settings.local_repository, config.settings.local_repository);
}

#[test]
fn test_unknown_keys_become_warnings() {
    let content = BOOTCAMP.replace("[build]\n", "[build]\nduplicats = \"fail\"\n");
    let config = parse_str(&content).unwrap();

    assert_eq!(config.warnings.len(), 1);
    let warning = &config.warnings[0];
    assert_eq!(warning.key, "build.duplicats");
    assert_eq!(warning.suggestion.as_deref(), Some("duplicates"));
    assert!(warning.line.is_some());
}

#[test]
fn test_application_overrides_version_and_roots() {
    let content = format!(
        "{}\n{}",
        BOOTCAMP,
        r#"
[[application]]
name = "legacy"
entry_point = "com.example.Legacy"
java_version = 17

[application.source_sets.main]
sources = ["legacy/src"]
"#
    );
    let config = parse_str(&content).unwrap();
    let legacy = config.project.applications().get("legacy").unwrap();
    assert_eq!(legacy.runtime_version(), LanguageVersion::of(17));
    assert_eq!(legacy.source_roots(), [PathBuf::from("legacy/src")]);
    // Resources still come from the project level
    assert_eq!(legacy.resource_roots(), [PathBuf::from("src/main/resources")]);
}

#[test]
fn test_duplicate_entry_point_is_a_configuration_error() {
    let content = BOOTCAMP.replace("MentorshipMatcherApp", "MentorshipWebApplication");
    let err = parse_str(&content).unwrap_err();
    assert!(matches!(err, SkeinError::Registry(_)));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_unknown_dependency_name_is_rejected() {
    let content = BOOTCAMP.replace("[\"starter\", \"junit\"]", "[\"starter\", \"jpa\"]");
    let err = parse_str(&content).unwrap_err();
    assert!(err.to_string().contains("jpa"), "{}", err);
}

#[test]
fn test_conflicting_versions_are_rejected() {
    let content = format!(
        "{}\n{}",
        BOOTCAMP,
        r#"
[[dependency]]
name = "junit-old"
coordinate = "org.junit.jupiter:junit-jupiter:5.9.0"
scope = "test_compile"
"#
    );
    let err = parse_str(&content).unwrap_err();
    assert!(matches!(err, SkeinError::DependencyTable(_)));
}

#[test]
fn test_missing_applications_is_invalid() {
    let err = parse_str("[project]\ngroup = \"x\"\n").unwrap_err();
    assert!(err.to_string().contains("no [[application]] declared"));
}

#[test]
fn test_malformed_toml_is_a_parse_error() {
    let err = parse_str("[build\n").unwrap_err();
    assert!(matches!(err, SkeinError::Config(ConfigError::Parse { .. })));
}

#[test]
fn test_conventional_roots_only_when_present() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("src/main/java")).unwrap();
    fs::write(
        dir.path().join(PROJECT_FILE),
        "[[application]]\nname = \"app\"\nentry_point = \"com.example.App\"\n",
    )
    .unwrap();

    let config = load(&dir.path().join(PROJECT_FILE)).unwrap();
    let app = config.project.applications().get("app").unwrap();
    assert_eq!(app.source_roots(), [PathBuf::from("src/main/java")]);
    assert!(app.resource_roots().is_empty());
    assert!(!app.has_tests());
}

#[test]
fn test_discover_walks_up() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(PROJECT_FILE), BOOTCAMP).unwrap();
    let nested = dir.path().join("participants/victoria");
    fs::create_dir_all(&nested).unwrap();

    assert_eq!(
        find_project_file(&nested),
        Some(dir.path().join(PROJECT_FILE))
    );
    let config = discover(&nested).unwrap();
    assert_eq!(config.project.root(), dir.path());
}

#[test]
fn test_env_overrides() {
    let config = parse_str(BOOTCAMP).unwrap();
    let env: HashMap<&str, &str> = [
        ("SKEIN_BUILD_DIR", "/tmp/skein-out"),
        ("SKEIN_DUPLICATES", "fail"),
        ("SKEIN_CONTINUE_ON_TEST_FAILURE", "yes"),
    ]
    .into_iter()
    .collect();

    let settings = with_env_overrides_from(config.settings, |name| {
        env.get(name).map(|v| v.to_string())
    });
    assert_eq!(settings.build_dir, PathBuf::from("/tmp/skein-out"));
    assert_eq!(settings.duplicates, DuplicatesStrategy::Fail);
    assert!(settings.continue_on_test_failure);
}

#[test]
fn test_invalid_env_values_are_ignored() {
    let config = parse_str(BOOTCAMP).unwrap();
    let settings = with_env_overrides_from(config.settings.clone(), |name| match name {
        "SKEIN_DUPLICATES" => Some("exclud".to_string()),
        "SKEIN_CONTINUE_ON_TEST_FAILURE" => Some("maybe".to_string()),
        "SKEIN_OFFLINE" => Some("sometimes".to_string()),
        _ => None,
    });
    assert_eq!(settings, config.settings);
}
