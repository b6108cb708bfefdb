//! Error reporting and exit codes.

mod common;

use common::*;

#[test]
fn missing_project_file_is_a_configuration_error() {
    let project = TestProject::new();

    let result = project.run(&["build"]);
    assert_eq!(result.exit_code, 2);
    assert!(result.stderr.starts_with("error: "), "got:\n{}", result.stderr);
    assert!(result.stderr.contains("skein.toml"));
}

#[test]
fn missing_project_file_in_json_mode_emits_error_event() {
    let project = TestProject::new();

    let result = project.run(&["list", "--json"]);
    assert_eq!(result.exit_code, 2);
    let events = result.events();
    let last = events.last().expect("an error event");
    assert_eq!(last["event"], "error");
    assert_eq!(last["category"], "configuration");
    assert_eq!(last["exit_code"], 2);
}

#[test]
fn invalid_toml_names_the_file() {
    let project = TestProject::new();
    project.write("skein.toml", "[project\n");

    let result = project.run(&["list"]);
    assert_eq!(result.exit_code, 2);
    assert!(result.stderr.contains("skein.toml"), "got:\n{}", result.stderr);
}

#[test]
fn unknown_duplicates_strategy_is_rejected_by_the_parser() {
    let project = TestProject::new();
    bootcamp_sources(&project);

    let result = project.run(&["list", "--duplicates", "sometimes"]);
    assert_eq!(result.exit_code, 2);
    assert!(result.stdout.is_empty());
}
