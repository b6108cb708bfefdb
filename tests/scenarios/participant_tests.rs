//! Scenario: a participant adds tests for their application only.

use skein::application::{ApplicationStatus, BuildMode};
use skein::infrastructure::fakes::FakeTestRunner;

use crate::common::*;
use crate::harness::Scenario;

const TEST_DEPENDENCIES: &str = r#"
[[dependency]]
name = "junit"
coordinate = "org.junit.jupiter:junit-jupiter:5.10.2"
scope = "testImplementation"

[[dependency]]
name = "junit-launcher"
coordinate = "org.junit.platform:junit-platform-console-standalone:1.10.2"
scope = "testRuntimeOnly"

"#;

/// Follows the last `[[application]]`, so it extends `matcher`
const MATCHER_TEST_ROOTS: &str = r#"
[application.source_sets.test]
sources = ["participants/victoria/project/src/test/java"]
"#;

fn project(continue_on_failure: bool) -> TestProject {
    let project = TestProject::new();
    bootcamp_sources(&project);
    let mut toml = project
        .read("skein.toml")
        .replace("[source_sets.main]", &format!("{}[source_sets.main]", TEST_DEPENDENCIES))
        .replace(
            "dependencies = [\"starter\"]",
            "dependencies = [\"starter\", \"junit\", \"junit-launcher\"]",
        );
    if continue_on_failure {
        toml = format!("[build]\ncontinue_on_test_failure = true\n{}", toml);
    }
    toml.push_str(MATCHER_TEST_ROOTS);
    project.write("skein.toml", &toml);
    project.write(
        &format!(
            "participants/victoria/project/src/test/java/{}/MatcherTest.java",
            PACKAGE_DIR
        ),
        "package com.wcc.bootcamp.java.mentorship;\n\nclass MatcherTest {}\n",
    );
    project
}

#[test]
fn only_the_participant_application_runs_tests() {
    let scenario = Scenario::load(project(false), &[21], FakeTestRunner::passing(4));
    let report = scenario.build(&scenario.options(BuildMode::Build));
    assert!(report.is_success(), "{:?}", report.failures);

    let requests = scenario.tests.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].test_classes.join("MatcherTest.class").exists());
    assert_eq!(report.application("matcher").and_then(|a| a.tests).map(|t| t.total), Some(4));
    assert!(report.application("web").and_then(|a| a.tests).is_none());
}

#[test]
fn failing_participant_tests_do_not_block_the_web_application() {
    let runner = FakeTestRunner::passing(4).failing_when("MatcherTest.class", 1);
    let scenario = Scenario::load(project(false), &[21], runner);
    let report = scenario.build(&scenario.options(BuildMode::Build));

    assert!(matches!(
        report.application("matcher").expect("matcher").status,
        ApplicationStatus::Failed { .. }
    ));
    assert!(report.application("web").expect("web").is_success());
    assert_eq!(report.exit_code(), 5);
    assert!(!scenario.project.exists("build/install/matcher"));
}

#[test]
fn configured_continue_mode_still_packages() {
    let runner = FakeTestRunner::passing(4).failing_when("MatcherTest.class", 1);
    let scenario = Scenario::load(project(true), &[21], runner);
    let report = scenario.build(&scenario.options(BuildMode::Build));

    assert!(report.is_success(), "{:?}", report.failures);
    assert!(scenario.project.exists("build/install/matcher/launch.toml"));
    let tests = report.application("matcher").and_then(|a| a.tests).expect("test summary");
    assert_eq!(tests.failed, 1);
}
