//! Scenario: applications in one tree target different Java versions.

use skein::application::BuildMode;
use skein::domain::ports::BuildEvent;
use skein::infrastructure::fakes::FakeTestRunner;

use crate::common::*;
use crate::harness::Scenario;

fn project() -> TestProject {
    let project = TestProject::new();
    bootcamp_sources(&project);
    let toml = project.read("skein.toml").replace(
        "dependencies = [\"starter\"]",
        "dependencies = [\"starter\"]\njava_version = 17",
    );
    project.write("skein.toml", &toml);
    project
}

#[test]
fn each_application_compiles_with_its_own_release() {
    let scenario = Scenario::load(project(), &[17, 21], FakeTestRunner::passing(0));
    let report = scenario.build(&scenario.options(BuildMode::Build));
    assert!(report.is_success(), "{:?}", report.failures);

    let mut releases: Vec<u32> = scenario
        .compiler
        .requests()
        .iter()
        .map(|r| r.release.major())
        .collect();
    releases.sort();
    assert_eq!(releases, vec![17, 21]);

    let selected: Vec<u32> = scenario
        .events
        .events()
        .into_iter()
        .filter_map(|e| match e {
            BuildEvent::ToolchainSelected { version, .. } => Some(version),
            _ => None,
        })
        .collect();
    assert_eq!(selected.len(), 2);

    let matcher = report.application("matcher").expect("matcher outcome");
    assert_eq!(matcher.toolchain.as_ref().map(|t| t.version.major()), Some(17));
    let manifest = scenario.project.read("build/install/matcher/launch.toml");
    assert!(manifest.contains("java_version = 17"), "got:\n{}", manifest);
}

#[test]
fn missing_older_jdk_only_fails_its_application() {
    let scenario = Scenario::load(project(), &[21], FakeTestRunner::passing(0));
    let report = scenario.build(&scenario.options(BuildMode::Build));

    assert!(report.application("web").expect("web").is_success());
    assert!(!report.application("matcher").expect("matcher").is_success());
    assert_eq!(report.exit_code(), 6);
    assert!(scenario.project.exists("build/install/web/launch.toml"));
    assert!(!scenario.project.exists("build/install/matcher"));
}
