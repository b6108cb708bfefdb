//! Fake ports wired around a project loaded from disk.

use std::path::PathBuf;
use std::sync::Arc;

use skein::application::{BuildMode, BuildOptions, BuildPorts, BuildReport, BuildUseCase};
use skein::config::{self, ProjectConfig};
use skein::infrastructure::fakes::{
    FakeCompiler, FakeLauncher, FakeTestRunner, FakeToolchains, RecordingEventSink,
    RecordingResolver,
};
use skein::infrastructure::FsRootScanner;

use crate::common::TestProject;

pub struct Scenario {
    pub project: TestProject,
    pub config: ProjectConfig,
    pub compiler: Arc<FakeCompiler>,
    pub tests: Arc<FakeTestRunner>,
    pub events: Arc<RecordingEventSink>,
    toolchains: Arc<FakeToolchains>,
}

impl Scenario {
    pub fn load(project: TestProject, jdks: &[u32], tests: FakeTestRunner) -> Self {
        let config = config::load(&project.path("skein.toml")).expect("load skein.toml");
        Self {
            project,
            config,
            compiler: Arc::new(FakeCompiler::new()),
            tests: Arc::new(tests),
            events: Arc::new(RecordingEventSink::new()),
            toolchains: Arc::new(FakeToolchains::with_versions(jdks)),
        }
    }

    pub fn build_dir(&self) -> PathBuf {
        self.project.path("build")
    }

    pub fn options(&self, mode: BuildMode) -> BuildOptions {
        BuildOptions::new(self.build_dir())
            .with_mode(mode)
            .with_duplicates(self.config.settings.duplicates)
            .with_continue_on_test_failure(self.config.settings.continue_on_test_failure)
    }

    pub fn build(&self, options: &BuildOptions) -> BuildReport {
        let ports = BuildPorts {
            toolchains: self.toolchains.clone(),
            resolver: Arc::new(RecordingResolver::new(self.project.path("repository"))),
            scanner: Arc::new(FsRootScanner::new()),
            compiler: self.compiler.clone(),
            test_runner: self.tests.clone(),
            launcher: Arc::new(FakeLauncher::exiting_with(0)),
        };
        BuildUseCase::new(ports)
            .with_events(self.events.clone())
            .execute(&self.config.project, options)
            .expect("build runs")
    }
}
