//! Build Options
//!
//! What a build invocation should do and where it may write.

use std::path::PathBuf;

use crate::domain::services::PlanOptions;
use crate::domain::value_objects::DuplicatesStrategy;

/// Which phases an invocation runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildMode {
    /// Compile, test, package
    #[default]
    Build,
    /// Compile and test, no install image
    Test,
    /// Compile and package without tests, then launch
    Run,
}

impl BuildMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildMode::Build => "build",
            BuildMode::Test => "test",
            BuildMode::Run => "run",
        }
    }
}

/// Options for the build use case
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Applications to build; empty means all of them
    pub applications: Vec<String>,
    pub mode: BuildMode,
    /// Every output goes below this directory
    pub build_dir: PathBuf,
    pub duplicates: DuplicatesStrategy,
    pub skip_tests: bool,
    /// Test failures are reported but do not fail the application
    pub continue_on_test_failure: bool,
    /// Extra JVM arguments for the test runtime
    pub test_jvm_args: Vec<String>,
}

impl BuildOptions {
    pub fn new(build_dir: impl Into<PathBuf>) -> Self {
        Self {
            applications: Vec::new(),
            mode: BuildMode::default(),
            build_dir: build_dir.into(),
            duplicates: DuplicatesStrategy::default(),
            skip_tests: false,
            continue_on_test_failure: false,
            test_jvm_args: Vec::new(),
        }
    }

    pub fn with_applications(mut self, applications: Vec<String>) -> Self {
        self.applications = applications;
        self
    }

    pub fn with_mode(mut self, mode: BuildMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_duplicates(mut self, duplicates: DuplicatesStrategy) -> Self {
        self.duplicates = duplicates;
        self
    }

    pub fn with_skip_tests(mut self, skip: bool) -> Self {
        self.skip_tests = skip;
        self
    }

    pub fn with_continue_on_test_failure(mut self, continue_on_failure: bool) -> Self {
        self.continue_on_test_failure = continue_on_failure;
        self
    }

    pub fn with_test_jvm_args(mut self, args: Vec<String>) -> Self {
        self.test_jvm_args = args;
        self
    }

    pub fn plan_options(&self) -> PlanOptions {
        match self.mode {
            BuildMode::Build => PlanOptions {
                tests: !self.skip_tests,
                package: true,
            },
            BuildMode::Test => PlanOptions {
                tests: true,
                package: false,
            },
            BuildMode::Run => PlanOptions {
                tests: false,
                package: true,
            },
        }
    }

    pub fn install_dir(&self, application: &str) -> PathBuf {
        self.build_dir.join("install").join(application)
    }
}
