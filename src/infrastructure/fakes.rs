//! In-memory port implementations
//!
//! Used by the integration tests and by anyone embedding the build driver
//! without a JDK on the machine. Every fake records what it was asked to do.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::domain::ports::{
    ApplicationLauncher, BuildEvent, BuildEventSink, CompileError, CompileRequest, Compiler,
    Diagnostic, DependencyResolver, LaunchRequest, Library, ProcessError, ResolveError,
    TestReport, TestRequest, TestRunner, Toolchain, ToolchainError, ToolchainProvider,
};
use crate::domain::value_objects::{CancellationToken, Coordinate, LanguageVersion};

/// Toolchains for a fixed set of versions, homed under `/fake/jdk-<n>`
#[derive(Debug, Default)]
pub struct FakeToolchains {
    versions: BTreeSet<u32>,
}

impl FakeToolchains {
    pub fn with_versions(versions: &[u32]) -> Self {
        Self {
            versions: versions.iter().copied().collect(),
        }
    }

    fn home(version: u32) -> PathBuf {
        PathBuf::from(format!("/fake/jdk-{}", version))
    }
}

impl ToolchainProvider for FakeToolchains {
    fn provision(&self, version: LanguageVersion) -> Result<Toolchain, ToolchainError> {
        if self.versions.contains(&version.major()) {
            Ok(Toolchain::new(version, Self::home(version.major())))
        } else {
            Err(ToolchainError::Unavailable {
                version,
                searched: self.versions.iter().map(|v| Self::home(*v)).collect(),
            })
        }
    }
}

/// Resolver that materializes an empty jar per coordinate under `root`
#[derive(Debug)]
pub struct RecordingResolver {
    root: PathBuf,
    missing: BTreeSet<String>,
    fetched: Mutex<Vec<Coordinate>>,
}

impl RecordingResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            missing: BTreeSet::new(),
            fetched: Mutex::new(Vec::new()),
        }
    }

    /// Make fetches of `module` (`group:artifact`) fail
    pub fn with_missing(mut self, module: &str) -> Self {
        self.missing.insert(module.to_string());
        self
    }

    /// Coordinates fetched so far, sorted
    pub fn fetched(&self) -> Vec<Coordinate> {
        let mut fetched = self
            .fetched
            .lock()
            .map(|f| f.clone())
            .unwrap_or_default();
        fetched.sort_by_key(|c| c.to_string());
        fetched
    }

    pub fn fetched_modules(&self) -> Vec<String> {
        self.fetched().iter().map(|c| c.module()).collect()
    }
}

impl DependencyResolver for RecordingResolver {
    fn fetch(&self, coordinate: &Coordinate) -> Result<Library, ResolveError> {
        if let Ok(mut fetched) = self.fetched.lock() {
            fetched.push(coordinate.clone());
        }
        let jar = self.root.join(format!(
            "{}-{}.jar",
            coordinate.artifact(),
            coordinate.version().unwrap_or("unversioned")
        ));
        if self.missing.contains(&coordinate.module()) {
            return Err(ResolveError::NotFound {
                coordinate: coordinate.clone(),
                location: jar,
            });
        }
        let io = |e: std::io::Error| ResolveError::Io {
            coordinate: coordinate.clone(),
            message: e.to_string(),
        };
        fs::create_dir_all(&self.root).map_err(io)?;
        if !jar.exists() {
            fs::write(&jar, b"").map_err(io)?;
        }
        Ok(Library {
            coordinate: coordinate.clone(),
            path: jar,
        })
    }
}

/// Compiler that writes `<Stem>.class` into the output directory per source
#[derive(Debug, Default)]
pub struct FakeCompiler {
    fail_on: BTreeSet<String>,
    cancel_on_call: Option<CancellationToken>,
    calls: AtomicUsize,
    requests: Mutex<Vec<CompileRequest>>,
}

impl FakeCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail any compile that includes a source with this file name
    pub fn failing_on(mut self, file_name: &str) -> Self {
        self.fail_on.insert(file_name.to_string());
        self
    }

    /// Fire `token` from inside the first compile, as an interrupt would
    pub fn cancelling(mut self, token: CancellationToken) -> Self {
        self.cancel_on_call = Some(token);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<CompileRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

impl Compiler for FakeCompiler {
    fn compile(
        &self,
        request: &CompileRequest,
        cancel: &CancellationToken,
    ) -> Result<(), CompileError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        if let Some(token) = &self.cancel_on_call {
            token.cancel();
        }
        if cancel.is_cancelled() {
            return Err(ProcessError::Cancelled {
                tool: "javac".into(),
            }
            .into());
        }

        let diagnostics: Vec<Diagnostic> = request
            .sources
            .iter()
            .filter(|s| self.fail_on.contains(&file_name(s)))
            .map(|s| Diagnostic {
                file: s.clone(),
                line: Some(1),
                message: "cannot find symbol".into(),
            })
            .collect();
        if !diagnostics.is_empty() {
            let output = diagnostics
                .iter()
                .map(|d| format!("{}: error: {}", d.file.display(), d.message))
                .collect::<Vec<_>>()
                .join("\n");
            return Err(CompileError::Failed {
                diagnostics,
                output,
            });
        }

        let io = |e: std::io::Error| {
            CompileError::Process(ProcessError::Io {
                tool: "javac".into(),
                message: e.to_string(),
            })
        };
        fs::create_dir_all(&request.output_dir).map_err(io)?;
        for source in &request.sources {
            let stem = source
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            fs::write(request.output_dir.join(format!("{}.class", stem)), b"").map_err(io)?;
        }
        Ok(())
    }
}

/// Test runner returning a fixed report, optionally per test-class directory
#[derive(Debug, Default)]
pub struct FakeTestRunner {
    report: TestReport,
    failing: BTreeMap<String, usize>,
    requests: Mutex<Vec<TestRequest>>,
}

impl FakeTestRunner {
    pub fn passing(total: usize) -> Self {
        Self {
            report: TestReport {
                total,
                failed: 0,
                output: String::new(),
            },
            ..Self::default()
        }
    }

    /// Report `failed` failures whenever the scanned class dir contains `marker`
    pub fn failing_when(mut self, marker: &str, failed: usize) -> Self {
        self.failing.insert(marker.to_string(), failed);
        self
    }

    pub fn requests(&self) -> Vec<TestRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl TestRunner for FakeTestRunner {
    fn run(
        &self,
        request: &TestRequest,
        cancel: &CancellationToken,
    ) -> Result<TestReport, ProcessError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        if cancel.is_cancelled() {
            return Err(ProcessError::Cancelled {
                tool: "junit".into(),
            });
        }
        let mut report = self.report.clone();
        for (marker, failed) in &self.failing {
            if request.test_classes.join(marker).exists() {
                report.failed = *failed;
                report.total = report.total.max(*failed);
            }
        }
        Ok(report)
    }
}

/// Launcher that records requests and returns a fixed exit status
#[derive(Debug, Default)]
pub struct FakeLauncher {
    status: i32,
    requests: Mutex<Vec<LaunchRequest>>,
}

impl FakeLauncher {
    pub fn exiting_with(status: i32) -> Self {
        Self {
            status,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<LaunchRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl ApplicationLauncher for FakeLauncher {
    fn launch(
        &self,
        request: &LaunchRequest,
        cancel: &CancellationToken,
    ) -> Result<i32, ProcessError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        if cancel.is_cancelled() {
            return Err(ProcessError::Cancelled {
                tool: "java".into(),
            });
        }
        Ok(self.status)
    }
}

/// Event sink that keeps every event
#[derive(Debug, Default)]
pub struct RecordingEventSink {
    events: Mutex<Vec<BuildEvent>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<BuildEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Targets that started, in order
    pub fn started_targets(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                BuildEvent::TargetStarted { target } => Some(target),
                _ => None,
            })
            .collect()
    }
}

impl BuildEventSink for RecordingEventSink {
    fn on_event(&self, event: BuildEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fake_toolchains_provision_exact_versions_only() {
        let toolchains = FakeToolchains::with_versions(&[21]);
        assert!(toolchains.provision(LanguageVersion::of(21)).is_ok());
        assert!(matches!(
            toolchains.provision(LanguageVersion::of(23)),
            Err(ToolchainError::Unavailable { .. })
        ));
    }

    #[test]
    fn recording_resolver_tracks_fetches() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = RecordingResolver::new(dir.path()).with_missing("org.example:gone");
        let lib = resolver
            .fetch(&"org.example:lib:1.0".parse().unwrap())
            .unwrap();
        assert!(lib.path.exists());
        assert!(resolver
            .fetch(&"org.example:gone:1.0".parse().unwrap())
            .is_err());
        assert_eq!(
            resolver.fetched_modules(),
            vec!["org.example:gone", "org.example:lib"]
        );
    }
}
