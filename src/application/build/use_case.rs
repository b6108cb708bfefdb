//! Build Use Case
//!
//! Evaluates a build plan:
//! 1. Plan the requested applications into a target graph
//! 2. Take the output lock for the build directory
//! 3. Provision toolchains, then evaluate the rest in dependency order
//! 4. Skip targets downstream of a failure, keep going elsewhere
//! 5. Report one outcome per application
//!
//! A target is never started when none of the applications reaching it has
//! a toolchain, so an unavailable JDK leaves no outputs and fetches nothing.
//!
//! Outputs are assembled in staging directories and renamed into place, so
//! a failed or cancelled target never leaves a partial directory behind.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::entities::{MergedFile, MergedUnit, Project};
use crate::domain::ports::{
    ApplicationLauncher, BuildEvent, BuildEventSink, CompileRequest, Compiler,
    DependencyResolver, LaunchRequest, Library, NoopEventSink, RootScanner, TestRequest,
    TestRunner, Toolchain, ToolchainProvider,
};
use crate::domain::services::{
    resolve_classpath, verify_entry_point, BuildPlan, BuildPlanner, FetchCache, GraphError,
    SourceSetMerger, Target,
};
use crate::domain::value_objects::{CancellationToken, ContentHash, Fingerprint};
use crate::error::SkeinError;
use crate::infrastructure::fs::{atomic_write, copy_file, copy_tree, OutputLock, Staging};

use super::manifest::LaunchManifest;
use super::options::{BuildMode, BuildOptions};
use super::result::{
    ApplicationOutcome, ApplicationStatus, BuildReport, TargetFailure, TestSummary,
};

/// The ports a build drives
#[derive(Clone)]
pub struct BuildPorts {
    pub toolchains: Arc<dyn ToolchainProvider>,
    pub resolver: Arc<dyn DependencyResolver>,
    pub scanner: Arc<dyn RootScanner>,
    pub compiler: Arc<dyn Compiler>,
    pub test_runner: Arc<dyn TestRunner>,
    pub launcher: Arc<dyn ApplicationLauncher>,
}

/// What a finished target produced
#[derive(Debug, Clone)]
enum Output {
    Toolchain(Toolchain),
    Classpath(Vec<Library>),
    Merged(MergedUnit),
    /// Published directory and the fingerprint of what went into it
    Directory {
        path: PathBuf,
        fingerprint: ContentHash,
    },
    Verified,
    Tested(TestSummary),
    Packaged(PathBuf),
}

enum Step {
    Ran(Output),
    UpToDate(Output),
}

/// Evaluation state of one invocation
struct Evaluation<'a> {
    project: &'a Project,
    options: &'a BuildOptions,
    plan: &'a BuildPlan,
    /// Applications reaching each target
    owners: HashMap<String, Vec<String>>,
    /// Application -> its toolchain target
    toolchains: HashMap<String, String>,
    fetches: FetchCache<'a>,
    outputs: HashMap<String, Output>,
    /// Failed or blocked target -> the failed target at the root of it
    failed: HashMap<String, String>,
    report: BuildReport,
}

fn missing(id: &str) -> SkeinError {
    SkeinError::Plan(GraphError::UnknownTarget { id: id.to_string() }.into())
}

impl Evaluation<'_> {
    fn owners(&self, id: &str) -> String {
        self.owners
            .get(id)
            .map(|o| o.join(", "))
            .unwrap_or_default()
    }

    /// The failed toolchain behind `id` when every application reaching it lacks one
    fn unprovisioned(&self, id: &str) -> Option<String> {
        let mut cause = None;
        for owner in self.owners.get(id)? {
            let failed = self
                .toolchains
                .get(owner)
                .and_then(|toolchain| self.failed.get(toolchain))?;
            cause.get_or_insert_with(|| failed.clone());
        }
        cause
    }

    fn toolchain(&self, id: &str) -> Result<&Toolchain, SkeinError> {
        match self.outputs.get(id) {
            Some(Output::Toolchain(toolchain)) => Ok(toolchain),
            _ => Err(missing(id)),
        }
    }

    fn classpath(&self, id: &str) -> Result<&[Library], SkeinError> {
        match self.outputs.get(id) {
            Some(Output::Classpath(libraries)) => Ok(libraries),
            _ => Err(missing(id)),
        }
    }

    fn merged(&self, id: &str) -> Result<&MergedUnit, SkeinError> {
        match self.outputs.get(id) {
            Some(Output::Merged(unit)) => Ok(unit),
            _ => Err(missing(id)),
        }
    }

    fn directory(&self, id: &str) -> Result<(&Path, &ContentHash), SkeinError> {
        match self.outputs.get(id) {
            Some(Output::Directory { path, fingerprint }) => Ok((path, fingerprint)),
            _ => Err(missing(id)),
        }
    }
}

fn is_toolchain(plan: &BuildPlan, id: &str) -> bool {
    matches!(plan.graph.get(id), Some(Target::Toolchain { .. }))
}

/// Last segment of a target id (`compile:main:1a2b3c4d` -> `1a2b3c4d`)
fn short_id(id: &str) -> &str {
    id.rsplit(':').next().unwrap_or(id)
}

fn stamp_path(build_dir: &Path, id: &str) -> PathBuf {
    build_dir.join("stamps").join(id.replace(':', "-"))
}

fn is_up_to_date(build_dir: &Path, id: &str, output: &Path, fingerprint: &ContentHash) -> bool {
    output.is_dir()
        && fs::read_to_string(stamp_path(build_dir, id))
            .map(|stamp| fingerprint.matches_stamp(&stamp))
            .unwrap_or(false)
}

fn write_stamp(build_dir: &Path, id: &str, fingerprint: &ContentHash) -> Result<(), SkeinError> {
    let path = stamp_path(build_dir, id);
    atomic_write(&path, fingerprint.as_str().as_bytes()).map_err(|e| SkeinError::io(&path, e))
}

/// sha-256 over relative paths and contents of a merged unit
fn unit_fingerprint<'u>(
    fp: &mut Fingerprint,
    files: impl Iterator<Item = &'u MergedFile>,
) -> Result<(), SkeinError> {
    for file in files {
        let content = fs::read(&file.path).map_err(|e| SkeinError::io(&file.path, e))?;
        fp.push(file.relative.to_string_lossy().as_bytes());
        fp.push(ContentHash::of(&content).as_str());
    }
    Ok(())
}

/// Build use case - evaluates the target graph for a project
pub struct BuildUseCase {
    ports: BuildPorts,
    events: Arc<dyn BuildEventSink>,
    cancel: CancellationToken,
}

impl BuildUseCase {
    pub fn new(ports: BuildPorts) -> Self {
        Self {
            ports,
            events: Arc::new(NoopEventSink),
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_events(mut self, events: Arc<dyn BuildEventSink>) -> Self {
        self.events = events;
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Build the requested applications.
    ///
    /// Returns `Err` only when nothing could be attempted (bad selection,
    /// locked output). Per-application failures are in the report.
    pub fn execute(
        &self,
        project: &Project,
        options: &BuildOptions,
    ) -> Result<BuildReport, SkeinError> {
        let plan =
            BuildPlanner::new(project, options.plan_options()).plan(&options.applications)?;

        fs::create_dir_all(&options.build_dir)
            .map_err(|e| SkeinError::io(&options.build_dir, e))?;
        let _lock = OutputLock::acquire(&options.build_dir)?;

        let mut owners: HashMap<String, Vec<String>> = HashMap::new();
        let mut toolchains = HashMap::new();
        for application in &plan.applications {
            let goals: Vec<&str> = application.goals.iter().map(String::as_str).collect();
            for id in plan.graph.closure(&goals)? {
                if is_toolchain(&plan, &id) {
                    toolchains.insert(application.name.clone(), id.clone());
                }
                owners.entry(id).or_default().push(application.name.clone());
            }
        }

        self.events.on_event(BuildEvent::Started {
            command: options.mode.as_str().to_string(),
            applications: plan.applications.iter().map(|a| a.name.clone()).collect(),
        });
        tracing::info!(
            mode = options.mode.as_str(),
            targets = plan.graph.len(),
            applications = plan.applications.len(),
            build_dir = %options.build_dir.display(),
            "evaluating build plan"
        );

        let mut state = Evaluation {
            project,
            options,
            plan: &plan,
            owners,
            toolchains,
            fetches: FetchCache::new(&*self.ports.resolver),
            outputs: HashMap::new(),
            failed: HashMap::new(),
            report: BuildReport::default(),
        };

        // Toolchains have no dependencies, so hoisting them keeps the order valid
        let (mut order, rest): (Vec<String>, Vec<String>) = plan
            .graph
            .topological_order()?
            .into_iter()
            .map(String::from)
            .partition(|id| is_toolchain(&plan, id));
        order.extend(rest);

        for id in &order {
            if self.cancel.is_cancelled() {
                state.report.cancelled = true;
                break;
            }
            if self.skip_if_blocked(&mut state, id)? {
                continue;
            }

            let target = plan.graph.get(id).ok_or_else(|| missing(id))?;
            let span = tracing::info_span!("target", id = %id, kind = target.kind());
            let _entered = span.enter();
            self.events.on_event(BuildEvent::TargetStarted { target: id.clone() });

            match self.evaluate(&state, id, target) {
                Ok(Step::Ran(output)) => {
                    state.outputs.insert(id.clone(), output);
                    state.report.executed.push(id.clone());
                    self.events.on_event(BuildEvent::TargetFinished { target: id.clone() });
                }
                Ok(Step::UpToDate(output)) => {
                    tracing::debug!("up to date");
                    state.outputs.insert(id.clone(), output);
                    state.report.up_to_date.push(id.clone());
                    self.events.on_event(BuildEvent::TargetSkipped {
                        target: id.clone(),
                        reason: "up to date".into(),
                    });
                }
                Err(SkeinError::Cancelled) => {
                    tracing::warn!("cancelled");
                    state.report.cancelled = true;
                    break;
                }
                Err(error) => {
                    tracing::error!(error = %error, "target failed");
                    state.failed.insert(id.clone(), id.clone());
                    state.report.failures.push(TargetFailure {
                        target: id.clone(),
                        error,
                    });
                }
            }
        }

        self.conclude(state)
    }

    /// Build (tests skipped) and launch one application from its install image.
    pub fn run(
        &self,
        project: &Project,
        options: &BuildOptions,
        application: &str,
        args: &[String],
    ) -> Result<i32, SkeinError> {
        let descriptor = project.applications().require(application)?;
        let options = options
            .clone()
            .with_mode(BuildMode::Run)
            .with_applications(vec![application.to_string()]);

        let report = self.execute(project, &options)?.into_result()?;
        let outcome = report
            .application(application)
            .ok_or_else(|| missing(&format!("package:{}", application)))?;
        let (Some(install), Some(toolchain)) = (&outcome.install, &outcome.toolchain) else {
            return Err(missing(&format!("package:{}", application)));
        };

        let manifest = LaunchManifest::read(install)?;
        let args = if args.is_empty() {
            descriptor.args().to_vec()
        } else {
            args.to_vec()
        };
        let request = LaunchRequest {
            toolchain: toolchain.clone(),
            classpath: manifest.classpath_in(install),
            entry_point: descriptor.entry_point().clone(),
            jvm_args: descriptor.jvm_args().to_vec(),
            args,
            working_dir: project.root().to_path_buf(),
        };
        tracing::info!(application, entry_point = %request.entry_point, "launching");
        Ok(self.ports.launcher.launch(&request, &self.cancel)?)
    }

    fn skip_if_blocked(&self, state: &mut Evaluation<'_>, id: &str) -> Result<bool, SkeinError> {
        let cause = state
            .plan
            .graph
            .dependencies_of(id)?
            .into_iter()
            .find_map(|dependency| state.failed.get(dependency).cloned())
            .or_else(|| state.unprovisioned(id));

        let Some(cause) = cause else {
            return Ok(false);
        };
        tracing::debug!(id, blocked_by = %cause, "skipping");
        self.events.on_event(BuildEvent::TargetSkipped {
            target: id.to_string(),
            reason: format!("blocked by {}", cause),
        });
        state.failed.insert(id.to_string(), cause);
        Ok(true)
    }

    fn evaluate(
        &self,
        state: &Evaluation<'_>,
        id: &str,
        target: &Target,
    ) -> Result<Step, SkeinError> {
        match target {
            Target::Toolchain { version } => {
                let toolchain = self.ports.toolchains.provision(*version)?;
                self.events.on_event(BuildEvent::ToolchainSelected {
                    application: state.owners(id),
                    version: version.major(),
                    home: toolchain.home.clone(),
                });
                Ok(Step::Ran(Output::Toolchain(toolchain)))
            }

            Target::Resolve {
                classpath,
                dependencies,
            } => {
                let libraries = resolve_classpath(state.project, dependencies, &state.fetches)?;
                tracing::debug!(classpath = %classpath, libraries = libraries.len(), "resolved");
                self.events.on_event(BuildEvent::Resolved {
                    application: state.owners(id),
                    classpath: *classpath,
                    libraries: libraries.len(),
                });
                Ok(Step::Ran(Output::Classpath(libraries)))
            }

            Target::Merge {
                scope,
                kind,
                roots,
                excludes,
            } => {
                let merger = SourceSetMerger::new(&*self.ports.scanner, &state.options.duplicates);
                let unit = merger.merge(*scope, *kind, state.project.root(), roots, excludes)?;
                self.events.on_event(BuildEvent::Merged {
                    application: state.owners(id),
                    scope: *scope,
                    kind: kind.as_str().to_string(),
                    files: unit.len(),
                    dropped: unit.dropped.len(),
                });
                if self.events.wants_detailed_events() {
                    for duplicate in &unit.dropped {
                        self.events.on_event(BuildEvent::DuplicateDropped {
                            relative: duplicate.relative.clone(),
                            kept: duplicate.kept.clone(),
                            dropped: duplicate.dropped.clone(),
                        });
                    }
                }
                Ok(Step::Ran(Output::Merged(unit)))
            }

            Target::ProcessResources { scope, merge } => {
                let unit = state.merged(merge)?;
                let mut fp = Fingerprint::new().field(scope.as_str());
                unit_fingerprint(&mut fp, unit.files())?;
                let fingerprint = fp.finish();

                let dest = state
                    .options
                    .build_dir
                    .join("resources")
                    .join(scope.as_str())
                    .join(short_id(id));
                let output = Output::Directory {
                    path: dest.clone(),
                    fingerprint: fingerprint.clone(),
                };
                if is_up_to_date(&state.options.build_dir, id, &dest, &fingerprint) {
                    return Ok(Step::UpToDate(output));
                }

                let staging = Staging::new(&dest).map_err(|e| SkeinError::io(&dest, e))?;
                for file in unit.files() {
                    let to = staging.path().join(&file.relative);
                    copy_file(&file.path, &to).map_err(|e| SkeinError::io(&file.path, e))?;
                }
                self.publish(staging, &state.options.build_dir, id, &fingerprint)?;
                Ok(Step::Ran(output))
            }

            Target::Compile {
                scope,
                release,
                sources,
                classpath,
                toolchain,
                main_classes,
            } => {
                let toolchain = state.toolchain(toolchain)?;
                let unit = state.merged(sources)?;
                let libraries = state.classpath(classpath)?;
                let main = main_classes
                    .as_deref()
                    .map(|main| state.directory(main))
                    .transpose()?;

                let mut fp = Fingerprint::new()
                    .field(scope.as_str())
                    .field(release.to_string())
                    .field(toolchain.home.to_string_lossy().as_bytes());
                let extensions = self.ports.compiler.source_extensions();
                unit_fingerprint(&mut fp, unit.files_with_extensions(extensions))?;
                let mut entries = Vec::with_capacity(libraries.len() + 1);
                if let Some((path, fingerprint)) = main {
                    fp.push(fingerprint.as_str());
                    entries.push(path.to_path_buf());
                }
                for library in libraries {
                    fp.push(library.path.to_string_lossy().as_bytes());
                    entries.push(library.path.clone());
                }
                let fingerprint = fp.finish();

                let dest = state
                    .options
                    .build_dir
                    .join("classes")
                    .join(scope.as_str())
                    .join(short_id(id));
                let output = Output::Directory {
                    path: dest.clone(),
                    fingerprint: fingerprint.clone(),
                };
                if is_up_to_date(&state.options.build_dir, id, &dest, &fingerprint) {
                    return Ok(Step::UpToDate(output));
                }

                let staging = Staging::new(&dest).map_err(|e| SkeinError::io(&dest, e))?;
                let sources: Vec<PathBuf> = unit
                    .files_with_extensions(extensions)
                    .map(|f| f.path.clone())
                    .collect();
                if sources.is_empty() {
                    tracing::debug!("no sources to compile");
                } else {
                    let request = CompileRequest {
                        toolchain: toolchain.clone(),
                        release: *release,
                        sources,
                        classpath: entries,
                        output_dir: staging.path().to_path_buf(),
                    };
                    self.ports.compiler.compile(&request, &self.cancel)?;
                }
                self.publish(staging, &state.options.build_dir, id, &fingerprint)?;
                Ok(Step::Ran(output))
            }

            Target::VerifyEntryPoint {
                application,
                entry_point,
                sources,
            } => {
                let found = verify_entry_point(
                    application,
                    entry_point,
                    state.merged(sources)?,
                    self.ports.compiler.source_extensions(),
                )?;
                tracing::debug!(
                    entry_point = %entry_point,
                    source = %found.display(),
                    "entry point found"
                );
                Ok(Step::Ran(Output::Verified))
            }

            Target::Test {
                application,
                toolchain,
                classpath,
                main_classes,
                main_resources,
                test_classes,
                test_resources,
            } => {
                let (test_dir, _) = state.directory(test_classes)?;
                let mut entries = vec![
                    test_dir.to_path_buf(),
                    state.directory(test_resources)?.0.to_path_buf(),
                    state.directory(main_classes)?.0.to_path_buf(),
                    state.directory(main_resources)?.0.to_path_buf(),
                ];
                entries.extend(state.classpath(classpath)?.iter().map(|l| l.path.clone()));

                let mut jvm_args = state.options.test_jvm_args.clone();
                if let Some(descriptor) = state.project.applications().get(application) {
                    jvm_args.extend(descriptor.jvm_args().iter().cloned());
                }
                let request = TestRequest {
                    toolchain: state.toolchain(toolchain)?.clone(),
                    classpath: entries,
                    test_classes: test_dir.to_path_buf(),
                    jvm_args,
                };
                let report = self.ports.test_runner.run(&request, &self.cancel)?;
                self.events.on_event(BuildEvent::TestsFinished {
                    application: application.clone(),
                    total: report.total,
                    failed: report.failed,
                });

                if !report.passed() {
                    if !state.options.continue_on_test_failure {
                        return Err(SkeinError::TestFailure {
                            application: application.clone(),
                            failed: report.failed,
                            total: report.total,
                        });
                    }
                    tracing::warn!(
                        application = %application,
                        failed = report.failed,
                        "tests failed, continuing"
                    );
                }
                Ok(Step::Ran(Output::Tested(TestSummary {
                    total: report.total,
                    failed: report.failed,
                })))
            }

            Target::Package {
                application,
                toolchain,
                classpath,
                classes,
                resources,
            } => {
                let path = self.package(
                    state,
                    application,
                    state.toolchain(toolchain)?,
                    state.classpath(classpath)?,
                    state.directory(classes)?.0,
                    state.directory(resources)?.0,
                )?;
                self.events.on_event(BuildEvent::Packaged {
                    application: application.clone(),
                    path: path.clone(),
                });
                Ok(Step::Ran(Output::Packaged(path)))
            }
        }
    }

    fn publish(
        &self,
        staging: Staging,
        build_dir: &Path,
        id: &str,
        fingerprint: &ContentHash,
    ) -> Result<(), SkeinError> {
        if self.cancel.is_cancelled() {
            return Err(SkeinError::Cancelled);
        }
        let dest = staging.destination().to_path_buf();
        staging.publish().map_err(|e| SkeinError::io(&dest, e))?;
        write_stamp(build_dir, id, fingerprint)
    }

    /// Assemble and publish `<build_dir>/install/<application>/`
    fn package(
        &self,
        state: &Evaluation<'_>,
        application: &str,
        toolchain: &Toolchain,
        libraries: &[Library],
        classes: &Path,
        resources: &Path,
    ) -> Result<PathBuf, SkeinError> {
        let descriptor = state.project.applications().require(application)?;
        let dest = state.options.install_dir(application);
        let staging = Staging::new(&dest).map_err(|e| SkeinError::io(&dest, e))?;
        let root = staging.path();

        copy_tree(classes, &root.join("classes")).map_err(|e| SkeinError::io(classes, e))?;
        copy_tree(resources, &root.join("resources")).map_err(|e| SkeinError::io(resources, e))?;

        let mut classpath = vec!["classes".to_string(), "resources".to_string()];
        let lib_dir = root.join("lib");
        fs::create_dir_all(&lib_dir).map_err(|e| SkeinError::io(&lib_dir, e))?;
        for library in libraries {
            let file_name = library
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| format!("{}.jar", library.coordinate.artifact()));
            let mut name = file_name.clone();
            if lib_dir.join(&name).exists() {
                name = format!("{}-{}", library.coordinate.group(), file_name);
            }
            copy_file(&library.path, &lib_dir.join(&name))
                .map_err(|e| SkeinError::io(&library.path, e))?;
            classpath.push(format!("lib/{}", name));
        }

        LaunchManifest {
            application: application.to_string(),
            entry_point: descriptor.entry_point().to_string(),
            java_version: toolchain.version.major(),
            toolchain_home: toolchain.home.clone(),
            classpath,
            jvm_args: descriptor.jvm_args().to_vec(),
            args: descriptor.args().to_vec(),
            built_at: chrono::Utc::now().to_rfc3339(),
            project: state.project.metadata.clone(),
        }
        .write(root)?;

        if self.cancel.is_cancelled() {
            return Err(SkeinError::Cancelled);
        }
        staging.publish().map_err(|e| SkeinError::io(&dest, e))
    }

    fn conclude(&self, state: Evaluation<'_>) -> Result<BuildReport, SkeinError> {
        let Evaluation {
            project,
            plan,
            outputs,
            mut report,
            ..
        } = state;

        for application in &plan.applications {
            let goals: Vec<&str> = application.goals.iter().map(String::as_str).collect();
            let closure = plan.graph.closure(&goals)?;

            let failure = report.failures.iter().find(|f| closure.contains(&f.target));
            let status = match failure {
                Some(failure) => ApplicationStatus::Failed {
                    target: failure.target.clone(),
                    message: failure.error.to_string(),
                },
                None if goals.iter().all(|g| outputs.contains_key(*g)) => {
                    ApplicationStatus::Succeeded
                }
                None => ApplicationStatus::Cancelled,
            };

            if let ApplicationStatus::Failed { message, .. } = &status {
                self.events.on_event(BuildEvent::ApplicationFailed {
                    application: application.name.clone(),
                    error: message.clone(),
                });
            }

            let tests = match outputs.get(&format!("test:{}", application.name)) {
                Some(Output::Tested(summary)) => Some(*summary),
                _ => None,
            };
            let install = match outputs.get(&format!("package:{}", application.name)) {
                Some(Output::Packaged(path)) => Some(path.clone()),
                _ => None,
            };
            let toolchain = project
                .applications()
                .get(&application.name)
                .and_then(|d| match outputs.get(&format!("toolchain:{}", d.runtime_version())) {
                    Some(Output::Toolchain(toolchain)) => Some(toolchain.clone()),
                    _ => None,
                });

            report.applications.push(ApplicationOutcome {
                name: application.name.clone(),
                status,
                tests,
                install,
                toolchain,
            });
        }

        self.events.on_event(BuildEvent::Completed {
            succeeded: report.succeeded(),
            failed: report.failed(),
        });
        tracing::info!(
            succeeded = report.succeeded(),
            failed = report.failed(),
            cancelled = report.cancelled,
            "build finished"
        );
        Ok(report)
    }
}
