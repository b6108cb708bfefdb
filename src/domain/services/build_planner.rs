//! Build planner
//!
//! Expands the requested applications into a graph of targets. Target ids
//! are fingerprints of their declared inputs, so when two applications ask
//! for the same merge, classpath or compilation the graph holds one node
//! and it is evaluated once per invocation. Only targets reachable from a
//! requested application are planned.

use std::path::PathBuf;

use crate::domain::entities::{ApplicationDescriptor, Project, RegistryError, UnitKind};
use crate::domain::services::{GraphError, TargetGraph};
use crate::domain::value_objects::{
    ClasspathKind, EntryPoint, ExcludePatterns, Fingerprint, LanguageVersion, SourceScope,
};

#[derive(Debug, Clone)]
pub enum Target {
    Toolchain {
        version: LanguageVersion,
    },
    Resolve {
        classpath: ClasspathKind,
        /// Declaration names, in declaration order
        dependencies: Vec<String>,
    },
    Merge {
        scope: SourceScope,
        kind: UnitKind,
        roots: Vec<PathBuf>,
        excludes: ExcludePatterns,
    },
    ProcessResources {
        scope: SourceScope,
        merge: String,
    },
    Compile {
        scope: SourceScope,
        release: LanguageVersion,
        sources: String,
        classpath: String,
        toolchain: String,
        /// Main classes a test compilation builds against
        main_classes: Option<String>,
    },
    VerifyEntryPoint {
        application: String,
        entry_point: EntryPoint,
        sources: String,
    },
    Test {
        application: String,
        toolchain: String,
        classpath: String,
        main_classes: String,
        main_resources: String,
        test_classes: String,
        test_resources: String,
    },
    Package {
        application: String,
        toolchain: String,
        classpath: String,
        classes: String,
        resources: String,
    },
}

impl Target {
    /// Short kind name used in events and logs
    pub fn kind(&self) -> &'static str {
        match self {
            Target::Toolchain { .. } => "toolchain",
            Target::Resolve { .. } => "resolve",
            Target::Merge { .. } => "merge",
            Target::ProcessResources { .. } => "resources",
            Target::Compile { .. } => "compile",
            Target::VerifyEntryPoint { .. } => "verify",
            Target::Test { .. } => "test",
            Target::Package { .. } => "package",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanOptions {
    /// Plan the test phase for descriptors that have test sources
    pub tests: bool,
    /// Plan the install image
    pub package: bool,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            tests: true,
            package: true,
        }
    }
}

/// The targets one application needs to succeed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationPlan {
    pub name: String,
    pub goals: Vec<String>,
}

#[derive(Debug)]
pub struct BuildPlan {
    pub graph: TargetGraph<Target>,
    pub applications: Vec<ApplicationPlan>,
}

impl BuildPlan {
    pub fn application(&self, name: &str) -> Option<&ApplicationPlan> {
        self.applications.iter().find(|a| a.name == name)
    }

    /// How many applications reach each target
    pub fn sharing(&self, id: &str) -> usize {
        self.applications
            .iter()
            .filter(|a| {
                let goals: Vec<&str> = a.goals.iter().map(String::as_str).collect();
                self.graph
                    .closure(&goals)
                    .map(|c| c.contains(id))
                    .unwrap_or(false)
            })
            .count()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

pub struct BuildPlanner<'a> {
    project: &'a Project,
    options: PlanOptions,
    graph: TargetGraph<Target>,
}

impl<'a> BuildPlanner<'a> {
    pub fn new(project: &'a Project, options: PlanOptions) -> Self {
        Self {
            project,
            options,
            graph: TargetGraph::new(),
        }
    }

    /// Plan `names` (every registered application when empty).
    pub fn plan(mut self, names: &[String]) -> Result<BuildPlan, PlanError> {
        let registry = self.project.applications();
        let selected: Vec<&ApplicationDescriptor> = if names.is_empty() {
            registry.iter().collect()
        } else {
            names
                .iter()
                .map(|n| registry.require(n))
                .collect::<Result<_, _>>()?
        };

        let mut applications = Vec::with_capacity(selected.len());
        for descriptor in selected {
            if applications
                .iter()
                .any(|a: &ApplicationPlan| a.name == descriptor.name())
            {
                continue;
            }
            let goals = self.plan_application(descriptor)?;
            applications.push(ApplicationPlan {
                name: descriptor.name().to_string(),
                goals,
            });
        }

        Ok(BuildPlan {
            graph: self.graph,
            applications,
        })
    }

    fn plan_application(
        &mut self,
        descriptor: &ApplicationDescriptor,
    ) -> Result<Vec<String>, PlanError> {
        let name = descriptor.name().to_string();
        let toolchain = self.toolchain(descriptor.runtime_version());

        let main_sources = self.merge(descriptor, SourceScope::Main, UnitKind::Sources);
        let verify = format!("verify:{}", name);
        self.graph.add_target(
            verify.clone(),
            Target::VerifyEntryPoint {
                application: name.clone(),
                entry_point: descriptor.entry_point().clone(),
                sources: main_sources.clone(),
            },
        );
        self.graph.add_dependency(&main_sources, &verify)?;

        let main_resources = self.merge(descriptor, SourceScope::Main, UnitKind::Resources);
        let main_resources = self.resources(SourceScope::Main, &main_resources)?;
        let compile_cp = self.resolve(descriptor, ClasspathKind::MainCompile);
        let main_classes = self.compile(
            SourceScope::Main,
            descriptor.runtime_version(),
            &main_sources,
            &compile_cp,
            &toolchain,
            None,
        )?;

        let mut goals = vec![verify.clone(), main_classes.clone()];

        if self.options.tests && descriptor.has_tests() {
            let test_sources = self.merge(descriptor, SourceScope::Test, UnitKind::Sources);
            let test_resources = self.merge(descriptor, SourceScope::Test, UnitKind::Resources);
            let test_resources = self.resources(SourceScope::Test, &test_resources)?;
            let test_compile_cp = self.resolve(descriptor, ClasspathKind::TestCompile);
            let test_runtime_cp = self.resolve(descriptor, ClasspathKind::TestRuntime);
            let test_classes = self.compile(
                SourceScope::Test,
                descriptor.runtime_version(),
                &test_sources,
                &test_compile_cp,
                &toolchain,
                Some(&main_classes),
            )?;

            let test = format!("test:{}", name);
            self.graph.add_target(
                test.clone(),
                Target::Test {
                    application: name.clone(),
                    toolchain: toolchain.clone(),
                    classpath: test_runtime_cp.clone(),
                    main_classes: main_classes.clone(),
                    main_resources: main_resources.clone(),
                    test_classes: test_classes.clone(),
                    test_resources: test_resources.clone(),
                },
            );
            for upstream in [
                &toolchain,
                &test_runtime_cp,
                &main_resources,
                &test_classes,
                &test_resources,
            ] {
                self.graph.add_dependency(upstream, &test)?;
            }
            goals.push(test);
        }

        if self.options.package {
            let runtime_cp = self.resolve(descriptor, ClasspathKind::MainRuntime);
            let package = format!("package:{}", name);
            self.graph.add_target(
                package.clone(),
                Target::Package {
                    application: name.clone(),
                    toolchain: toolchain.clone(),
                    classpath: runtime_cp.clone(),
                    classes: main_classes.clone(),
                    resources: main_resources.clone(),
                },
            );
            for upstream in [&toolchain, &runtime_cp, &verify, &main_classes, &main_resources] {
                self.graph.add_dependency(upstream, &package)?;
            }
            // A failed test phase blocks packaging
            for goal in &goals {
                if goal.starts_with("test:") {
                    self.graph.add_dependency(goal, &package)?;
                }
            }
            goals.push(package);
        }

        Ok(goals)
    }

    fn toolchain(&mut self, version: LanguageVersion) -> String {
        let id = format!("toolchain:{}", version);
        self.graph.add_target(id.clone(), Target::Toolchain { version });
        id
    }

    fn resolve(&mut self, descriptor: &ApplicationDescriptor, kind: ClasspathKind) -> String {
        let dependencies: Vec<String> = self
            .project
            .dependencies()
            .classpath(kind, descriptor.dependencies())
            .map(|d| d.name.clone())
            .collect();

        let mut fp = Fingerprint::new().field(kind.as_str());
        for name in &dependencies {
            fp.push(name);
        }
        let id = format!("resolve:{}:{}", kind, fp.finish().short());
        self.graph.add_target(
            id.clone(),
            Target::Resolve {
                classpath: kind,
                dependencies,
            },
        );
        id
    }

    fn merge(
        &mut self,
        descriptor: &ApplicationDescriptor,
        scope: SourceScope,
        kind: UnitKind,
    ) -> String {
        let roots = descriptor.roots(scope, kind).to_vec();
        let excludes = descriptor.excludes().clone();

        let mut fp = Fingerprint::new().field(scope.as_str()).field(kind.as_str());
        fp.push(roots.len().to_string());
        for root in &roots {
            fp.push(root.to_string_lossy().as_bytes());
        }
        for pattern in excludes.patterns() {
            fp.push(pattern);
        }
        let id = format!("merge:{}:{}:{}", scope, kind.as_str(), fp.finish().short());
        self.graph.add_target(
            id.clone(),
            Target::Merge {
                scope,
                kind,
                roots,
                excludes,
            },
        );
        id
    }

    fn resources(&mut self, scope: SourceScope, merge: &str) -> Result<String, PlanError> {
        let short = merge.rsplit(':').next().unwrap_or(merge);
        let id = format!("resources:{}:{}", scope, short);
        if self.graph.add_target(
            id.clone(),
            Target::ProcessResources {
                scope,
                merge: merge.to_string(),
            },
        ) {
            self.graph.add_dependency(merge, &id)?;
        }
        Ok(id)
    }

    fn compile(
        &mut self,
        scope: SourceScope,
        release: LanguageVersion,
        sources: &str,
        classpath: &str,
        toolchain: &str,
        main_classes: Option<&str>,
    ) -> Result<String, PlanError> {
        let fp = Fingerprint::new()
            .field(scope.as_str())
            .field(release.to_string())
            .field(sources)
            .field(classpath)
            .field(toolchain)
            .field(main_classes.unwrap_or(""));
        let id = format!("compile:{}:{}", scope, fp.finish().short());

        let inserted = self.graph.add_target(
            id.clone(),
            Target::Compile {
                scope,
                release,
                sources: sources.to_string(),
                classpath: classpath.to_string(),
                toolchain: toolchain.to_string(),
                main_classes: main_classes.map(String::from),
            },
        );
        if inserted {
            self.graph.add_dependency(toolchain, &id)?;
            self.graph.add_dependency(classpath, &id)?;
            self.graph.add_dependency(sources, &id)?;
            if let Some(main) = main_classes {
                self.graph.add_dependency(main, &id)?;
            }
        }
        Ok(id)
    }
}
