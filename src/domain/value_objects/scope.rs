//! Scope value objects
//!
//! - `DependencyScope`: the lifecycle phase a dependency declaration applies to
//! - `SourceScope`: which logical compilation unit (main/test) a root feeds
//! - `ClasspathKind`: which scopes are visible on a given classpath

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Scope of a dependency declaration.
///
/// Gradle configuration names are accepted as aliases so existing build
/// scripts translate one-to-one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyScope {
    /// Needed to compile and run main code
    #[serde(alias = "implementation")]
    Compile,
    /// Only present at runtime (e.g. a JDBC driver)
    #[serde(alias = "runtimeOnly")]
    RuntimeOnly,
    /// Needed to compile and run tests
    #[serde(alias = "testImplementation")]
    TestCompile,
    /// Only present when tests execute (e.g. a platform launcher)
    #[serde(alias = "testRuntimeOnly")]
    TestRuntimeOnly,
}

impl DependencyScope {
    pub const ALL: [DependencyScope; 4] = [
        DependencyScope::Compile,
        DependencyScope::RuntimeOnly,
        DependencyScope::TestCompile,
        DependencyScope::TestRuntimeOnly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyScope::Compile => "compile",
            DependencyScope::RuntimeOnly => "runtime_only",
            DependencyScope::TestCompile => "test_compile",
            DependencyScope::TestRuntimeOnly => "test_runtime_only",
        }
    }

    /// Returns true for scopes that only matter when tests run
    pub fn is_test(&self) -> bool {
        matches!(
            self,
            DependencyScope::TestCompile | DependencyScope::TestRuntimeOnly
        )
    }
}

impl fmt::Display for DependencyScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DependencyScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "compile" | "implementation" => Ok(DependencyScope::Compile),
            "runtime_only" | "runtime-only" | "runtimeOnly" => Ok(DependencyScope::RuntimeOnly),
            "test_compile" | "test-compile" | "testImplementation" => {
                Ok(DependencyScope::TestCompile)
            }
            "test_runtime_only" | "test-runtime-only" | "testRuntimeOnly" => {
                Ok(DependencyScope::TestRuntimeOnly)
            }
            other => Err(format!(
                "unknown dependency scope '{}' (expected compile, runtime_only, test_compile or test_runtime_only)",
                other
            )),
        }
    }
}

/// Logical compilation unit a source root contributes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceScope {
    Main,
    Test,
}

impl SourceScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceScope::Main => "main",
            SourceScope::Test => "test",
        }
    }
}

impl fmt::Display for SourceScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four classpaths a JVM build assembles from dependency scopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClasspathKind {
    MainCompile,
    MainRuntime,
    TestCompile,
    TestRuntime,
}

impl ClasspathKind {
    /// Dependency scopes visible on this classpath, in precedence order.
    pub fn scopes(&self) -> &'static [DependencyScope] {
        match self {
            ClasspathKind::MainCompile => &[DependencyScope::Compile],
            ClasspathKind::MainRuntime => &[DependencyScope::Compile, DependencyScope::RuntimeOnly],
            ClasspathKind::TestCompile => &[DependencyScope::Compile, DependencyScope::TestCompile],
            ClasspathKind::TestRuntime => &DependencyScope::ALL,
        }
    }

    pub fn includes(&self, scope: DependencyScope) -> bool {
        self.scopes().contains(&scope)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClasspathKind::MainCompile => "main-compile",
            ClasspathKind::MainRuntime => "main-runtime",
            ClasspathKind::TestCompile => "test-compile",
            ClasspathKind::TestRuntime => "test-runtime",
        }
    }
}

impl fmt::Display for ClasspathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
