//! JUnit Platform console launcher adapter
//!
//! The launcher must be on the test runtime classpath (declare
//! `org.junit.platform:junit-platform-console-standalone` as a
//! `test_runtime_only` dependency).

use std::process::Command;

use crate::domain::ports::{ProcessError, TestReport, TestRequest, TestRunner};
use crate::domain::value_objects::CancellationToken;

use super::{join_classpath, supervise};

pub const DEFAULT_LAUNCHER_MAIN: &str = "org.junit.platform.console.ConsoleLauncher";

#[derive(Debug, Clone)]
pub struct JUnitConsoleRunner {
    launcher_main: String,
}

impl Default for JUnitConsoleRunner {
    fn default() -> Self {
        Self {
            launcher_main: DEFAULT_LAUNCHER_MAIN.to_string(),
        }
    }
}

impl JUnitConsoleRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_launcher_main(mut self, launcher_main: impl Into<String>) -> Self {
        self.launcher_main = launcher_main.into();
        self
    }
}

impl TestRunner for JUnitConsoleRunner {
    fn run(
        &self,
        request: &TestRequest,
        cancel: &CancellationToken,
    ) -> Result<TestReport, ProcessError> {
        let mut cmd = Command::new(request.toolchain.tool("java"));
        cmd.args(&request.jvm_args)
            .arg("-cp")
            .arg(join_classpath("java", &request.classpath)?)
            .arg(&self.launcher_main)
            .arg("execute")
            .arg("--disable-banner")
            .arg("--details=summary")
            .arg("--scan-classpath")
            .arg(&request.test_classes);

        let finished = supervise("junit", cmd, true, cancel)?;
        let output = format!("{}{}", finished.stdout, finished.stderr);
        let (total, mut failed) = parse_summary(&output);
        if !finished.status.success() && failed == 0 {
            // Launcher failure without a parsable summary
            failed = 1;
        }
        Ok(TestReport {
            total,
            failed,
            output,
        })
    }
}

/// `(tests found, tests failed)` from the launcher's summary table.
pub fn parse_summary(output: &str) -> (usize, usize) {
    let mut found = 0;
    let mut failed = 0;
    for line in output.lines() {
        let cleaned = line.trim().trim_start_matches('[').trim_end_matches(']');
        let mut words = cleaned.split_whitespace();
        let (Some(count), Some("tests"), Some(kind)) = (words.next(), words.next(), words.next())
        else {
            continue;
        };
        let Ok(count) = count.parse::<usize>() else {
            continue;
        };
        match kind {
            "found" => found = count,
            "failed" => failed = count,
            _ => {}
        }
    }
    (found, failed)
}
