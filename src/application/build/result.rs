//! Build Result
//!
//! Per-application outcomes of one invocation.

use std::path::PathBuf;

use crate::domain::ports::Toolchain;
use crate::error::SkeinError;

/// A target that failed, with the error it produced
#[derive(Debug)]
pub struct TargetFailure {
    pub target: String,
    pub error: SkeinError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplicationStatus {
    Succeeded,
    /// `target` is the failed target this application depended on
    Failed { target: String, message: String },
    /// The invocation was cancelled before this application finished
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestSummary {
    pub total: usize,
    pub failed: usize,
}

#[derive(Debug, Clone)]
pub struct ApplicationOutcome {
    pub name: String,
    pub status: ApplicationStatus,
    pub tests: Option<TestSummary>,
    /// Published install image
    pub install: Option<PathBuf>,
    pub toolchain: Option<Toolchain>,
}

impl ApplicationOutcome {
    pub fn is_success(&self) -> bool {
        self.status == ApplicationStatus::Succeeded
    }
}

/// Result of a build invocation
#[derive(Debug, Default)]
pub struct BuildReport {
    pub applications: Vec<ApplicationOutcome>,
    /// Failed targets in evaluation order
    pub failures: Vec<TargetFailure>,
    /// Targets that ran
    pub executed: Vec<String>,
    /// Compile targets whose stamp matched
    pub up_to_date: Vec<String>,
    pub cancelled: bool,
}

impl BuildReport {
    pub fn is_success(&self) -> bool {
        !self.cancelled && self.failures.is_empty()
    }

    pub fn succeeded(&self) -> usize {
        self.applications.iter().filter(|a| a.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.applications.len() - self.succeeded()
    }

    pub fn application(&self, name: &str) -> Option<&ApplicationOutcome> {
        self.applications.iter().find(|a| a.name == name)
    }

    /// The first fatal cause, in evaluation order
    pub fn first_error(&self) -> Option<&SkeinError> {
        self.failures.first().map(|f| &f.error)
    }

    /// Exit status for the invocation: cancellation wins, then the first failure.
    pub fn exit_code(&self) -> i32 {
        if self.cancelled {
            return SkeinError::Cancelled.exit_code();
        }
        self.first_error().map_or(0, SkeinError::exit_code)
    }

    /// `Err` with the first fatal cause when anything failed
    pub fn into_result(mut self) -> Result<Self, SkeinError> {
        if self.cancelled {
            return Err(SkeinError::Cancelled);
        }
        if self.failures.is_empty() {
            Ok(self)
        } else {
            Err(self.failures.remove(0).error)
        }
    }
}
