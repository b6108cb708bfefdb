//! Duplicates strategy
//!
//! Governs what happens when two source roots contribute a file at the
//! same relative path. The policy is a trait so the merger can be exercised
//! with any rule; `DuplicatesStrategy` provides the named built-in policies.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Outcome of a single collision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateDecision {
    /// Keep the file already merged, drop the incoming one
    KeepExisting,
    /// Keep the file already merged and report the collision
    KeepExistingWithWarning,
    /// Replace the merged file with the incoming one
    Replace,
    /// Abort the merge
    Reject,
}

/// Pluggable conflict policy for multi-root merges.
pub trait DuplicatesPolicy: Send + Sync {
    /// Decide a collision at `relative` between the root already merged
    /// (`existing_root`) and a later root (`incoming_root`).
    fn decide(&self, relative: &Path, existing_root: &Path, incoming_root: &Path)
        -> DuplicateDecision;

    /// Human-readable policy name (used in diagnostics)
    fn name(&self) -> &str;
}

/// Built-in duplicates strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatesStrategy {
    /// Keep the first occurrence, silently drop the rest
    #[default]
    Exclude,
    /// Reject the build on any collision
    Fail,
    /// Keep the first occurrence and emit a warning
    Warn,
    /// The last declared root wins
    LastWins,
}

impl DuplicatesStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DuplicatesStrategy::Exclude => "exclude",
            DuplicatesStrategy::Fail => "fail",
            DuplicatesStrategy::Warn => "warn",
            DuplicatesStrategy::LastWins => "last_wins",
        }
    }
}

impl DuplicatesPolicy for DuplicatesStrategy {
    fn decide(&self, _relative: &Path, _existing: &Path, _incoming: &Path) -> DuplicateDecision {
        match self {
            DuplicatesStrategy::Exclude => DuplicateDecision::KeepExisting,
            DuplicatesStrategy::Fail => DuplicateDecision::Reject,
            DuplicatesStrategy::Warn => DuplicateDecision::KeepExistingWithWarning,
            DuplicatesStrategy::LastWins => DuplicateDecision::Replace,
        }
    }

    fn name(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for DuplicatesStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DuplicatesStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exclude" => Ok(DuplicatesStrategy::Exclude),
            "fail" => Ok(DuplicatesStrategy::Fail),
            "warn" => Ok(DuplicatesStrategy::Warn),
            "last_wins" | "last-wins" | "lastwins" => Ok(DuplicatesStrategy::LastWins),
            other => Err(format!(
                "unknown duplicates strategy '{}' (expected exclude, fail, warn or last_wins)",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_exclude() {
        assert_eq!(DuplicatesStrategy::default(), DuplicatesStrategy::Exclude);
    }

    #[test]
    fn decisions_match_strategy() {
        let p = Path::new("Foo.java");
        let a = Path::new("a");
        let b = Path::new("b");
        assert_eq!(
            DuplicatesStrategy::Exclude.decide(p, a, b),
            DuplicateDecision::KeepExisting
        );
        assert_eq!(DuplicatesStrategy::Fail.decide(p, a, b), DuplicateDecision::Reject);
        assert_eq!(
            DuplicatesStrategy::Warn.decide(p, a, b),
            DuplicateDecision::KeepExistingWithWarning
        );
        assert_eq!(
            DuplicatesStrategy::LastWins.decide(p, a, b),
            DuplicateDecision::Replace
        );
    }

    #[test]
    fn parses_from_cli_spelling() {
        assert_eq!(
            "LAST-WINS".parse::<DuplicatesStrategy>().unwrap(),
            DuplicatesStrategy::LastWins
        );
        assert!("include".parse::<DuplicatesStrategy>().is_err());
    }
}
