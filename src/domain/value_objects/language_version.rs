//! Language/runtime version requested from a toolchain

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Major Java language version (`8`, `17`, `23`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageVersion(u32);

impl LanguageVersion {
    pub fn of(major: u32) -> Self {
        Self(major)
    }

    pub fn major(&self) -> u32 {
        self.0
    }

    /// Parse a version string as found in a JDK `release` file or on the
    /// command line: `23`, `23.0.1`, `1.8.0_392`.
    pub fn parse_release(raw: &str) -> Option<Self> {
        let raw = raw.trim().trim_matches('"');
        let mut parts = raw.split(['.', '_', '+', '-']);
        let first: u32 = parts.next()?.parse().ok()?;
        if first == 1 {
            let second: u32 = parts.next()?.parse().ok()?;
            return Some(Self(second));
        }
        if first == 0 {
            return None;
        }
        Some(Self(first))
    }
}

impl Default for LanguageVersion {
    fn default() -> Self {
        Self(17)
    }
}

impl fmt::Display for LanguageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LanguageVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_release(s).ok_or_else(|| format!("invalid language version '{}'", s))
    }
}
