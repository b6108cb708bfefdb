//! Dependency coordinate value object
//!
//! `group:artifact[:version]`. The version may be omitted when a managed
//! version (platform / BOM) supplies it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Coordinate {
    group: String,
    artifact: String,
    version: Option<String>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid coordinate '{input}': {reason}")]
pub struct CoordinateParseError {
    pub input: String,
    pub reason: &'static str,
}

impl Coordinate {
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: Option<String>,
    ) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version,
        }
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn artifact(&self) -> &str {
        &self.artifact
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// `group:artifact`, the key used for conflict detection and managed versions
    pub fn module(&self) -> String {
        format!("{}:{}", self.group, self.artifact)
    }

    pub fn with_version(&self, version: impl Into<String>) -> Self {
        Self {
            group: self.group.clone(),
            artifact: self.artifact.clone(),
            version: Some(version.into()),
        }
    }
}

fn valid_part(part: &str) -> bool {
    !part.is_empty() && !part.chars().any(|c| c.is_whitespace() || c == '/' || c == '\\')
}

impl FromStr for Coordinate {
    type Err = CoordinateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |reason| CoordinateParseError {
            input: s.to_string(),
            reason,
        };

        let parts: Vec<&str> = s.trim().split(':').collect();
        match parts.as_slice() {
            [group, artifact] | [group, artifact, ""] => {
                if !valid_part(group) || !valid_part(artifact) {
                    return Err(err("group and artifact must be non-empty without spaces"));
                }
                Ok(Coordinate::new(*group, *artifact, None))
            }
            [group, artifact, version] => {
                if !valid_part(group) || !valid_part(artifact) || !valid_part(version) {
                    return Err(err("group, artifact and version must be non-empty without spaces"));
                }
                Ok(Coordinate::new(*group, *artifact, Some(version.to_string())))
            }
            _ => Err(err("expected group:artifact or group:artifact:version")),
        }
    }
}

impl TryFrom<String> for Coordinate {
    type Error = CoordinateParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Coordinate> for String {
    fn from(value: Coordinate) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(v) => write!(f, "{}:{}:{}", self.group, self.artifact, v),
            None => write!(f, "{}:{}", self.group, self.artifact),
        }
    }
}
