//! Entry point value object
//!
//! A fully qualified class name such as
//! `com.wcc.bootcamp.java.mentorship.MentorshipWebApplication`.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntryPoint(String);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid entry point '{input}': expected a fully qualified class name")]
pub struct EntryPointParseError {
    pub input: String,
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

impl EntryPoint {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Class name without its package
    pub fn simple_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }

    pub fn package(&self) -> Option<&str> {
        self.0.rsplit_once('.').map(|(pkg, _)| pkg)
    }

    /// Relative source path of the compiled unit, one per source extension:
    /// `com.acme.App` + `java` → `com/acme/App.java`
    pub fn source_candidates(&self, extensions: &[String]) -> Vec<PathBuf> {
        let stem: PathBuf = self.0.split('.').collect();
        extensions
            .iter()
            .map(|ext| stem.with_extension(ext))
            .collect()
    }
}

impl FromStr for EntryPoint {
    type Err = EntryPointParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.split('.').all(is_identifier) {
            return Err(EntryPointParseError {
                input: s.to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl TryFrom<String> for EntryPoint {
    type Error = EntryPointParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EntryPoint> for String {
    fn from(value: EntryPoint) -> Self {
        value.0
    }
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
