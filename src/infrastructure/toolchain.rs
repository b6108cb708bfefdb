//! Local JDK discovery
//!
//! A JDK home qualifies when it has `bin/javac` and its `release` file
//! reports the requested major version. Candidates are, in order: homes
//! configured explicitly, every directory directly below the configured
//! search paths, then `JAVA_HOME` when the caller passes it in.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::ports::{Toolchain, ToolchainError, ToolchainProvider};
use crate::domain::value_objects::LanguageVersion;

#[derive(Debug, Clone, Default)]
pub struct LocalToolchains {
    homes: Vec<PathBuf>,
    search_paths: Vec<PathBuf>,
    java_home: Option<PathBuf>,
}

impl LocalToolchains {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_homes(mut self, homes: Vec<PathBuf>) -> Self {
        self.homes = homes;
        self
    }

    pub fn with_search_paths(mut self, search_paths: Vec<PathBuf>) -> Self {
        self.search_paths = search_paths;
        self
    }

    pub fn with_java_home(mut self, java_home: Option<PathBuf>) -> Self {
        self.java_home = java_home;
        self
    }

    fn candidates(&self) -> Vec<PathBuf> {
        let mut out = self.homes.clone();
        for search in &self.search_paths {
            let Ok(entries) = fs::read_dir(search) else {
                continue;
            };
            let mut found: Vec<PathBuf> = entries
                .filter_map(Result::ok)
                .map(|e| e.path())
                .filter(|p| p.is_dir())
                .collect();
            found.sort();
            out.extend(found);
        }
        if let Some(home) = &self.java_home {
            out.push(home.clone());
        }
        out
    }
}

/// Major version of the JDK at `home`, read from its `release` file.
pub fn detect_version(home: &Path) -> Option<LanguageVersion> {
    let release = fs::read_to_string(home.join("release")).ok()?;
    release.lines().find_map(|line| {
        let value = line.strip_prefix("JAVA_VERSION=")?;
        LanguageVersion::parse_release(value)
    })
}

impl ToolchainProvider for LocalToolchains {
    fn provision(&self, version: LanguageVersion) -> Result<Toolchain, ToolchainError> {
        let candidates = self.candidates();
        for home in &candidates {
            let toolchain = Toolchain::new(version, home.clone());
            if !toolchain.tool("javac").is_file() {
                continue;
            }
            match detect_version(home) {
                Some(found) if found == version => {
                    tracing::debug!(home = %home.display(), %version, "selected toolchain");
                    return Ok(toolchain);
                }
                found => {
                    tracing::trace!(home = %home.display(), ?found, "toolchain does not match");
                }
            }
        }
        Err(ToolchainError::Unavailable {
            version,
            searched: candidates,
        })
    }
}
