//! ToolchainProvider port - provisions a JDK for a language version

use std::path::{Path, PathBuf};

use crate::domain::value_objects::LanguageVersion;

/// A provisioned toolchain installation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub version: LanguageVersion,
    pub home: PathBuf,
}

impl Toolchain {
    pub fn new(version: LanguageVersion, home: impl Into<PathBuf>) -> Self {
        Self {
            version,
            home: home.into(),
        }
    }

    /// Path of a tool in `bin/` (`javac`, `java`, ...)
    pub fn tool(&self, name: &str) -> PathBuf {
        let exe = if cfg!(windows) {
            format!("{}.exe", name)
        } else {
            name.to_string()
        };
        self.home.join("bin").join(exe)
    }

    pub fn home(&self) -> &Path {
        &self.home
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ToolchainError {
    #[error("no toolchain for Java {version} (searched: {})", format_searched(searched))]
    Unavailable {
        version: LanguageVersion,
        searched: Vec<PathBuf>,
    },
}

fn format_searched(searched: &[PathBuf]) -> String {
    if searched.is_empty() {
        return "nothing configured".to_string();
    }
    searched
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub trait ToolchainProvider: Send + Sync {
    /// Provision exactly `version`; a newer installation does not satisfy it.
    fn provision(&self, version: LanguageVersion) -> Result<Toolchain, ToolchainError>;
}
