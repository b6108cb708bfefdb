//! `launch.toml` written at the top of every install image

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::entities::ProjectMetadata;
use crate::error::SkeinError;

pub const MANIFEST_FILE: &str = "launch.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchManifest {
    pub application: String,
    pub entry_point: String,
    pub java_version: u32,
    pub toolchain_home: PathBuf,
    /// Entries relative to the install image
    pub classpath: Vec<String>,
    #[serde(default)]
    pub jvm_args: Vec<String>,
    #[serde(default)]
    pub args: Vec<String>,
    /// RFC 3339
    pub built_at: String,
    pub project: ProjectMetadata,
}

impl LaunchManifest {
    pub fn write(&self, install_dir: &Path) -> Result<(), SkeinError> {
        let path = install_dir.join(MANIFEST_FILE);
        let content = toml::to_string(self)
            .map_err(|e| SkeinError::io(&path, std::io::Error::other(e.to_string())))?;
        std::fs::write(&path, content).map_err(|e| SkeinError::io(&path, e))
    }

    pub fn read(install_dir: &Path) -> Result<Self, SkeinError> {
        let path = install_dir.join(MANIFEST_FILE);
        let content = std::fs::read_to_string(&path).map_err(|e| SkeinError::io(&path, e))?;
        toml::from_str(&content).map_err(|e| {
            SkeinError::io(
                &path,
                std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()),
            )
        })
    }

    /// Absolute classpath for launching from `install_dir`
    pub fn classpath_in(&self, install_dir: &Path) -> Vec<PathBuf> {
        self.classpath.iter().map(|e| install_dir.join(e)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_round_trips_through_the_install_dir() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = LaunchManifest {
            application: "web".into(),
            entry_point: "com.wcc.bootcamp.java.web.WebApplication".into(),
            java_version: 23,
            toolchain_home: PathBuf::from("/opt/jdk-23"),
            classpath: vec!["classes".into(), "resources".into(), "lib/a-1.0.jar".into()],
            jvm_args: vec![],
            args: vec![],
            built_at: "2026-01-01T00:00:00+00:00".into(),
            project: ProjectMetadata::default(),
        };
        manifest.write(dir.path()).unwrap();

        let read = LaunchManifest::read(dir.path()).unwrap();
        assert_eq!(read, manifest);
        assert_eq!(
            read.classpath_in(dir.path())[2],
            dir.path().join("lib/a-1.0.jar")
        );
    }
}
