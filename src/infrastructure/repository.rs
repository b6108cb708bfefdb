//! Local Maven-layout repository
//!
//! Resolves `group:artifact:version` to
//! `<root>/<group as path>/<artifact>/<version>/<artifact>-<version>.jar`.
//! A jar missing there is downloaded from the remotes, in order, and
//! cached in the same layout. No POM processing.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::ports::{DependencyResolver, Library, ResolveError};
use crate::domain::value_objects::Coordinate;
use crate::infrastructure::fs::atomic_write;
use crate::infrastructure::remote::{ArtifactSource, RemoteError};

#[derive(Clone)]
pub struct LocalRepository {
    root: PathBuf,
    remotes: Vec<Arc<dyn ArtifactSource>>,
}

impl LocalRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            remotes: Vec::new(),
        }
    }

    pub fn with_remote(mut self, remote: Arc<dyn ArtifactSource>) -> Self {
        self.remotes.push(remote);
        self
    }

    /// `~/.m2/repository`
    pub fn default_root() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".m2").join("repository"))
            .unwrap_or_else(|| PathBuf::from(".m2/repository"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maven-layout path with `/` separators, shared by disk and remotes
    pub fn layout_path(coordinate: &Coordinate, version: &str) -> String {
        format!(
            "{}/{}/{}/{}-{}.jar",
            coordinate.group().replace('.', "/"),
            coordinate.artifact(),
            version,
            coordinate.artifact(),
            version
        )
    }

    pub fn artifact_path(&self, coordinate: &Coordinate, version: &str) -> PathBuf {
        let mut path = self.root.clone();
        path.extend(Self::layout_path(coordinate, version).split('/'));
        path
    }

    /// Try each remote in order; the first one that has the jar fills the cache.
    fn download(
        &self,
        coordinate: &Coordinate,
        layout: &str,
        dest: &Path,
    ) -> Result<bool, ResolveError> {
        let mut first_error: Option<RemoteError> = None;
        for remote in &self.remotes {
            match remote.download(layout) {
                Ok(Some(bytes)) => {
                    atomic_write(dest, &bytes).map_err(|e| ResolveError::Io {
                        coordinate: coordinate.clone(),
                        message: format!("cannot cache {}: {}", dest.display(), e),
                    })?;
                    tracing::info!(
                        %coordinate,
                        remote = remote.url(),
                        bytes = bytes.len(),
                        "downloaded"
                    );
                    return Ok(true);
                }
                Ok(None) => tracing::debug!(%coordinate, remote = remote.url(), "not in remote"),
                Err(e) => {
                    tracing::warn!(%coordinate, error = %e, "remote failed");
                    first_error.get_or_insert(e);
                }
            }
        }
        match first_error {
            Some(e) => Err(ResolveError::Remote {
                coordinate: coordinate.clone(),
                message: e.to_string(),
            }),
            None => Ok(false),
        }
    }
}

impl DependencyResolver for LocalRepository {
    fn fetch(&self, coordinate: &Coordinate) -> Result<Library, ResolveError> {
        let Some(version) = coordinate.version() else {
            return Err(ResolveError::Unversioned {
                coordinate: coordinate.clone(),
            });
        };
        let path = self.artifact_path(coordinate, version);
        let found = match std::fs::metadata(&path) {
            Ok(m) => m.is_file(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                self.download(coordinate, &Self::layout_path(coordinate, version), &path)?
            }
            Err(e) => {
                return Err(ResolveError::Io {
                    coordinate: coordinate.clone(),
                    message: e.to_string(),
                })
            }
        };

        if !found {
            return Err(ResolveError::NotFound {
                coordinate: coordinate.clone(),
                location: path,
            });
        }
        tracing::trace!(%coordinate, path = %path.display(), "resolved");
        Ok(Library {
            coordinate: coordinate.clone(),
            path,
        })
    }
}
