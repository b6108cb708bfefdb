//! Output directory lock
//!
//! One invocation owns a build directory at a time. The lock is an
//! advisory `fs2` lock on `<build_dir>/.skein.lock`, released on drop.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;

pub const LOCK_FILE_NAME: &str = ".skein.lock";

#[derive(Debug, thiserror::Error)]
pub enum LockError {
    #[error("build directory {} is in use by another skein process", path.display())]
    Held { path: PathBuf },

    #[error("cannot lock {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug)]
pub struct OutputLock {
    file: File,
    path: PathBuf,
}

impl OutputLock {
    /// Try to take the lock without waiting.
    pub fn acquire(build_dir: &Path) -> Result<Self, LockError> {
        let path = build_dir.join(LOCK_FILE_NAME);
        let io_err = |source| LockError::Io {
            path: path.clone(),
            source,
        };

        fs::create_dir_all(build_dir).map_err(io_err)?;
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(&path)
            .map_err(io_err)?;

        if file.try_lock_exclusive().is_err() {
            return Err(LockError::Held { path });
        }
        tracing::debug!(lock = %path.display(), "acquired output lock");
        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for OutputLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}
