//! Staging and atomic publication of build outputs
//!
//! Outputs are produced in a staging directory next to their destination
//! and renamed into place only once complete. A cancelled or failed build
//! drops the staging directory and leaves the previous output untouched.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::{Builder, NamedTempFile, TempDir};

/// Write a file via tempfile + rename
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(content)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// A directory being assembled for `destination`
pub struct Staging {
    dir: TempDir,
    destination: PathBuf,
}

impl Staging {
    /// Create a staging directory in the destination's parent.
    pub fn new(destination: &Path) -> io::Result<Self> {
        let parent = destination
            .parent()
            .ok_or_else(|| io::Error::other("destination has no parent directory"))?;
        fs::create_dir_all(parent)?;
        let dir = Builder::new().prefix(".staging-").tempdir_in(parent)?;
        Ok(Self {
            dir,
            destination: destination.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Move the staged directory to its destination, replacing any
    /// previous version.
    pub fn publish(self) -> io::Result<PathBuf> {
        let parent = self
            .destination
            .parent()
            .ok_or_else(|| io::Error::other("destination has no parent directory"))?;

        // The old copy is moved aside first so the rename below never
        // lands inside an existing directory.
        let trash = Builder::new().prefix(".trash-").tempdir_in(parent)?;
        if self.destination.exists() {
            fs::rename(&self.destination, trash.path().join("previous"))?;
        }
        fs::rename(self.dir.path(), &self.destination)?;
        Ok(self.destination)
    }
}

/// Recursively copy `from` into `to`, creating directories as needed.
pub fn copy_tree(from: &Path, to: &Path) -> io::Result<u64> {
    let mut copied = 0;
    fs::create_dir_all(to)?;
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let target = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copied += copy_tree(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Copy one file, creating the parent directory.
pub fn copy_file(from: &Path, to: &Path) -> io::Result<()> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(from, to)?;
    Ok(())
}

/// Expand a leading `~` to the home directory
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}
