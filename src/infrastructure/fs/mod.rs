//! File System Implementations
//!
//! Root scanning, staged outputs and the build directory lock.

mod lock;
mod publish;
mod scanner;

pub use lock::{LockError, OutputLock, LOCK_FILE_NAME};
pub use publish::{atomic_write, copy_file, copy_tree, expand_home, Staging};
pub use scanner::FsRootScanner;
