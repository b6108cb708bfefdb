//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Root scanning, staged outputs, build directory lock
//! - `process/` - javac, JUnit console launcher, java
//! - `events/` - Console and NDJSON event sinks
//! - `toolchain` - Local JDK discovery
//! - `repository` - Local Maven-layout repository and download cache
//! - `remote` - HTTP repositories (Maven Central by default)
//! - `fakes` - In-memory port implementations for tests

pub mod events;
pub mod fakes;
pub mod fs;
pub mod process;
pub mod remote;
pub mod repository;
pub mod toolchain;

pub use events::{ConsoleEventSink, JsonEventSink};
pub use fs::{FsRootScanner, OutputLock};
pub use process::{JUnitConsoleRunner, JavaLauncher, Javac};
pub use remote::{ArtifactSource, HttpRepository, MAVEN_CENTRAL};
pub use repository::LocalRepository;
pub use toolchain::LocalToolchains;
