//! Child process adapters
//!
//! `javac`, the JUnit console launcher and `java` run as supervised child
//! processes: the build's cancellation token is polled while they run and
//! the child is killed once it fires.

mod java;
mod javac;
mod junit;

pub use java::JavaLauncher;
pub use javac::{parse_diagnostics, Javac};
pub use junit::{parse_summary, JUnitConsoleRunner, DEFAULT_LAUNCHER_MAIN};

use std::ffi::OsString;
use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::Duration;

use crate::domain::ports::ProcessError;
use crate::domain::value_objects::CancellationToken;

const POLL_INTERVAL: Duration = Duration::from_millis(25);

#[derive(Debug)]
pub(crate) struct Finished {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

fn drain<R: Read + Send + 'static>(reader: Option<R>) -> Option<thread::JoinHandle<String>> {
    reader.map(|mut r| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = r.read_to_end(&mut buf);
            String::from_utf8_lossy(&buf).into_owned()
        })
    })
}

fn kill(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

/// Run `command` to completion unless `cancel` fires first.
pub(crate) fn supervise(
    tool: &str,
    mut command: Command,
    capture: bool,
    cancel: &CancellationToken,
) -> Result<Finished, ProcessError> {
    if capture {
        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
    }

    if cancel.is_cancelled() {
        return Err(ProcessError::Cancelled {
            tool: tool.to_string(),
        });
    }

    tracing::debug!(tool, command = ?command, "spawning");
    let mut child = command.spawn().map_err(|source| ProcessError::Spawn {
        tool: tool.to_string(),
        source,
    })?;

    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let status = loop {
        if cancel.is_cancelled() {
            kill(&mut child);
            tracing::warn!(tool, "killed child process after cancellation");
            return Err(ProcessError::Cancelled {
                tool: tool.to_string(),
            });
        }
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(e) => {
                kill(&mut child);
                return Err(ProcessError::Io {
                    tool: tool.to_string(),
                    message: e.to_string(),
                });
            }
        }
    };

    let join = |h: Option<thread::JoinHandle<String>>| {
        h.and_then(|h| h.join().ok()).unwrap_or_default()
    };
    Ok(Finished {
        status,
        stdout: join(stdout),
        stderr: join(stderr),
    })
}

/// Platform classpath string
pub(crate) fn join_classpath(tool: &str, entries: &[PathBuf]) -> Result<OsString, ProcessError> {
    std::env::join_paths(entries).map_err(|e| ProcessError::Io {
        tool: tool.to_string(),
        message: format!("invalid classpath entry: {}", e),
    })
}
