//! `java` launcher for `skein run`

use std::process::Command;

use crate::domain::ports::{ApplicationLauncher, LaunchRequest, ProcessError};
use crate::domain::value_objects::CancellationToken;

use super::{join_classpath, supervise};

#[derive(Debug, Clone, Copy, Default)]
pub struct JavaLauncher;

impl JavaLauncher {
    pub fn new() -> Self {
        Self
    }
}

impl ApplicationLauncher for JavaLauncher {
    fn launch(
        &self,
        request: &LaunchRequest,
        cancel: &CancellationToken,
    ) -> Result<i32, ProcessError> {
        let mut cmd = Command::new(request.toolchain.tool("java"));
        cmd.args(&request.jvm_args)
            .arg("-cp")
            .arg(join_classpath("java", &request.classpath)?)
            .arg(request.entry_point.as_str())
            .args(&request.args)
            .current_dir(&request.working_dir);

        let finished = supervise("java", cmd, false, cancel)?;
        Ok(finished.status.code().unwrap_or(1))
    }
}
