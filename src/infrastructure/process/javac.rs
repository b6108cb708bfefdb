//! `javac` adapter

use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

use crate::domain::ports::{CompileError, CompileRequest, Compiler, Diagnostic, ProcessError};
use crate::domain::value_objects::CancellationToken;

use super::{join_classpath, supervise};

#[derive(Debug, Clone, Default)]
pub struct Javac {
    extra_args: Vec<String>,
}

impl Javac {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extra compiler flags (`-parameters`, `-Xlint:all`, ...)
    pub fn with_extra_args(mut self, extra_args: Vec<String>) -> Self {
        self.extra_args = extra_args;
        self
    }
}

fn quote_arg(path: &std::path::Path) -> String {
    let s = path.display().to_string().replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{}\"", s)
}

impl Compiler for Javac {
    fn compile(
        &self,
        request: &CompileRequest,
        cancel: &CancellationToken,
    ) -> Result<(), CompileError> {
        std::fs::create_dir_all(&request.output_dir).map_err(|e| ProcessError::Io {
            tool: "javac".into(),
            message: e.to_string(),
        })?;
        if request.sources.is_empty() {
            return Ok(());
        }

        // Source lists easily exceed command line limits
        let mut argfile = tempfile::NamedTempFile::new().map_err(|e| ProcessError::Io {
            tool: "javac".into(),
            message: e.to_string(),
        })?;
        for source in &request.sources {
            writeln!(argfile, "{}", quote_arg(source)).map_err(|e| ProcessError::Io {
                tool: "javac".into(),
                message: e.to_string(),
            })?;
        }

        let mut cmd = Command::new(request.toolchain.tool("javac"));
        cmd.arg("--release")
            .arg(request.release.to_string())
            .arg("-encoding")
            .arg("UTF-8")
            .arg("-d")
            .arg(&request.output_dir);
        if !request.classpath.is_empty() {
            cmd.arg("-cp").arg(join_classpath("javac", &request.classpath)?);
        }
        cmd.args(&self.extra_args);
        cmd.arg(format!("@{}", argfile.path().display()));

        let finished = supervise("javac", cmd, true, cancel)?;
        if finished.status.success() {
            return Ok(());
        }

        let output = format!("{}{}", finished.stdout, finished.stderr);
        Err(CompileError::Failed {
            diagnostics: parse_diagnostics(&output),
            output,
        })
    }
}

/// Extract `file:line: error: message` lines from javac output.
pub fn parse_diagnostics(output: &str) -> Vec<Diagnostic> {
    output
        .lines()
        .filter_map(|line| {
            let (location, message) = line.split_once(": error: ")?;
            let (file, line_no) = match location.rsplit_once(':') {
                Some((file, n)) => match n.trim().parse::<u32>() {
                    Ok(n) => (file, Some(n)),
                    Err(_) => (location, None),
                },
                None => (location, None),
            };
            Some(Diagnostic {
                file: PathBuf::from(file),
                line: line_no,
                message: message.trim().to_string(),
            })
        })
        .collect()
}
