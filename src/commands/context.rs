use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use skein::application::{BuildOptions, BuildPorts};
use skein::config::{self, ProjectConfig, Settings};
use skein::domain::ports::BuildEventSink;
use skein::domain::value_objects::CancellationToken;
use skein::infrastructure::{
    ConsoleEventSink, FsRootScanner, HttpRepository, JUnitConsoleRunner, JavaLauncher, Javac,
    JsonEventSink, LocalRepository, LocalToolchains,
};

use crate::cli::Cli;

/// Everything a command needs: the loaded project, effective settings and
/// the global output flags.
pub struct CommandContext {
    pub json: bool,
    pub verbose: u8,
    pub config: ProjectConfig,
    pub settings: Settings,
    pub cancel: CancellationToken,
}

impl CommandContext {
    /// Discover `skein.toml` from `-C` (or the working directory) and apply
    /// environment then CLI overrides.
    pub fn load(cli: &Cli, cancel: CancellationToken) -> Result<Self> {
        let cwd = std::env::current_dir().context("cannot read the working directory")?;
        let start = match &cli.project_dir {
            Some(dir) => absolute(&cwd, dir),
            None => cwd.clone(),
        };

        let config = config::discover(&start)?;
        let mut settings = config::with_env_overrides(config.settings.clone());
        if let Some(dir) = &cli.build_dir {
            settings.build_dir = absolute(&cwd, dir);
        }
        if let Some(duplicates) = cli.duplicates {
            settings.duplicates = duplicates;
        }

        let ctx = Self {
            json: cli.json,
            verbose: cli.verbose,
            config,
            settings,
            cancel,
        };
        ctx.report_warnings();
        Ok(ctx)
    }

    fn report_warnings(&self) {
        if !self.json {
            return;
        }
        let mut out = std::io::stdout().lock();
        for warning in &self.config.warnings {
            let _ = skein::ui::json::write_event(
                &mut out,
                &serde_json::json!({
                    "event": "config_warning",
                    "key": warning.key,
                    "file": warning.file.display().to_string(),
                    "line": warning.line,
                    "suggestion": warning.suggestion,
                }),
            );
        }
    }

    pub fn ports(&self) -> BuildPorts {
        let s = &self.settings;
        let toolchains = LocalToolchains::new()
            .with_homes(s.toolchain_homes.clone())
            .with_search_paths(s.toolchain_search_paths.clone())
            .with_java_home(std::env::var_os("JAVA_HOME").map(PathBuf::from));
        let repository = s
            .remote_repositories
            .iter()
            .fold(LocalRepository::new(s.local_repository.clone()), |repo, url| {
                repo.with_remote(Arc::new(HttpRepository::new(url.as_str())))
            });
        let test_runner = match &s.test_launcher_main {
            Some(main) => JUnitConsoleRunner::new().with_launcher_main(main.clone()),
            None => JUnitConsoleRunner::new(),
        };

        BuildPorts {
            toolchains: Arc::new(toolchains),
            resolver: Arc::new(repository),
            scanner: Arc::new(FsRootScanner::new()),
            compiler: Arc::new(Javac::new()),
            test_runner: Arc::new(test_runner),
            launcher: Arc::new(JavaLauncher::new()),
        }
    }

    pub fn events(&self, command: &str) -> Arc<dyn BuildEventSink> {
        if self.json {
            Arc::new(JsonEventSink::stdout(command))
        } else {
            Arc::new(ConsoleEventSink::stderr(self.verbose > 0))
        }
    }

    pub fn build_options(&self) -> BuildOptions {
        BuildOptions::new(&self.settings.build_dir)
            .with_duplicates(self.settings.duplicates)
            .with_continue_on_test_failure(self.settings.continue_on_test_failure)
            .with_test_jvm_args(self.settings.test_jvm_args.clone())
    }
}

fn absolute(cwd: &Path, path: &Path) -> PathBuf {
    let path = skein::infrastructure::fs::expand_home(path);
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}
