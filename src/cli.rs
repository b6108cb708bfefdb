use std::path::PathBuf;

use clap::{Parser, Subcommand};
use skein::domain::value_objects::{DependencyScope, DuplicatesStrategy};

/// skein - build several JVM applications from one multi-root source tree
#[derive(Parser, Debug)]
#[command(name = "skein")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit NDJSON events on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Run as if started in this directory
    #[arg(short = 'C', long = "project-dir", global = true, value_name = "DIR")]
    pub project_dir: Option<PathBuf>,

    /// Output directory (overrides [build].dir and SKEIN_BUILD_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    pub build_dir: Option<PathBuf>,

    /// Duplicates strategy: exclude, fail, warn or last_wins
    #[arg(long, global = true, value_name = "STRATEGY")]
    pub duplicates: Option<DuplicatesStrategy>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile, test and package applications (all of them by default)
    Build {
        /// Applications to build
        #[arg(value_name = "APP")]
        applications: Vec<String>,

        /// Package without running tests
        #[arg(long)]
        skip_tests: bool,

        /// Keep packaging when tests fail
        #[arg(long = "continue")]
        continue_on_test_failure: bool,
    },

    /// Compile and run the tests of applications
    Test {
        #[arg(value_name = "APP")]
        applications: Vec<String>,

        /// Report test failures without failing the build
        #[arg(long = "continue")]
        continue_on_test_failure: bool,
    },

    /// Build one application and launch it
    Run {
        #[arg(value_name = "APP")]
        application: String,

        /// Arguments passed to the application
        #[arg(last = true, value_name = "ARGS")]
        args: Vec<String>,
    },

    /// List registered applications
    List,

    /// Show dependency declarations with managed versions applied
    Deps {
        /// Only what this application sees
        #[arg(long, value_name = "APP")]
        app: Option<String>,

        /// Only this scope (compile, runtime_only, test_compile, test_runtime_only)
        #[arg(long, value_name = "SCOPE")]
        scope: Option<DependencyScope>,
    },

    /// Show the merged unit of an application and the duplicates it dropped
    Sources {
        #[arg(value_name = "APP")]
        application: String,

        /// Show the test unit instead of main
        #[arg(long)]
        test: bool,
    },

    /// Validate configuration, roots, entry points and toolchains
    Check {
        #[arg(value_name = "APP")]
        applications: Vec<String>,
    },
}
