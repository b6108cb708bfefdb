//! skein CLI - build several JVM applications from one multi-root source tree
//!
//! Usage: skein [OPTIONS] <COMMAND>
//!
//! Commands:
//!   build    Compile, test and package applications
//!   test     Compile and run tests
//!   run      Build one application and launch it
//!   list     List registered applications
//!   deps     Show dependency declarations
//!   sources  Show a merged unit and its dropped duplicates
//!   check    Validate configuration, roots, entry points and toolchains

use clap::Parser;
use skein::domain::value_objects::CancellationToken;

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::CommandContext;

fn main() {
    let cli = Cli::parse();
    skein::telemetry::init_tracing(cli.json, cli.verbose);

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    if let Err(err) = ctrlc::set_handler(move || {
        tracing::warn!("interrupt received, cancelling");
        trigger.cancel();
    }) {
        tracing::warn!(error = %err, "cannot install the Ctrl-C handler");
    }

    let json = cli.json;
    let code = match run(cli, cancel) {
        Ok(code) => code,
        Err(err) => {
            skein::ui::error::print_error(&err, json);
            skein::ui::error::exit_code(&err)
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli, cancel: CancellationToken) -> anyhow::Result<i32> {
    let ctx = CommandContext::load(&cli, cancel)?;

    match cli.command {
        Commands::Build {
            applications,
            skip_tests,
            continue_on_test_failure,
        } => commands::cmd_build(&ctx, applications, skip_tests, continue_on_test_failure)?,
        Commands::Test {
            applications,
            continue_on_test_failure,
        } => commands::cmd_test(&ctx, applications, continue_on_test_failure)?,
        Commands::Run { application, args } => {
            return commands::cmd_run(&ctx, &application, &args);
        }
        Commands::List => commands::cmd_list(&ctx)?,
        Commands::Deps { app, scope } => commands::cmd_deps(&ctx, app.as_deref(), scope)?,
        Commands::Sources { application, test } => {
            commands::cmd_sources(&ctx, &application, test)?
        }
        Commands::Check { applications } => commands::cmd_check(&ctx, applications)?,
    }
    Ok(0)
}
