use anyhow::Result;
use skein::application::{BuildMode, BuildOptions, BuildUseCase};

use super::CommandContext;

pub fn cmd_build(
    ctx: &CommandContext,
    applications: Vec<String>,
    skip_tests: bool,
    continue_on_test_failure: bool,
) -> Result<()> {
    let options = ctx
        .build_options()
        .with_applications(applications)
        .with_mode(BuildMode::Build)
        .with_skip_tests(skip_tests);
    execute(ctx, &with_continue(options, continue_on_test_failure))
}

pub fn cmd_test(
    ctx: &CommandContext,
    applications: Vec<String>,
    continue_on_test_failure: bool,
) -> Result<()> {
    let options = ctx
        .build_options()
        .with_applications(applications)
        .with_mode(BuildMode::Test);
    execute(ctx, &with_continue(options, continue_on_test_failure))
}

/// Build `application` and launch it; returns the application's exit status.
pub fn cmd_run(ctx: &CommandContext, application: &str, args: &[String]) -> Result<i32> {
    let use_case = BuildUseCase::new(ctx.ports())
        .with_events(ctx.events(BuildMode::Run.as_str()))
        .with_cancellation(ctx.cancel.clone());
    let status = use_case.run(&ctx.config.project, &ctx.build_options(), application, args)?;
    tracing::info!(application, status, "application exited");
    Ok(status)
}

/// `--continue` can only switch continue mode on
fn with_continue(options: BuildOptions, flag: bool) -> BuildOptions {
    if flag {
        options.with_continue_on_test_failure(true)
    } else {
        options
    }
}

fn execute(ctx: &CommandContext, options: &BuildOptions) -> Result<()> {
    let use_case = BuildUseCase::new(ctx.ports())
        .with_events(ctx.events(options.mode.as_str()))
        .with_cancellation(ctx.cancel.clone());

    let report = use_case.execute(&ctx.config.project, options)?;
    tracing::debug!(
        executed = report.executed.len(),
        up_to_date = report.up_to_date.len(),
        "build finished"
    );
    report.into_result()?;
    Ok(())
}
