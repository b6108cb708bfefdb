use std::io::Write;

use anyhow::Result;
use skein::application::{CheckItem, CheckOptions, CheckResult, CheckStatus, CheckUseCase};
use skein::ui::json::write_event;
use skein::ui::terminal::Palette;

use super::CommandContext;

pub fn cmd_check(ctx: &CommandContext, applications: Vec<String>) -> Result<()> {
    let options = CheckOptions {
        applications,
        duplicates: ctx.settings.duplicates,
    };
    let use_case = CheckUseCase::new(ctx.ports());
    let palette = Palette::detect();

    let mut out = std::io::stdout().lock();
    if ctx.json {
        write_event(
            &mut out,
            &serde_json::json!({
                "event": "start",
                "command": "check",
                "duplicates": options.duplicates.as_str(),
            }),
        )?;
    }

    let result = use_case.execute_with_callback(&ctx.config.project, &options, |item| {
        if ctx.json {
            let _ = write_event(&mut out, &item_event(item));
        } else {
            let _ = write!(out, "{}", render_item(item, ctx.verbose > 0, palette));
        }
    })?;

    if ctx.json {
        write_event(
            &mut out,
            &serde_json::json!({
                "event": "complete",
                "command": "check",
                "passed": result.passed,
                "warnings": result.warnings,
                "errors": result.errors,
                "config_warnings": ctx.config.warnings.len(),
            }),
        )?;
    } else {
        for warning in &ctx.config.warnings {
            writeln!(out, "{} {}", palette.yellow("warning"), warning)?;
        }
        write!(out, "{}", render_summary(&result, palette))?;
    }
    drop(out);

    result.into_result()?;
    Ok(())
}

fn item_event(item: &CheckItem) -> serde_json::Value {
    serde_json::json!({
        "event": "check",
        "application": item.application,
        "name": item.name,
        "status": item.status.as_str(),
        "message": item.message,
        "details": item.details,
        "category": item.category,
    })
}

fn render_item(item: &CheckItem, verbose: bool, p: Palette) -> String {
    let status = match item.status {
        CheckStatus::Pass => p.green("ok   "),
        CheckStatus::Warning => p.yellow("warn "),
        CheckStatus::Error => p.red("error"),
    };
    let mut text = format!(
        "{} {} {} {}\n",
        status,
        p.bold(&item.application),
        item.name,
        p.dim(&item.message)
    );
    if verbose || item.status != CheckStatus::Pass {
        for detail in &item.details {
            text.push_str(&format!("        {}\n", detail));
        }
    }
    text
}

fn render_summary(result: &CheckResult, p: Palette) -> String {
    let line = format!(
        "{} passed, {} warning(s), {} error(s)",
        result.passed, result.warnings, result.errors
    );
    if result.is_success() {
        format!("{}\n", p.green(&line))
    } else {
        format!("{}\n", p.red(&line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(status: CheckStatus, category: Option<&'static str>) -> CheckItem {
        CheckItem {
            application: "matcher".into(),
            name: "main.sources".into(),
            status,
            message: "2 files from 2 root(s), 1 duplicate(s) dropped".into(),
            details: vec!["src/main/java/Foo.java kept over ext/Foo.java".into()],
            category,
        }
    }

    #[test]
    fn passing_items_hide_details_unless_verbose() {
        let text = render_item(&item(CheckStatus::Pass, None), false, Palette::plain());
        insta::assert_snapshot!(text, @"ok    matcher main.sources 2 files from 2 root(s), 1 duplicate(s) dropped");

        let verbose = render_item(&item(CheckStatus::Pass, None), true, Palette::plain());
        assert!(verbose.contains("kept over"));
    }

    #[test]
    fn summary_counts_every_status() {
        let result = CheckResult {
            items: vec![item(CheckStatus::Pass, None), item(CheckStatus::Error, Some("merge"))],
            passed: 1,
            errors: 1,
            ..CheckResult::default()
        };
        assert_eq!(
            render_summary(&result, Palette::plain()),
            "1 passed, 0 warning(s), 1 error(s)\n"
        );
        let err = result.into_result().unwrap_err();
        assert_eq!(err.exit_code(), 7);
    }
}
