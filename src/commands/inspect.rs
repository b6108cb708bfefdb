use std::io::Write;

use anyhow::Result;
use skein::application::inspect::{self, ApplicationSummary, DependencyRow, MergedSources};
use skein::domain::entities::MergedUnit;
use skein::domain::value_objects::{DependencyScope, SourceScope};
use skein::infrastructure::FsRootScanner;
use skein::ui::json::write_event;
use skein::ui::terminal::Palette;

use super::CommandContext;

pub fn cmd_list(ctx: &CommandContext) -> Result<()> {
    let applications = inspect::list_applications(&ctx.config.project);
    let mut out = std::io::stdout().lock();
    if ctx.json {
        for app in &applications {
            let mut event = serde_json::to_value(app)?;
            event["event"] = "application".into();
            write_event(&mut out, &event)?;
        }
        return Ok(());
    }
    write!(out, "{}", render_list(&applications, Palette::detect()))?;
    Ok(())
}

pub fn cmd_deps(
    ctx: &CommandContext,
    application: Option<&str>,
    scope: Option<DependencyScope>,
) -> Result<()> {
    let rows = inspect::dependencies(&ctx.config.project, application, scope)?;
    let mut out = std::io::stdout().lock();
    if ctx.json {
        for row in &rows {
            let mut event = serde_json::to_value(row)?;
            event["event"] = "dependency".into();
            write_event(&mut out, &event)?;
        }
        return Ok(());
    }
    write!(out, "{}", render_deps(&rows, Palette::detect()))?;
    Ok(())
}

pub fn cmd_sources(ctx: &CommandContext, application: &str, test: bool) -> Result<()> {
    let scope = if test { SourceScope::Test } else { SourceScope::Main };
    let merged = inspect::merged_sources(
        &ctx.config.project,
        &FsRootScanner::new(),
        ctx.settings.duplicates,
        application,
        scope,
    )?;

    let mut out = std::io::stdout().lock();
    if ctx.json {
        for unit in [&merged.sources, &merged.resources] {
            for event in unit_events(unit) {
                write_event(&mut out, &event)?;
            }
        }
        return Ok(());
    }
    write!(out, "{}", render_sources(application, &merged, Palette::detect()))?;
    Ok(())
}

fn render_list(applications: &[ApplicationSummary], p: Palette) -> String {
    if applications.is_empty() {
        return "no applications registered\n".to_string();
    }
    let width = applications.iter().map(|a| a.name.len()).max().unwrap_or(0);
    let mut text = String::new();
    for app in applications {
        let deps = match &app.dependencies {
            Some(names) => names.join(", "),
            None => "all".to_string(),
        };
        text.push_str(&format!(
            "{}  {}  {}  {}\n",
            p.bold(&format!("{:<width$}", app.name, width = width)),
            app.entry_point,
            p.dim(&format!("java {}", app.java_version)),
            p.dim(&format!("deps: {}", deps)),
        ));
    }
    text
}

fn render_deps(rows: &[DependencyRow], p: Palette) -> String {
    if rows.is_empty() {
        return "no dependencies\n".to_string();
    }
    let name_width = rows.iter().map(|r| r.name.len()).max().unwrap_or(0);
    let scope_width = rows.iter().map(|r| r.scope.as_str().len()).max().unwrap_or(0);
    let mut text = String::new();
    for row in rows {
        let coordinate = if row.versioned {
            row.coordinate.clone()
        } else {
            format!("{} {}", row.coordinate, p.yellow("(unversioned)"))
        };
        text.push_str(&format!(
            "{:<nw$}  {:<sw$}  {}\n",
            row.name,
            row.scope.as_str(),
            coordinate,
            nw = name_width,
            sw = scope_width
        ));
    }
    text
}

fn render_unit(text: &mut String, unit: &MergedUnit, p: Palette) {
    if unit.roots.is_empty() {
        return;
    }
    text.push_str(&format!(
        "{} {} {} from {}\n",
        p.bold(&format!("{} {}:", unit.scope, unit.kind.as_str())),
        unit.len(),
        if unit.len() == 1 { "file" } else { "files" },
        unit.roots
            .iter()
            .map(|r| r.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    ));
    for file in unit.files() {
        text.push_str(&format!("  {}\n", file.display_path().display()));
    }
    for duplicate in &unit.dropped {
        text.push_str(&format!(
            "  {} {} (kept {})\n",
            p.yellow("dropped"),
            duplicate.dropped.display(),
            duplicate.kept.display()
        ));
    }
}

fn render_sources(application: &str, merged: &MergedSources, p: Palette) -> String {
    let mut text = String::new();
    render_unit(&mut text, &merged.sources, p);
    render_unit(&mut text, &merged.resources, p);
    if text.is_empty() {
        text = format!("'{}' declares no roots for this scope\n", application);
    }
    text
}

fn unit_events(unit: &MergedUnit) -> Vec<serde_json::Value> {
    let mut events: Vec<serde_json::Value> = unit
        .files()
        .map(|f| {
            serde_json::json!({
                "event": "source",
                "scope": unit.scope.as_str(),
                "kind": unit.kind.as_str(),
                "relative": f.relative.display().to_string(),
                "path": f.display_path().display().to_string(),
            })
        })
        .collect();
    events.extend(unit.dropped.iter().map(|d| {
        serde_json::json!({
            "event": "duplicate_dropped",
            "scope": unit.scope.as_str(),
            "kind": unit.kind.as_str(),
            "relative": d.relative.display().to_string(),
            "kept": d.kept.display().to_string(),
            "dropped": d.dropped.display().to_string(),
        })
    }));
    events
}
