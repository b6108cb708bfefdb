use crate::error::SkeinError;

use crate::ui::terminal::Palette;

/// Exit code for a command error; `1` for anything that is not a `SkeinError`.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<SkeinError>()
        .map(SkeinError::exit_code)
        .unwrap_or(1)
}

fn hint(err: &SkeinError) -> Option<&'static str> {
    match err.category() {
        "configuration" => Some("run 'skein check' for a full report of the project file"),
        "toolchain" => Some("install the JDK or list it under [toolchain].homes"),
        "resolution" => Some("declare a version or add it to [managed_versions]"),
        "merge" => Some("see 'skein sources <app>' for the merged roots"),
        "locked" => Some("another skein invocation is using this build directory"),
        _ => None,
    }
}

pub fn format_error(err: &anyhow::Error, palette: Palette) -> String {
    let mut out = format!("{} {}\n", palette.red(&palette.bold("error:")), err);
    let skein = err.downcast_ref::<SkeinError>();
    if skein.is_none() {
        for cause in err.chain().skip(1) {
            out.push_str(&format!("  {} {}\n", palette.dim("caused by:"), cause));
        }
    }
    if let Some(hint) = skein.and_then(hint) {
        out.push_str(&format!("  {} {}\n", palette.dim("hint:"), hint));
    }
    out
}

pub fn error_event(err: &anyhow::Error) -> serde_json::Value {
    let category = err
        .downcast_ref::<SkeinError>()
        .map(SkeinError::category)
        .unwrap_or("other");
    serde_json::json!({
        "event": "error",
        "category": category,
        "exit_code": exit_code(err),
        "message": err.to_string(),
    })
}

pub fn print_error(err: &anyhow::Error, json: bool) {
    if json {
        let _ = crate::ui::json::emit(error_event(err));
        return;
    }
    eprint!("{}", format_error(err, Palette::detect()));
}
