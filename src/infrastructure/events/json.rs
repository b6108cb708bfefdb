//! JSON Event Sink
//!
//! Outputs build events as NDJSON for CI/automation consumption.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::domain::ports::{BuildEvent, BuildEventSink};

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    command: String,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    pub fn stdout(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Write to a custom writer (for testing)
    pub fn with_writer<W: Write + Send + 'static>(command: impl Into<String>, writer: W) -> Self {
        Self {
            command: command.into(),
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = crate::ui::json::write_event(&mut *writer, &event);
            let _ = writer.flush();
        }
    }
}

/// JSON object for one event, without the `command` field
pub fn event_json(event: &BuildEvent) -> serde_json::Value {
    match event {
        BuildEvent::Started {
            command,
            applications,
        } => serde_json::json!({
            "event": "start",
            "invocation": command,
            "applications": applications,
        }),
        BuildEvent::ToolchainSelected {
            application,
            version,
            home,
        } => serde_json::json!({
            "event": "toolchain",
            "application": application,
            "version": version,
            "home": home.display().to_string(),
        }),
        BuildEvent::Resolved {
            application,
            classpath,
            libraries,
        } => serde_json::json!({
            "event": "resolved",
            "application": application,
            "classpath": classpath.as_str(),
            "libraries": libraries,
        }),
        BuildEvent::Merged {
            application,
            scope,
            kind,
            files,
            dropped,
        } => serde_json::json!({
            "event": "merged",
            "application": application,
            "scope": scope.as_str(),
            "kind": kind,
            "files": files,
            "dropped": dropped,
        }),
        BuildEvent::DuplicateDropped {
            relative,
            kept,
            dropped,
        } => serde_json::json!({
            "event": "duplicate_dropped",
            "relative": relative.display().to_string(),
            "kept": kept.display().to_string(),
            "dropped": dropped.display().to_string(),
        }),
        BuildEvent::TargetStarted { target } => serde_json::json!({
            "event": "target_start",
            "target": target,
        }),
        BuildEvent::TargetSkipped { target, reason } => serde_json::json!({
            "event": "target_skipped",
            "target": target,
            "reason": reason,
        }),
        BuildEvent::TargetFinished { target } => serde_json::json!({
            "event": "target_done",
            "target": target,
        }),
        BuildEvent::TestsFinished {
            application,
            total,
            failed,
        } => serde_json::json!({
            "event": "tests",
            "application": application,
            "total": total,
            "failed": failed,
        }),
        BuildEvent::Packaged { application, path } => serde_json::json!({
            "event": "packaged",
            "application": application,
            "path": path.display().to_string(),
        }),
        BuildEvent::ApplicationFailed { application, error } => serde_json::json!({
            "event": "application_failed",
            "application": application,
            "error": error,
        }),
        BuildEvent::Completed { succeeded, failed } => {
            let status = if *failed == 0 { "success" } else { "failure" };
            serde_json::json!({
                "event": "complete",
                "status": status,
                "succeeded": succeeded,
                "failed": failed,
            })
        }
    }
}

impl BuildEventSink for JsonEventSink {
    fn on_event(&self, event: BuildEvent) {
        let mut json = event_json(&event);
        if let Some(obj) = json.as_object_mut() {
            obj.insert("command".into(), self.command.clone().into());
        }
        self.write_event(json);
    }
}
