//! Console Event Sink
//!
//! Human-readable progress on stderr. Per-target lines only at `-v`.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::domain::ports::{BuildEvent, BuildEventSink};
use crate::ui::terminal::Palette;

pub struct ConsoleEventSink {
    verbose: bool,
    palette: Palette,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleEventSink {
    pub fn stderr(verbose: bool) -> Self {
        Self {
            verbose,
            palette: Palette::detect(),
            writer: Mutex::new(Box::new(io::stderr())),
        }
    }

    pub fn with_writer<W: Write + Send + 'static>(
        verbose: bool,
        palette: Palette,
        writer: W,
    ) -> Self {
        Self {
            verbose,
            palette,
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn line(&self, text: String) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", text);
        }
    }

    fn render(&self, event: &BuildEvent) -> Option<String> {
        let p = &self.palette;
        match event {
            BuildEvent::Started {
                command,
                applications,
            } => Some(format!(
                "{} {} {}",
                p.bold("skein"),
                command,
                applications.join(", ")
            )),
            BuildEvent::ToolchainSelected {
                application,
                version,
                home,
            } if self.verbose => Some(format!(
                "  {} Java {} at {} ({})",
                p.dim("toolchain"),
                version,
                home.display(),
                application
            )),
            BuildEvent::Resolved {
                application,
                classpath,
                libraries,
            } if self.verbose => Some(format!(
                "  {} {} libraries for {} ({})",
                p.dim("resolved"),
                libraries,
                classpath,
                application
            )),
            BuildEvent::Merged {
                application,
                scope,
                kind,
                files,
                dropped,
            } if self.verbose => Some(format!(
                "  {} {} {} {}: {} file(s), {} duplicate(s) dropped",
                p.dim("merged"),
                application,
                scope,
                kind,
                files,
                dropped
            )),
            BuildEvent::DuplicateDropped { kept, dropped, .. } if self.verbose => Some(format!(
                "    {} {} (kept {})",
                p.yellow("dropped"),
                dropped.display(),
                kept.display()
            )),
            BuildEvent::TargetStarted { target } if self.verbose => {
                Some(format!("  {} {}", p.dim("running"), target))
            }
            BuildEvent::TargetSkipped { target, reason } if self.verbose => {
                Some(format!("  {} {} ({})", p.dim("skipped"), target, reason))
            }
            BuildEvent::TestsFinished {
                application,
                total,
                failed,
            } => {
                let status = if *failed == 0 {
                    p.green("passed")
                } else {
                    p.red("failed")
                };
                Some(format!(
                    "  {} {}: {} test(s), {} failed",
                    status, application, total, failed
                ))
            }
            BuildEvent::Packaged { application, path } => Some(format!(
                "  {} {} -> {}",
                p.green("packaged"),
                application,
                path.display()
            )),
            BuildEvent::ApplicationFailed { application, error } => {
                Some(format!("  {} {}: {}", p.red("failed"), application, error))
            }
            BuildEvent::Completed { succeeded, failed } => Some(format!(
                "{} {} succeeded, {} failed",
                if *failed == 0 {
                    p.green("done")
                } else {
                    p.red("done")
                },
                succeeded,
                failed
            )),
            _ => None,
        }
    }
}

impl BuildEventSink for ConsoleEventSink {
    fn on_event(&self, event: BuildEvent) {
        if let Some(text) = self.render(&event) {
            self.line(text);
        }
    }

    fn wants_detailed_events(&self) -> bool {
        self.verbose
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn text(buffer: &SharedBuffer) -> String {
        String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap()
    }

    #[test]
    fn quiet_mode_hides_target_lines() {
        let buffer = SharedBuffer::default();
        let sink = ConsoleEventSink::with_writer(false, Palette::plain(), buffer.clone());
        sink.on_event(BuildEvent::TargetStarted {
            target: "compile:main:abc".into(),
        });
        sink.on_event(BuildEvent::Completed {
            succeeded: 2,
            failed: 0,
        });
        insta::assert_snapshot!(text(&buffer), @"done 2 succeeded, 0 failed");
    }

    #[test]
    fn verbose_mode_shows_dropped_duplicates() {
        let buffer = SharedBuffer::default();
        let sink = ConsoleEventSink::with_writer(true, Palette::plain(), buffer.clone());
        sink.on_event(BuildEvent::DuplicateDropped {
            relative: PathBuf::from("Foo.java"),
            kept: PathBuf::from("src/main/java/Foo.java"),
            dropped: PathBuf::from("ext/participant/src/main/java/Foo.java"),
        });
        assert_eq!(
            text(&buffer),
            "    dropped ext/participant/src/main/java/Foo.java (kept src/main/java/Foo.java)\n"
        );
    }
}
