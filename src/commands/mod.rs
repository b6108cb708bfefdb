//! Command handlers for the `skein` binary
//!
//! Each handler loads what it needs through `CommandContext`, calls one
//! library use case and renders the result as text or NDJSON.

mod build;
mod check;
mod context;
mod inspect;

pub use build::{cmd_build, cmd_run, cmd_test};
pub use check::cmd_check;
pub use context::CommandContext;
pub use inspect::{cmd_deps, cmd_list, cmd_sources};
