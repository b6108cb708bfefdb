//! Presentation helpers shared by the CLI and the event sinks
//!
//! - `terminal` - ANSI palette and color detection
//! - `json` - NDJSON line writer
//! - `error` - Human and JSON rendering of command errors

pub mod error;
pub mod json;
pub mod terminal;
