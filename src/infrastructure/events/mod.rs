//! Event sink implementations

mod console;
mod json;

pub use console::ConsoleEventSink;
pub use json::{event_json, JsonEventSink};
