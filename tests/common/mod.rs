//! Shared helpers for skein integration tests.
//!
//! - `TestProject`: a temporary project directory plus CLI runner
//! - Fixtures: the bootcamp layout, fake JDK homes and repository jars

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
