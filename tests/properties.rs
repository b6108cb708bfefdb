//! Property tests for skein.
//!
//! Randomized inputs for the merge rules and the dependency table, where
//! the invariants are easy to state and easy to break.
//!
//! Run with: cargo test --test properties

#[path = "properties/source_merge.rs"]
mod source_merge;

#[path = "properties/dependency_order.rs"]
mod dependency_order;

#[path = "properties/value_parsing.rs"]
mod value_parsing;
