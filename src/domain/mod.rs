//! Domain Layer
//!
//! The build model of skein: descriptors, dependency declarations, merged
//! units and the target graph.
//!
//! ## Structure
//!
//! - `entities/` - Project, descriptors, dependency table, merged units
//! - `value_objects/` - Immutable value types (Coordinate, Scope, EntryPoint, Hash)
//! - `services/` - Merger, planner, target graph, classpath resolution
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No direct I/O** - files and processes are reached through ports
//! 2. **Deterministic** - every query yields declaration or path order

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
