//! Dependency declaration table
//!
//! Maps logical dependency names to coordinates and scopes. Declaration
//! order is preserved and is the order every query yields.

use std::collections::HashSet;

use crate::domain::value_objects::{ClasspathKind, Coordinate, DependencyScope};

/// A single declared dependency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub name: String,
    pub coordinate: Coordinate,
    pub scope: DependencyScope,
}

impl Dependency {
    pub fn new(name: impl Into<String>, coordinate: Coordinate, scope: DependencyScope) -> Self {
        Self {
            name: name.into(),
            coordinate,
            scope,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DependencyTableError {
    #[error("duplicate dependency {module} in scope {scope}: '{existing}' conflicts with '{incoming}'")]
    DuplicateDependency {
        module: String,
        scope: DependencyScope,
        existing: Coordinate,
        incoming: Coordinate,
    },

    #[error("dependency name '{name}' is already declared as {existing} ({existing_scope}), cannot redeclare it as {incoming} ({incoming_scope})")]
    NameConflict {
        name: String,
        existing: Coordinate,
        existing_scope: DependencyScope,
        incoming: Coordinate,
        incoming_scope: DependencyScope,
    },

    #[error("dependency name must not be empty ({coordinate})")]
    EmptyName { coordinate: Coordinate },
}

/// Outcome of a successful registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Added,
    /// Identical declaration already present; nothing changed
    AlreadyPresent,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyTable {
    entries: Vec<Dependency>,
}

impl DependencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        dependency: Dependency,
    ) -> Result<Registration, DependencyTableError> {
        if dependency.name.trim().is_empty() {
            return Err(DependencyTableError::EmptyName {
                coordinate: dependency.coordinate,
            });
        }

        if let Some(existing) = self.get(&dependency.name) {
            if existing.coordinate == dependency.coordinate && existing.scope == dependency.scope {
                return Ok(Registration::AlreadyPresent);
            }
            return Err(DependencyTableError::NameConflict {
                name: dependency.name.clone(),
                existing: existing.coordinate.clone(),
                existing_scope: existing.scope,
                incoming: dependency.coordinate,
                incoming_scope: dependency.scope,
            });
        }

        let module = dependency.coordinate.module();
        if let Some(existing) = self
            .entries
            .iter()
            .find(|e| e.scope == dependency.scope && e.coordinate.module() == module)
        {
            if existing.coordinate.version() != dependency.coordinate.version() {
                return Err(DependencyTableError::DuplicateDependency {
                    module,
                    scope: dependency.scope,
                    existing: existing.coordinate.clone(),
                    incoming: dependency.coordinate,
                });
            }
        }

        self.entries.push(dependency);
        Ok(Registration::Added)
    }

    /// Declarations of exactly `scope`, in declaration order.
    pub fn resolve(&self, scope: DependencyScope) -> impl Iterator<Item = &Dependency> + '_ {
        self.entries.iter().filter(move |d| d.scope == scope)
    }

    /// Declarations feeding `kind`, restricted to `subset` when given.
    ///
    /// The same module reachable through two declarations appears once,
    /// at the position of its first declaration.
    pub fn classpath<'a>(
        &'a self,
        kind: ClasspathKind,
        subset: Option<&'a [String]>,
    ) -> impl Iterator<Item = &'a Dependency> + 'a {
        let mut seen: HashSet<String> = HashSet::new();
        self.entries.iter().filter(move |d| {
            kind.includes(d.scope)
                && subset.map_or(true, |names| names.iter().any(|n| n == &d.name))
                && seen.insert(d.coordinate.module())
        })
    }

    pub fn get(&self, name: &str) -> Option<&Dependency> {
        self.entries.iter().find(|d| d.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dependency> + '_ {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests;
