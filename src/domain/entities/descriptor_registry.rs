//! Application descriptor registry
//!
//! Holds every runnable application of a project in registration order and
//! enforces that entry points and names are unique.

use crate::domain::entities::{ApplicationDescriptor, DependencyTable};
use crate::domain::value_objects::EntryPoint;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("applications '{existing}' and '{incoming}' both declare entry point {entry_point}")]
    DuplicateEntryPoint {
        entry_point: EntryPoint,
        existing: String,
        incoming: String,
    },

    #[error("application '{name}' is declared twice")]
    DuplicateName { name: String },

    #[error("invalid application name '{name}' (use letters, digits, '.', '_' or '-')")]
    InvalidName { name: String },

    #[error("application '{application}' references undeclared dependency '{dependency}'")]
    UnknownDependency {
        application: String,
        dependency: String,
    },

    #[error("unknown application '{name}' (known: {})", known.join(", "))]
    UnknownApplication { name: String, known: Vec<String> },
}

fn valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

#[derive(Debug, Clone, Default)]
pub struct DescriptorRegistry {
    descriptors: Vec<ApplicationDescriptor>,
}

impl DescriptorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, descriptor: ApplicationDescriptor) -> Result<(), RegistryError> {
        if !valid_name(descriptor.name()) {
            return Err(RegistryError::InvalidName {
                name: descriptor.name().to_string(),
            });
        }
        if self.get(descriptor.name()).is_some() {
            return Err(RegistryError::DuplicateName {
                name: descriptor.name().to_string(),
            });
        }
        if let Some(existing) = self
            .descriptors
            .iter()
            .find(|d| d.entry_point() == descriptor.entry_point())
        {
            return Err(RegistryError::DuplicateEntryPoint {
                entry_point: descriptor.entry_point().clone(),
                existing: existing.name().to_string(),
                incoming: descriptor.name().to_string(),
            });
        }

        self.descriptors.push(descriptor);
        Ok(())
    }

    /// Application names in registration order
    pub fn list(&self) -> Vec<&str> {
        self.descriptors.iter().map(|d| d.name()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&ApplicationDescriptor> {
        self.descriptors.iter().find(|d| d.name() == name)
    }

    pub fn require(&self, name: &str) -> Result<&ApplicationDescriptor, RegistryError> {
        self.get(name).ok_or_else(|| RegistryError::UnknownApplication {
            name: name.to_string(),
            known: self.list().into_iter().map(String::from).collect(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &ApplicationDescriptor> + '_ {
        self.descriptors.iter()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Check every descriptor's dependency subset against the table.
    pub fn validate_dependencies(&self, table: &DependencyTable) -> Result<(), RegistryError> {
        for descriptor in &self.descriptors {
            let Some(names) = descriptor.dependencies() else {
                continue;
            };
            if let Some(missing) = names.iter().find(|n| !table.contains(n)) {
                return Err(RegistryError::UnknownDependency {
                    application: descriptor.name().to_string(),
                    dependency: missing.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
