//! Classpath resolution
//!
//! Fetches the libraries of one classpath. Fetches run in parallel, the
//! result keeps declaration order, and when several fetches fail the one
//! declared first is reported.

use std::collections::HashMap;
use std::sync::Mutex;

use rayon::prelude::*;

use crate::domain::entities::{Dependency, Project};
use crate::domain::ports::{DependencyResolver, Library, ResolveError};
use crate::domain::value_objects::Coordinate;

/// Remembers every fetch outcome, so a coordinate shared by several
/// classpaths is fetched once per build.
pub struct FetchCache<'a> {
    resolver: &'a dyn DependencyResolver,
    fetched: Mutex<HashMap<Coordinate, Result<Library, ResolveError>>>,
}

impl<'a> FetchCache<'a> {
    pub fn new(resolver: &'a dyn DependencyResolver) -> Self {
        Self {
            resolver,
            fetched: Mutex::new(HashMap::new()),
        }
    }
}

impl DependencyResolver for FetchCache<'_> {
    fn fetch(&self, coordinate: &Coordinate) -> Result<Library, ResolveError> {
        if let Some(outcome) = self
            .fetched
            .lock()
            .ok()
            .and_then(|fetched| fetched.get(coordinate).cloned())
        {
            return outcome;
        }
        let outcome = self.resolver.fetch(coordinate);
        if let Ok(mut fetched) = self.fetched.lock() {
            fetched.insert(coordinate.clone(), outcome.clone());
        }
        outcome
    }
}

/// Resolve the named declarations (already filtered and ordered).
pub fn resolve_classpath(
    project: &Project,
    names: &[String],
    resolver: &dyn DependencyResolver,
) -> Result<Vec<Library>, ResolveError> {
    let declarations: Vec<&Dependency> = names
        .iter()
        .filter_map(|name| project.dependencies().get(name))
        .collect();

    let fetched: Vec<Result<Library, ResolveError>> = declarations
        .par_iter()
        .map(|dependency| {
            let coordinate = project.effective_coordinate(&dependency.coordinate);
            if coordinate.version().is_none() {
                return Err(ResolveError::Unversioned { coordinate });
            }
            resolver.fetch(&coordinate)
        })
        .collect();

    fetched.into_iter().collect()
}
