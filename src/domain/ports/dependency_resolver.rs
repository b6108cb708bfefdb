//! DependencyResolver port - turns coordinates into library files

use std::path::PathBuf;

use crate::domain::value_objects::Coordinate;

/// A resolved library on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Library {
    pub coordinate: Coordinate,
    pub path: PathBuf,
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("no version declared or managed for {coordinate}")]
    Unversioned { coordinate: Coordinate },

    #[error("cannot resolve {coordinate}: not found at {}", location.display())]
    NotFound {
        coordinate: Coordinate,
        location: PathBuf,
    },

    #[error("cannot resolve {coordinate}: {message}")]
    Io {
        coordinate: Coordinate,
        message: String,
    },

    #[error("cannot download {coordinate}: {message}")]
    Remote {
        coordinate: Coordinate,
        message: String,
    },
}

impl ResolveError {
    pub fn coordinate(&self) -> &Coordinate {
        match self {
            ResolveError::Unversioned { coordinate }
            | ResolveError::NotFound { coordinate, .. }
            | ResolveError::Io { coordinate, .. }
            | ResolveError::Remote { coordinate, .. } => coordinate,
        }
    }
}

/// Fetches one versioned coordinate. Called from several threads at once.
pub trait DependencyResolver: Send + Sync {
    fn fetch(&self, coordinate: &Coordinate) -> Result<Library, ResolveError>;
}
