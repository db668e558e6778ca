//! Error types for diagram generation.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort a diagram run.
///
/// Dangling foreign-key references and empty schemas are not errors: the
/// former are kept as edges, the latter short-circuit before any artifact
/// is written.
#[derive(Debug, Error)]
pub enum DiagramError {
    #[error("input file does not exist: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse schema from {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("failed to write diagram to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DiagramError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        DiagramError::Read {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        DiagramError::Write {
            path: path.into(),
            source,
        }
    }
}
