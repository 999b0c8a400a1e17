use std::io;
use std::path::{Path, PathBuf};
use walk::WalkError;

/// Error produced by the filesystem primitives.
#[derive(Debug, thiserror::Error)]
pub enum FsError {
    /// The destination of a create, copy or move is already occupied.
    #[error("'{}' already exists", path.display())]
    Exists {
        /// Occupied path.
        path: PathBuf,
    },
    /// A required path does not exist or is not of the required type.
    #[error("'{}' was not found", path.display())]
    NotFound {
        /// Missing path.
        path: PathBuf,
    },
    /// Filesystem interaction failed.
    #[error("failed to {action} '{}': {source}", path.display())]
    Io {
        /// Action being performed.
        action: &'static str,
        /// Path involved in the failure.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// A recursive operation could not enumerate its tree.
    #[error(transparent)]
    Walk(#[from] WalkError),
}

impl FsError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn exists(path: impl Into<PathBuf>) -> Self {
        Self::Exists { path: path.into() }
    }

    pub(crate) fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Returns the path the failure concerns.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Exists { path } | Self::NotFound { path } | Self::Io { path, .. } => path,
            Self::Walk(error) => error.path(),
        }
    }
}
