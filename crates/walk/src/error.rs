use std::io;
use std::path::{Path, PathBuf};

/// Error returned when construction or a traversal step fails.
///
/// Errors raised by [`TreeWalker::produce_next`](crate::TreeWalker::produce_next)
/// are always entry access failures: the walker has already moved past the
/// offending entry, so calling it again continues the traversal.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct WalkError {
    kind: WalkErrorKind,
}

impl WalkError {
    pub(crate) fn new(kind: WalkErrorKind) -> Self {
        Self { kind }
    }

    pub(crate) fn not_a_directory(path: PathBuf) -> Self {
        Self::new(WalkErrorKind::NotADirectory { path })
    }

    pub(crate) fn root_metadata(path: PathBuf, source: io::Error) -> Self {
        Self::new(WalkErrorKind::RootMetadata { path, source })
    }

    pub(crate) fn read_dir(path: PathBuf, source: io::Error) -> Self {
        Self::new(WalkErrorKind::ReadDir { path, source })
    }

    pub(crate) fn read_dir_entry(path: PathBuf, source: io::Error) -> Self {
        Self::new(WalkErrorKind::ReadDirEntry { path, source })
    }

    pub(crate) fn metadata(path: PathBuf, source: io::Error) -> Self {
        Self::new(WalkErrorKind::Metadata { path, source })
    }

    pub(crate) fn canonicalize(path: PathBuf, source: io::Error) -> Self {
        Self::new(WalkErrorKind::Canonicalize { path, source })
    }

    /// Returns the specific failure.
    #[must_use]
    pub fn kind(&self) -> &WalkErrorKind {
        &self.kind
    }

    /// Returns the filesystem path associated with the error.
    ///
    /// Callers can forward the returned path directly into higher-level
    /// diagnostics without having to pattern match on [`WalkErrorKind`].
    ///
    /// # Examples
    ///
    /// ```
    /// use walk::TreeWalker;
    ///
    /// let error = match TreeWalker::new("./definitely_missing_root") {
    ///     Ok(_) => panic!("missing root yields error"),
    ///     Err(error) => error,
    /// };
    /// assert!(error.path().ends_with("definitely_missing_root"));
    /// ```
    #[must_use]
    pub fn path(&self) -> &Path {
        self.kind.path()
    }

    /// Reports whether this is a recoverable per-entry failure.
    #[must_use]
    pub fn is_entry_access(&self) -> bool {
        self.kind.is_entry_access()
    }

    /// Returns the underlying I/O error, if any.
    #[must_use]
    pub fn io_error(&self) -> Option<&io::Error> {
        self.kind.io_error()
    }
}

/// Classification of traversal failures.
#[derive(Debug, thiserror::Error)]
pub enum WalkErrorKind {
    /// The traversal root does not exist or is not a directory.
    #[error("traversal root '{}' is not a directory", path.display())]
    NotADirectory {
        /// Path supplied as the root.
        path: PathBuf,
    },
    /// Failed to query metadata for the traversal root.
    #[error("failed to inspect traversal root '{}': {source}", path.display())]
    RootMetadata {
        /// Path that failed to provide metadata.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        #[source]
        source: io::Error,
    },
    /// Failed to open the contents of a directory.
    #[error("failed to read directory '{}': {source}", path.display())]
    ReadDir {
        /// Directory whose contents could not be read.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        #[source]
        source: io::Error,
    },
    /// The directory cursor failed while producing the next child.
    #[error("failed to read entry in '{}': {source}", path.display())]
    ReadDirEntry {
        /// Directory containing the problematic entry.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        #[source]
        source: io::Error,
    },
    /// Failed to retrieve metadata for an entry.
    #[error("failed to inspect metadata for '{}': {source}", path.display())]
    Metadata {
        /// Path whose metadata could not be retrieved.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        #[source]
        source: io::Error,
    },
    /// Failed to canonicalize a directory path while preventing cycles.
    #[error("failed to canonicalize '{}': {source}", path.display())]
    Canonicalize {
        /// Directory path that failed to canonicalize.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        #[source]
        source: io::Error,
    },
}

impl WalkErrorKind {
    /// Returns the filesystem path tied to the failure.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotADirectory { path }
            | Self::RootMetadata { path, .. }
            | Self::ReadDir { path, .. }
            | Self::ReadDirEntry { path, .. }
            | Self::Metadata { path, .. }
            | Self::Canonicalize { path, .. } => path,
        }
    }

    /// Reports whether the failure concerns one entry rather than the root.
    ///
    /// `ReadDir` counts as an entry failure: the root listing is opened at
    /// construction, so any `ReadDir` seen during traversal is a descent.
    #[must_use]
    pub const fn is_entry_access(&self) -> bool {
        !matches!(self, Self::NotADirectory { .. } | Self::RootMetadata { .. })
    }

    fn io_error(&self) -> Option<&io::Error> {
        match self {
            Self::NotADirectory { .. } => None,
            Self::RootMetadata { source, .. }
            | Self::ReadDir { source, .. }
            | Self::ReadDirEntry { source, .. }
            | Self::Metadata { source, .. }
            | Self::Canonicalize { source, .. } => Some(source),
        }
    }
}

/// Error returned when an accessor is used in the wrong walker state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MisuseError {
    /// No entry is current: nothing was produced yet, or traversal ended.
    #[error("no entry is current")]
    NotPositioned,
    /// The current entry is not a directory, so it has no subtree.
    #[error("current entry '{}' is not a directory", path.display())]
    NotADirectory {
        /// Path of the current entry.
        path: PathBuf,
    },
    /// The step after the current directory already entered or pruned it,
    /// then failed, so the request can no longer take effect.
    #[error("descent into '{}' was already consumed", path.display())]
    DescentConsumed {
        /// Path of the current directory.
        path: PathBuf,
    },
}
