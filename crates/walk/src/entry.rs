use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

/// Type of a filesystem entry as reported by `symlink_metadata`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// A directory.
    Directory,
    /// A regular file.
    File,
    /// A symbolic link (never resolved for classification).
    Symlink,
    /// Anything else: sockets, FIFOs, device nodes.
    Other,
}

impl EntryKind {
    pub(crate) fn from_file_type(file_type: fs::FileType) -> Self {
        if file_type.is_dir() {
            Self::Directory
        } else if file_type.is_file() {
            Self::File
        } else if file_type.is_symlink() {
            Self::Symlink
        } else {
            Self::Other
        }
    }
}

/// Result of a successful traversal step.
#[derive(Debug)]
pub struct WalkEntry {
    pub(crate) path: PathBuf,
    pub(crate) relative_path: PathBuf,
    pub(crate) metadata: fs::Metadata,
    pub(crate) kind: EntryKind,
    pub(crate) is_dir: bool,
    pub(crate) depth: usize,
    pub(crate) is_root: bool,
}

impl WalkEntry {
    /// Returns the path of the entry: the root as supplied joined with
    /// [`relative_path`](Self::relative_path).
    ///
    /// A relative root therefore yields relative paths and an absolute root
    /// yields absolute paths.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Consumes the entry and returns its path.
    #[must_use]
    pub fn into_path(self) -> PathBuf {
        self.path
    }

    /// Returns the path relative to the traversal root (empty for the root).
    #[must_use]
    pub fn relative_path(&self) -> &Path {
        &self.relative_path
    }

    /// Provides access to the [`fs::Metadata`] captured for the entry.
    ///
    /// The metadata comes from `symlink_metadata`, so a symlink describes
    /// the link itself.
    #[must_use]
    pub fn metadata(&self) -> &fs::Metadata {
        &self.metadata
    }

    /// Returns the type of the entry itself.
    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Reports whether the walker treats this entry as a directory.
    ///
    /// This is true for real directories, and for symlinks resolving to a
    /// directory when symlink following is enabled. It is the value
    /// [`TreeWalker::current_is_directory`](crate::TreeWalker::current_is_directory)
    /// reports while this entry is current.
    #[must_use]
    pub const fn is_dir(&self) -> bool {
        self.is_dir
    }

    /// Returns the file name of the entry, or `None` for the root.
    #[must_use]
    pub fn file_name(&self) -> Option<&OsStr> {
        if self.is_root {
            None
        } else {
            self.relative_path.file_name()
        }
    }

    /// Reports the depth of the entry relative to the root (root depth is `0`).
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Indicates whether this entry corresponds to the traversal root.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.is_root
    }
}
