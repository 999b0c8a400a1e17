use crate::error::WalkError;
use logging::trace_walk;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::vec;

/// Iteration state over one directory's immediate children.
#[derive(Debug)]
pub(crate) struct TraversalFrame {
    fs_path: PathBuf,
    relative_prefix: PathBuf,
    depth: usize,
    cursor: DirectoryCursor,
}

#[derive(Debug)]
enum DirectoryCursor {
    Live(fs::ReadDir),
    Sorted {
        names: vec::IntoIter<OsString>,
        deferred: Option<io::Error>,
    },
    Finished,
}

impl TraversalFrame {
    /// Opens `fs_path` for enumeration.
    ///
    /// `relative_prefix` is the directory's path below the root and `depth`
    /// its depth; children are reported one level deeper.
    pub(crate) fn open(
        fs_path: PathBuf,
        relative_prefix: PathBuf,
        depth: usize,
        sorted: bool,
    ) -> Result<Self, WalkError> {
        let read_dir = match fs::read_dir(&fs_path) {
            Ok(read_dir) => read_dir,
            Err(error) => return Err(WalkError::read_dir(fs_path, error)),
        };

        let cursor = if sorted {
            let mut names = Vec::new();
            let mut deferred = None;
            for entry in read_dir {
                match entry {
                    Ok(entry) => names.push(entry.file_name()),
                    Err(error) => {
                        deferred = Some(error);
                        break;
                    }
                }
            }
            names.sort();
            trace_walk!("found {} entries in {:?}", names.len(), fs_path);
            DirectoryCursor::Sorted {
                names: names.into_iter(),
                deferred,
            }
        } else {
            DirectoryCursor::Live(read_dir)
        };

        Ok(Self {
            fs_path,
            relative_prefix,
            depth,
            cursor,
        })
    }

    /// Advances the cursor by one child.
    ///
    /// Returns `None` when the directory is exhausted. An `Err` finishes the
    /// cursor: later calls return `None`.
    pub(crate) fn next_name(&mut self) -> Option<io::Result<OsString>> {
        let next = match &mut self.cursor {
            DirectoryCursor::Live(read_dir) => {
                read_dir.next().map(|entry| entry.map(|entry| entry.file_name()))
            }
            DirectoryCursor::Sorted { names, deferred } => match names.next() {
                Some(name) => Some(Ok(name)),
                None => deferred.take().map(Err),
            },
            DirectoryCursor::Finished => None,
        };

        if !matches!(next, Some(Ok(_))) {
            self.cursor = DirectoryCursor::Finished;
        }
        next
    }

    /// Builds a frame over a fixed listing that ends with `deferred`.
    #[cfg(test)]
    pub(crate) fn with_names(
        fs_path: PathBuf,
        relative_prefix: PathBuf,
        depth: usize,
        names: Vec<OsString>,
        deferred: Option<io::Error>,
    ) -> Self {
        Self {
            fs_path,
            relative_prefix,
            depth,
            cursor: DirectoryCursor::Sorted {
                names: names.into_iter(),
                deferred,
            },
        }
    }

    /// Returns the directory path reachable from the root as supplied.
    pub(crate) fn fs_path(&self) -> &Path {
        &self.fs_path
    }

    /// Returns the path of child `name` relative to the traversal root.
    pub(crate) fn child_relative_path(&self, name: &OsString) -> PathBuf {
        if self.relative_prefix.as_os_str().is_empty() {
            PathBuf::from(name)
        } else {
            self.relative_prefix.join(name)
        }
    }

    /// Depth of this frame's children.
    pub(crate) const fn child_depth(&self) -> usize {
        self.depth + 1
    }
}
