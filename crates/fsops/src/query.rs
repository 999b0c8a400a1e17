use crate::error::FsError;
use logging::trace_fs;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// What a path refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FileType {
    /// A directory, or a symlink resolving to one.
    Directory,
    /// A regular file, or a symlink resolving to one.
    File,
    /// A symlink whose target cannot be resolved.
    Symlink,
    /// Any other object, such as a FIFO, socket or device.
    Other,
    /// Nothing exists at the path.
    NotFound,
}

/// Classifies `path`.
///
/// Symlinks are resolved for the directory and file checks; a symlink whose
/// target is missing reports [`FileType::Symlink`].
pub fn get_type(path: impl AsRef<Path>) -> Result<FileType, FsError> {
    let path = path.as_ref();
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(FileType::NotFound),
        Err(error) => return Err(FsError::io("inspect", path, error)),
    };

    if !metadata.file_type().is_symlink() {
        return Ok(classify(&metadata));
    }

    match fs::metadata(path) {
        Ok(target) => Ok(classify(&target)),
        Err(error) => {
            trace_fs!("symlink {:?} does not resolve: {}", path, error);
            Ok(FileType::Symlink)
        }
    }
}

fn classify(metadata: &fs::Metadata) -> FileType {
    if metadata.is_dir() {
        FileType::Directory
    } else if metadata.is_file() {
        FileType::File
    } else {
        FileType::Other
    }
}

/// Reports whether `path` is a directory, following symlinks.
pub fn is_directory(path: impl AsRef<Path>) -> Result<bool, FsError> {
    Ok(get_type(path)? == FileType::Directory)
}

/// Reports whether `path` is a regular file, following symlinks.
pub fn is_file(path: impl AsRef<Path>) -> Result<bool, FsError> {
    Ok(get_type(path)? == FileType::File)
}

/// Reports whether `path` itself is a symlink, resolvable or not.
pub fn is_symlink(path: impl AsRef<Path>) -> Result<bool, FsError> {
    let path = path.as_ref();
    match fs::symlink_metadata(path) {
        Ok(metadata) => Ok(metadata.file_type().is_symlink()),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(error) => Err(FsError::io("inspect", path, error)),
    }
}

/// Reports whether anything, a dangling symlink included, exists at `path`.
pub fn exists(path: impl AsRef<Path>) -> Result<bool, FsError> {
    Ok(get_type(path)? != FileType::NotFound)
}

/// Lists the immediate children of `dir` as `(name, is_directory)` pairs.
///
/// The directory flag does not follow symlinks. Order is whatever the
/// filesystem returns.
pub fn list_children(dir: impl AsRef<Path>) -> Result<Vec<(OsString, bool)>, FsError> {
    let dir = dir.as_ref();
    let read_dir = fs::read_dir(dir).map_err(|error| FsError::io("read directory", dir, error))?;

    let mut children = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|error| FsError::io("read entry in", dir, error))?;
        let file_type = entry
            .file_type()
            .map_err(|error| FsError::io("inspect", entry.path(), error))?;
        children.push((entry.file_name(), file_type.is_dir()));
    }
    Ok(children)
}

/// Returns the size in bytes of the regular file at `path`.
///
/// Fails with [`FsError::NotFound`] when nothing exists there or the path is
/// not a regular file.
pub fn size(path: impl AsRef<Path>) -> Result<u64, FsError> {
    let path = path.as_ref();
    match fs::metadata(path) {
        Ok(metadata) if metadata.is_file() => Ok(metadata.len()),
        Ok(_) => Err(FsError::not_found(path)),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Err(FsError::not_found(path)),
        Err(error) => Err(FsError::io("inspect", path, error)),
    }
}

/// Returns the lexical parent of `path`.
///
/// A bare relative name has parent `.`; the root is its own parent.
#[must_use]
pub fn parent_dir(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    match path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => PathBuf::from("."),
        Some(parent) => parent.to_path_buf(),
        None if path.has_root() => path.to_path_buf(),
        None => PathBuf::from("."),
    }
}
