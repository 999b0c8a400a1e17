use crate::error::FsError;
use crate::query::{FileType, exists, get_type};
use logging::trace_fs;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walk::{EntryKind, WalkBuilder};

/// Renames `src` to `dst`. Equal paths are a no-op.
///
/// Fails with [`FsError::Exists`] when `dst` is occupied and with
/// [`FsError::NotFound`] when `src` is missing.
pub fn move_path(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> Result<(), FsError> {
    let (src, dst) = (src.as_ref(), dst.as_ref());
    if src == dst {
        return Ok(());
    }
    if exists(dst)? {
        return Err(FsError::exists(dst));
    }
    if !exists(src)? {
        return Err(FsError::not_found(src));
    }

    trace_fs!("moving {:?} to {:?}", src, dst);
    fs::rename(src, dst).map_err(|error| FsError::io("move", src, error))
}

/// Copies a file, symlink or directory tree from `src` to `dst`.
///
/// Equal paths are a no-op. Symlinks are recreated rather than followed, at
/// the top level and inside directories. Directory trees are copied in
/// sorted pre-order; the first failure aborts the copy and leaves whatever
/// was already written in place.
pub fn copy(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> Result<(), FsError> {
    let (src, dst) = (src.as_ref(), dst.as_ref());
    if src == dst {
        return Ok(());
    }
    if exists(dst)? {
        return Err(FsError::exists(dst));
    }

    let metadata = match fs::symlink_metadata(src) {
        Ok(metadata) => metadata,
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            return Err(FsError::not_found(src));
        }
        Err(error) => return Err(FsError::io("inspect", src, error)),
    };

    let file_type = metadata.file_type();
    if file_type.is_symlink() {
        copy_symlink(src, dst)
    } else if file_type.is_dir() {
        copy_tree(src, dst)
    } else if file_type.is_file() {
        copy_file(src, dst)
    } else {
        Err(FsError::io("copy", src, unsupported()))
    }
}

fn copy_tree(src: &Path, dst: &Path) -> Result<(), FsError> {
    trace_fs!("copying directory {:?} to {:?}", src, dst);
    fs::create_dir(dst).map_err(|error| FsError::io("create directory", dst, error))?;

    let walker = WalkBuilder::new(src).sort_entries(true).build()?;
    for entry in walker {
        let entry = entry?;
        let target = dst.join(entry.relative_path());
        match entry.kind() {
            EntryKind::Directory => fs::create_dir(&target)
                .map_err(|error| FsError::io("create directory", &target, error))?,
            EntryKind::File => copy_file(entry.path(), &target)?,
            EntryKind::Symlink => copy_symlink(entry.path(), &target)?,
            EntryKind::Other => {
                trace_fs!("not copying special file {:?}", entry.path());
            }
        }
    }
    Ok(())
}

fn copy_file(src: &Path, dst: &Path) -> Result<(), FsError> {
    trace_fs!("copying file {:?} to {:?}", src, dst);
    fs::copy(src, dst)
        .map(drop)
        .map_err(|error| FsError::io("copy file", src, error))
}

fn copy_symlink(src: &Path, dst: &Path) -> Result<(), FsError> {
    let target = fs::read_link(src).map_err(|error| FsError::io("read symlink", src, error))?;
    trace_fs!("recreating symlink {:?} -> {:?}", dst, target);
    symlink(&target, dst).map_err(|error| FsError::io("create symlink", dst, error))
}

/// Removes whatever is at `path`, recursively for directories.
///
/// Returns `false` when nothing was there. Symlinks are removed, never their
/// targets.
pub fn remove(path: impl AsRef<Path>) -> Result<bool, FsError> {
    let path = path.as_ref();
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(error) => return Err(FsError::io("inspect", path, error)),
    };

    if !metadata.is_dir() {
        trace_fs!("removing {:?}", path);
        fs::remove_file(path).map_err(|error| FsError::io("remove", path, error))?;
        return Ok(true);
    }

    trace_fs!("removing directory tree {:?}", path);
    let mut directories: Vec<PathBuf> = Vec::new();
    for entry in WalkBuilder::new(path).build()? {
        let entry = entry?;
        if entry.kind() == EntryKind::Directory {
            directories.push(entry.into_path());
        } else {
            fs::remove_file(entry.path())
                .map_err(|error| FsError::io("remove", entry.path(), error))?;
        }
    }
    // Pre-order puts parents first, so removing in reverse empties children first.
    for directory in directories.iter().rev() {
        fs::remove_dir(directory).map_err(|error| FsError::io("remove directory", directory, error))?;
    }
    fs::remove_dir(path).map_err(|error| FsError::io("remove directory", path, error))?;
    Ok(true)
}

/// Creates a symlink at `path` pointing at `target`, which need not exist.
pub fn create_symlink(path: impl AsRef<Path>, target: impl AsRef<Path>) -> Result<(), FsError> {
    let (path, target) = (path.as_ref(), target.as_ref());
    if exists(path)? {
        return Err(FsError::exists(path));
    }
    trace_fs!("creating symlink {:?} -> {:?}", path, target);
    symlink(target, path).map_err(|error| FsError::io("create symlink", path, error))
}

/// Creates `path` and any missing parents.
///
/// Returns `false` when a directory (or a symlink to one) is already there
/// and fails with [`FsError::Exists`] when something else is.
pub fn create_directory(path: impl AsRef<Path>) -> Result<bool, FsError> {
    let path = path.as_ref();
    match get_type(path)? {
        FileType::Directory => Ok(false),
        FileType::NotFound => {
            trace_fs!("creating directory {:?}", path);
            fs::create_dir_all(path)
                .map_err(|error| FsError::io("create directory", path, error))?;
            Ok(true)
        }
        FileType::File | FileType::Symlink | FileType::Other => Err(FsError::exists(path)),
    }
}

#[cfg(unix)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    let resolved = link
        .parent()
        .map_or_else(|| target.to_path_buf(), |parent| parent.join(target));
    if resolved.is_dir() {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    }
}

#[cfg(not(any(unix, windows)))]
fn symlink(_target: &Path, _link: &Path) -> io::Result<()> {
    Err(unsupported())
}

fn unsupported() -> io::Error {
    io::Error::new(
        io::ErrorKind::Unsupported,
        "not a regular file, directory or symlink",
    )
}
