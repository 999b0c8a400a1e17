use crate::error::FsError;
use logging::trace_fs;
use std::env;
use std::fs::File;
use std::path::{Path, PathBuf};

const TEMP_PREFIX: &str = ".dirwalk-";

/// Creates a uniquely named file in `base_dir`, or in the system temporary
/// directory when `None`, and returns its path with an open write handle.
///
/// The file is persisted: it is not deleted when the handle is dropped.
pub fn make_temp(base_dir: Option<&Path>) -> Result<(PathBuf, File), FsError> {
    let dir = base_dir.map_or_else(env::temp_dir, Path::to_path_buf);
    let named = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .tempfile_in(&dir)
        .map_err(|error| FsError::io("create temporary file in", &dir, error))?;
    let (file, path) = named
        .keep()
        .map_err(|error| FsError::io("persist temporary file in", &dir, error.error))?;
    trace_fs!("created temporary file {:?}", path);
    Ok((path, file))
}
