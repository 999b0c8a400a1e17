#![deny(unsafe_code)]
#![deny(missing_docs)]

//! Filesystem primitives used alongside the [`walk`] traversal.
//!
//! Queries ([`get_type`], [`exists`], [`size`], [`list_children`]) treat a
//! missing path as an answer rather than an error. Mutations refuse to
//! overwrite: [`copy`], [`move_path`] and [`create_symlink`] fail with
//! [`FsError::Exists`] when the destination is occupied. Recursive
//! [`copy`] and [`remove`] enumerate trees with [`walk::TreeWalker`] and
//! never follow symlinks.
//!
//! # Examples
//!
//! ```
//! use fsops::{FileType, copy, create_directory, get_type, remove};
//!
//! # fn demo() -> Result<(), fsops::FsError> {
//! let temp = tempfile::tempdir().expect("tempdir");
//! let src = temp.path().join("src/nested");
//! assert!(create_directory(&src)?);
//! std::fs::write(src.join("file"), b"data").expect("write");
//!
//! let dst = temp.path().join("dst");
//! copy(temp.path().join("src"), &dst)?;
//! assert_eq!(get_type(dst.join("nested/file"))?, FileType::File);
//!
//! assert!(remove(&dst)?);
//! assert_eq!(get_type(&dst)?, FileType::NotFound);
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

mod error;
mod mutate;
mod query;
mod temp;

pub use crate::error::FsError;
pub use crate::mutate::{copy, create_directory, create_symlink, move_path, remove};
pub use crate::query::{
    FileType, exists, get_type, is_directory, is_file, is_symlink, list_children, parent_dir, size,
};
pub use crate::temp::make_temp;
