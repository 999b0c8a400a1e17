#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `walk` provides a resumable, depth-first traversal of a directory tree.
//! [`TreeWalker`] hands out one entry per call, keeps going past entries it
//! cannot access, and lets the caller prune the subtree of the directory it
//! just produced.
//!
//! # Design
//!
//! - [`WalkBuilder`] configures traversal options such as whether the root entry
//!   should be emitted, whether directory symlinks may be followed, whether
//!   sibling order is sorted and how deep to descend.
//! - [`TreeWalker`] owns a stack of per-directory frames. Reading the stack
//!   bottom-to-top gives the chain of directories from the root to the one
//!   being enumerated. Descent is lazy: a produced directory is opened on the
//!   following step, which is what makes [`TreeWalker::skip_subtree`] free.
//! - [`TreeWalker::produce_next`] returns `Ok(Some(entry))`, `Ok(None)` at the
//!   end, or a [`WalkError`] describing the one entry that failed. The walker
//!   has already advanced when the error is returned, so callers recover by
//!   calling again. [`TreeWalker`] also implements [`Iterator`], where an
//!   `Err` item does not end iteration.
//!
//! # Invariants
//!
//! - Every produced path is the root as supplied joined with a relative path
//!   that never contains `..` segments.
//! - A directory is produced before its children. No entry is produced twice.
//! - A skip request applies only to the most recently produced directory and
//!   is consumed by the next step.
//! - With symlink following enabled, a directory is entered at most once, so
//!   symlink cycles terminate.
//! - Sibling order follows the filesystem unless sorting is requested.
//!
//! # Errors
//!
//! Construction fails with [`WalkErrorKind::NotADirectory`] when the root is
//! missing or not a directory, and with [`WalkErrorKind::RootMetadata`] or
//! [`WalkErrorKind::ReadDir`] when the root cannot be inspected or listed.
//! Every error returned by a traversal step satisfies
//! [`WalkError::is_entry_access`]. Misusing the accessors yields
//! [`MisuseError`].
//!
//! # Examples
//!
//! Traverse a tree, pruning one directory, and collect the relative paths:
//!
//! ```
//! use std::collections::BTreeSet;
//! use std::ffi::OsStr;
//! use std::fs;
//! use std::path::PathBuf;
//! use walk::TreeWalker;
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! let root = temp.path();
//! fs::write(root.join("a"), b"data")?;
//! fs::create_dir(root.join("dir1"))?;
//! fs::write(root.join("dir1/b"), b"data")?;
//! fs::create_dir(root.join("dir2"))?;
//! fs::write(root.join("dir2/c"), b"data")?;
//!
//! let mut walker = TreeWalker::new(root)?;
//! let mut seen = BTreeSet::new();
//! loop {
//!     match walker.produce_next() {
//!         Ok(Some(entry)) => {
//!             if entry.file_name() == Some(OsStr::new("dir2")) {
//!                 walker.skip_subtree()?;
//!             }
//!             seen.insert(entry.relative_path().to_path_buf());
//!         }
//!         Ok(None) => break,
//!         Err(error) => eprintln!("warning: {error}"),
//!     }
//! }
//!
//! let expected: BTreeSet<PathBuf> = ["a", "dir1", "dir1/b", "dir2"]
//!     .into_iter()
//!     .map(PathBuf::from)
//!     .collect();
//! assert_eq!(seen, expected);
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

mod builder;
mod entry;
mod error;
mod frame;
mod walker;

#[cfg(test)]
mod tests;

pub use crate::builder::WalkBuilder;
pub use crate::entry::{EntryKind, WalkEntry};
pub use crate::error::{MisuseError, WalkError, WalkErrorKind};
pub use crate::walker::{TreeWalker, WalkState, WalkStats};
