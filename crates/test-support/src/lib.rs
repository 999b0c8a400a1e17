#![deny(missing_docs)]

//! Shared fixture trees for the dirwalk test suites.
//!
//! [`TreeFixture`] creates a scratch directory tree inside a [`TempDir`] and
//! records every entry it creates, so tests can compare the set produced by
//! a walker against the set that should exist. Directories created with
//! [`TreeFixture::inaccessible_dir`] have their permissions stripped; their
//! contents are recorded separately as unreachable.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A scratch directory tree with a record of what it contains.
#[derive(Debug)]
pub struct TreeFixture {
    _temp: TempDir,
    root: PathBuf,
    entries: BTreeSet<PathBuf>,
    unreachable: BTreeSet<PathBuf>,
    locked: Vec<PathBuf>,
}

impl TreeFixture {
    /// Creates an empty tree rooted at `<tempdir>/tree`.
    pub fn new() -> io::Result<Self> {
        let temp = tempfile::tempdir()?;
        let root = temp.path().join("tree");
        fs::create_dir(&root)?;
        Ok(Self {
            _temp: temp,
            root,
            entries: BTreeSet::new(),
            unreachable: BTreeSet::new(),
            locked: Vec::new(),
        })
    }

    /// The tree used throughout the documentation: file `a`, directory
    /// `dir1` containing `b`, directory `dir2` containing `c`.
    pub fn sample() -> io::Result<Self> {
        let mut fixture = Self::new()?;
        fixture
            .file("a", b"a")?
            .dir("dir1")?
            .file("dir1/b", b"b")?
            .dir("dir2")?
            .file("dir2/c", b"c")?;
        Ok(fixture)
    }

    /// A deeper tree mixing files, nested and empty directories, and on Unix
    /// symlinks (one dangling) plus two permission-stripped directories.
    pub fn full() -> io::Result<Self> {
        let mut fixture = Self::sample()?;
        fixture
            .file("dir1/b2", b"b2")?
            .dir("dir2/sub")?
            .file("dir2/sub/d", b"d")?
            .dir("dir2/sub/deeper")?
            .file("dir2/sub/deeper/e", b"e")?
            .dir("empty")?
            .file("dir3 with spaces", b"f")?;
        #[cfg(unix)]
        {
            fixture
                .symlink("link_to_a", "a")?
                .symlink("link_to_dir1", "dir1")?
                .symlink("dangling", "does-not-exist")?
                .inaccessible_dir("noacc", &["hidden", "nested/deep"])?
                .inaccessible_dir("dir1/noacc2", &["secret"])?;
        }
        Ok(fixture)
    }

    /// Returns the root of the tree.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the absolute path of `relative` inside the tree.
    #[must_use]
    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }

    /// Creates a regular file. Parent directories must already exist.
    pub fn file(&mut self, relative: impl AsRef<Path>, contents: &[u8]) -> io::Result<&mut Self> {
        let relative = relative.as_ref();
        fs::write(self.root.join(relative), contents)?;
        self.entries.insert(relative.to_path_buf());
        Ok(self)
    }

    /// Creates a directory. Its parent must already exist.
    pub fn dir(&mut self, relative: impl AsRef<Path>) -> io::Result<&mut Self> {
        let relative = relative.as_ref();
        fs::create_dir(self.root.join(relative))?;
        self.entries.insert(relative.to_path_buf());
        Ok(self)
    }

    /// Creates a symlink at `relative` pointing at `target` (not resolved).
    #[cfg(unix)]
    pub fn symlink(
        &mut self,
        relative: impl AsRef<Path>,
        target: impl AsRef<Path>,
    ) -> io::Result<&mut Self> {
        let relative = relative.as_ref();
        std::os::unix::fs::symlink(target, self.root.join(relative))?;
        self.entries.insert(relative.to_path_buf());
        Ok(self)
    }

    /// Creates a directory holding `children` (files, with any intermediate
    /// directories), then strips all its permissions.
    ///
    /// The directory itself stays listable from its parent and is recorded
    /// as an entry; everything inside it is recorded as unreachable.
    #[cfg(unix)]
    pub fn inaccessible_dir(
        &mut self,
        relative: impl AsRef<Path>,
        children: &[&str],
    ) -> io::Result<&mut Self> {
        use std::os::unix::fs::PermissionsExt;

        let relative = relative.as_ref().to_path_buf();
        let dir = self.root.join(&relative);
        fs::create_dir(&dir)?;
        for child in children {
            let child_rel = relative.join(child);
            let mut ancestor = child_rel.parent();
            while let Some(parent) = ancestor {
                if parent == relative {
                    break;
                }
                if self.unreachable.insert(parent.to_path_buf()) {
                    fs::create_dir_all(self.root.join(parent))?;
                }
                ancestor = parent.parent();
            }
            fs::write(self.root.join(&child_rel), b"hidden")?;
            self.unreachable.insert(child_rel);
        }
        fs::set_permissions(&dir, fs::Permissions::from_mode(0o000))?;
        self.entries.insert(relative);
        self.locked.push(dir);
        Ok(self)
    }

    /// Removes an entry (recursively for directories) after the fact, and
    /// forgets it and everything below it.
    pub fn remove(&mut self, relative: impl AsRef<Path>) -> io::Result<()> {
        let relative = relative.as_ref();
        let path = self.root.join(relative);
        if fs::symlink_metadata(&path)?.is_dir() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
        self.entries.retain(|entry| !entry.starts_with(relative));
        Ok(())
    }

    /// Every entry that a complete traversal should produce, relative to the
    /// root (the root itself excluded).
    #[must_use]
    pub fn expected(&self) -> &BTreeSet<PathBuf> {
        &self.entries
    }

    /// Entries hidden inside permission-stripped directories.
    #[must_use]
    pub fn unreachable(&self) -> &BTreeSet<PathBuf> {
        &self.unreachable
    }

    /// Number of permission-stripped directories.
    #[must_use]
    pub fn locked_dirs(&self) -> usize {
        self.locked.len()
    }

    /// Reports whether stripped permissions actually deny access.
    ///
    /// Privileged users bypass permission checks, in which case tests that
    /// rely on access errors should skip themselves. A fixture without
    /// stripped directories returns `false`.
    #[must_use]
    pub fn permissions_enforced(&self) -> bool {
        !self.locked.is_empty() && self.locked.iter().all(|dir| fs::read_dir(dir).is_err())
    }
}

impl Drop for TreeFixture {
    fn drop(&mut self) {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            for dir in &self.locked {
                let _ = fs::set_permissions(dir, fs::Permissions::from_mode(0o755));
            }
        }
    }
}
