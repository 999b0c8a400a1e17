use crate::error::WalkError;
use crate::walker::TreeWalker;
use std::path::PathBuf;

/// Traversal options shared by the builder and the walker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct WalkOptions {
    pub(crate) follow_symlinks: bool,
    pub(crate) include_root: bool,
    pub(crate) sort_entries: bool,
    pub(crate) max_depth: Option<usize>,
}

/// Configures a filesystem traversal rooted at a specific path.
///
/// The defaults match [`TreeWalker::new`]: the root itself is not emitted,
/// symlinks are not followed, siblings come in filesystem order and depth
/// is unbounded.
#[derive(Clone, Debug)]
pub struct WalkBuilder {
    root: PathBuf,
    options: WalkOptions,
}

impl WalkBuilder {
    /// Creates a new builder that will traverse the provided root path.
    #[must_use]
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            options: WalkOptions::default(),
        }
    }

    /// Configures whether directory symlinks should be traversed.
    ///
    /// The walker always yields the symlink entry itself. When this option is
    /// enabled and the symlink points to a directory, the walker also descends
    /// into the target directory while maintaining the symlink's relative path
    /// in emitted [`crate::WalkEntry`] values. Canonical paths are tracked so a
    /// directory is entered at most once, which keeps cycles finite.
    #[must_use]
    pub const fn follow_symlinks(mut self, follow: bool) -> Self {
        self.options.follow_symlinks = follow;
        self
    }

    /// Controls whether the root entry should be included in the output.
    ///
    /// When enabled, the first entry is the root itself and skipping it ends
    /// the traversal.
    #[must_use]
    pub const fn include_root(mut self, include: bool) -> Self {
        self.options.include_root = include;
        self
    }

    /// Snapshots each directory listing and yields it in lexicographic order.
    #[must_use]
    pub const fn sort_entries(mut self, sort: bool) -> Self {
        self.options.sort_entries = sort;
        self
    }

    /// Limits descent: directories at `depth` are produced but not entered.
    ///
    /// `Some(0)` produces only the root (if included); `Some(1)` the root's
    /// children.
    #[must_use]
    pub const fn max_depth(mut self, depth: Option<usize>) -> Self {
        self.options.max_depth = depth;
        self
    }

    /// Builds a [`TreeWalker`] using the configured options.
    pub fn build(self) -> Result<TreeWalker, WalkError> {
        TreeWalker::with_options(self.root, self.options)
    }
}
