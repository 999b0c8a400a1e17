use crate::builder::WalkOptions;
use crate::entry::{EntryKind, WalkEntry};
use crate::error::{MisuseError, WalkError};
use crate::frame::TraversalFrame;
use logging::{trace_entry, trace_skip, trace_walk};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::iter::FusedIterator;
use std::mem;
use std::path::{Path, PathBuf};

/// Lifecycle of a [`TreeWalker`].
///
/// Errors are per-call signals and never a state of their own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalkState {
    /// Constructed; nothing produced yet.
    Fresh,
    /// An entry is current.
    Positioned,
    /// The end-of-sequence sentinel was returned. Terminal.
    Exhausted,
}

/// Counters accumulated over one traversal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Entries produced, the root included when it was emitted.
    pub entries: u64,
    /// Produced entries that were treated as directories.
    pub directories: u64,
    /// Entry access errors reported.
    pub errors: u64,
    /// Directories whose descent was pruned by [`TreeWalker::skip_subtree`].
    pub skipped: u64,
}

#[derive(Debug)]
struct CurrentEntry {
    path: PathBuf,
    is_dir: bool,
    /// Set once a step has acted on this directory's descent.
    descent_consumed: bool,
}

/// What the next step must do about the most recently produced directory.
#[derive(Debug)]
enum Descent {
    /// A directory whose listing has not been opened yet.
    Pending {
        fs_path: PathBuf,
        relative_path: PathBuf,
        depth: usize,
    },
    /// The root, whose frame was pushed at construction.
    Root,
}

/// Resumable depth-first iterator over a directory tree.
///
/// Each call to [`produce_next`](Self::produce_next) yields one entry in
/// pre-order. A failing step reports an error for that entry only; the
/// walker has already moved past it, so the caller just calls again.
///
/// The walker is single-owner: every mutating operation takes `&mut self`.
/// Distinct walkers share no state and may run on separate threads.
#[derive(Debug)]
pub struct TreeWalker {
    root: PathBuf,
    options: WalkOptions,
    stack: Vec<TraversalFrame>,
    root_entry: Option<fs::Metadata>,
    current: Option<CurrentEntry>,
    descent: Option<Descent>,
    skip_requested: bool,
    exhausted: bool,
    visited: HashSet<PathBuf>,
    stats: WalkStats,
}

impl TreeWalker {
    /// Creates a walker over `root` with default options.
    ///
    /// The root must be a directory (a symlink to one is accepted). Its
    /// listing is opened immediately, so a bad root fails here rather than
    /// on the first step.
    pub fn new<P: Into<PathBuf>>(root: P) -> Result<Self, WalkError> {
        Self::with_options(root.into(), WalkOptions::default())
    }

    pub(crate) fn with_options(root: PathBuf, options: WalkOptions) -> Result<Self, WalkError> {
        trace_walk!("walking tree from {:?}", root);

        let metadata = match fs::metadata(&root) {
            Ok(metadata) => metadata,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                return Err(WalkError::not_a_directory(root));
            }
            Err(error) => return Err(WalkError::root_metadata(root, error)),
        };
        if !metadata.is_dir() {
            return Err(WalkError::not_a_directory(root));
        }

        let mut visited = HashSet::new();
        if options.follow_symlinks {
            let canonical = fs::canonicalize(&root)
                .map_err(|error| WalkError::canonicalize(root.clone(), error))?;
            visited.insert(canonical);
        }

        let mut stack = Vec::new();
        if within_depth(options.max_depth, 0) {
            stack.push(TraversalFrame::open(
                root.clone(),
                PathBuf::new(),
                0,
                options.sort_entries,
            )?);
        }

        Ok(Self {
            root,
            options,
            stack,
            root_entry: options.include_root.then_some(metadata),
            current: None,
            descent: None,
            skip_requested: false,
            exhausted: false,
            visited,
            stats: WalkStats::default(),
        })
    }

    /// Produces the next entry, `Ok(None)` once the tree is exhausted, or an
    /// entry access error.
    ///
    /// An error never ends the traversal. The offending entry has already
    /// been passed over: its cursor advanced, its descent consumed, or its
    /// frame popped. After `Ok(None)` every further call returns `Ok(None)`.
    pub fn produce_next(&mut self) -> Result<Option<WalkEntry>, WalkError> {
        if self.exhausted {
            return Ok(None);
        }

        let skip = mem::take(&mut self.skip_requested);

        if let Some(metadata) = self.root_entry.take() {
            return Ok(Some(self.emit_root(metadata)));
        }

        let descent = self.descent.take();
        if descent.is_some()
            && let Some(current) = self.current.as_mut()
        {
            current.descent_consumed = true;
        }

        match descent {
            Some(Descent::Root) if skip => {
                trace_skip!("not descending into root {:?}", self.root);
                self.stats.skipped += 1;
                self.stack.clear();
            }
            Some(Descent::Pending { fs_path, .. }) if skip => {
                trace_skip!("not descending into {:?}", fs_path);
                self.stats.skipped += 1;
            }
            Some(Descent::Pending {
                fs_path,
                relative_path,
                depth,
            }) => {
                if let Err(error) = self.enter(fs_path, relative_path, depth) {
                    return Err(self.record_error(error));
                }
            }
            Some(Descent::Root) | None => {}
        }

        loop {
            let Some(frame) = self.stack.last_mut() else {
                trace_walk!("traversal of {:?} complete", self.root);
                self.exhausted = true;
                self.current = None;
                return Ok(None);
            };

            match frame.next_name() {
                None => {
                    trace_walk!("leaving directory: {:?}", frame.fs_path());
                    self.stack.pop();
                }
                Some(Err(error)) => {
                    let path = frame.fs_path().to_path_buf();
                    self.stack.pop();
                    return Err(self.record_error(WalkError::read_dir_entry(path, error)));
                }
                Some(Ok(name)) => {
                    let full_path = frame.fs_path().join(&name);
                    let relative_path = frame.child_relative_path(&name);
                    let depth = frame.child_depth();
                    return match self.prepare_entry(full_path, relative_path, depth) {
                        Ok(entry) => Ok(Some(entry)),
                        Err(error) => Err(self.record_error(error)),
                    };
                }
            }
        }
    }

    /// Reports whether the most recently produced entry is a directory.
    ///
    /// Fails with [`MisuseError::NotPositioned`] before the first entry and
    /// after exhaustion. A failed step leaves the last entry current.
    pub fn current_is_directory(&self) -> Result<bool, MisuseError> {
        self.current
            .as_ref()
            .map(|current| current.is_dir)
            .ok_or(MisuseError::NotPositioned)
    }

    /// Returns the path of the most recently produced entry, if any.
    #[must_use]
    pub fn current_path(&self) -> Option<&Path> {
        self.current.as_ref().map(|current| current.path.as_path())
    }

    /// Prevents descent into the current directory.
    ///
    /// The next [`produce_next`](Self::produce_next) resumes with the
    /// directory's next sibling. Repeated calls before that step have no
    /// additional effect. Misuse is reported without changing any state.
    ///
    /// A failed step leaves its directory current even though the step
    /// already entered or pruned it; skipping it then fails with
    /// [`MisuseError::DescentConsumed`].
    pub fn skip_subtree(&mut self) -> Result<(), MisuseError> {
        let current = self.current.as_ref().ok_or(MisuseError::NotPositioned)?;
        if !current.is_dir {
            return Err(MisuseError::NotADirectory {
                path: current.path.clone(),
            });
        }
        if current.descent_consumed {
            return Err(MisuseError::DescentConsumed {
                path: current.path.clone(),
            });
        }
        if !self.skip_requested {
            trace_skip!("skip requested for {:?}", current.path);
        }
        self.skip_requested = true;
        Ok(())
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub fn state(&self) -> WalkState {
        if self.exhausted {
            WalkState::Exhausted
        } else if self.current.is_some() {
            WalkState::Positioned
        } else {
            WalkState::Fresh
        }
    }

    /// Returns the root as supplied at construction.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of directories currently being enumerated.
    #[must_use]
    pub fn open_directories(&self) -> usize {
        self.stack.len()
    }

    /// Returns the counters accumulated so far.
    #[must_use]
    pub const fn stats(&self) -> WalkStats {
        self.stats
    }

    fn emit_root(&mut self, metadata: fs::Metadata) -> WalkEntry {
        trace_entry!("emitting root entry {:?}", self.root);
        self.descent = Some(Descent::Root);
        self.current = Some(CurrentEntry {
            path: self.root.clone(),
            is_dir: true,
            descent_consumed: false,
        });
        self.stats.entries += 1;
        self.stats.directories += 1;

        WalkEntry {
            path: self.root.clone(),
            relative_path: PathBuf::new(),
            metadata,
            kind: EntryKind::Directory,
            is_dir: true,
            depth: 0,
            is_root: true,
        }
    }

    fn enter(
        &mut self,
        fs_path: PathBuf,
        relative_path: PathBuf,
        depth: usize,
    ) -> Result<(), WalkError> {
        if self.options.follow_symlinks {
            let canonical = fs::canonicalize(&fs_path)
                .map_err(|error| WalkError::canonicalize(fs_path.clone(), error))?;
            if !self.visited.insert(canonical) {
                trace_walk!("skipping already visited directory: {:?}", fs_path);
                return Ok(());
            }
        }

        trace_walk!("entering directory: {:?}", fs_path);
        let frame = TraversalFrame::open(fs_path, relative_path, depth, self.options.sort_entries)?;
        self.stack.push(frame);
        Ok(())
    }

    fn prepare_entry(
        &mut self,
        full_path: PathBuf,
        relative_path: PathBuf,
        depth: usize,
    ) -> Result<WalkEntry, WalkError> {
        trace_entry!("processing entry: {:?}", relative_path);

        let metadata = fs::symlink_metadata(&full_path)
            .map_err(|error| WalkError::metadata(full_path.clone(), error))?;
        let kind = EntryKind::from_file_type(metadata.file_type());

        let is_dir = match kind {
            EntryKind::Directory => true,
            EntryKind::Symlink if self.options.follow_symlinks => match fs::metadata(&full_path) {
                Ok(target) => target.is_dir(),
                Err(error) => {
                    trace_entry!("not following dangling symlink {:?}: {}", full_path, error);
                    false
                }
            },
            _ => false,
        };

        if is_dir && within_depth(self.options.max_depth, depth) {
            self.descent = Some(Descent::Pending {
                fs_path: full_path.clone(),
                relative_path: relative_path.clone(),
                depth,
            });
        }

        self.stats.entries += 1;
        if is_dir {
            self.stats.directories += 1;
        }
        self.current = Some(CurrentEntry {
            path: full_path.clone(),
            is_dir,
            descent_consumed: false,
        });

        Ok(WalkEntry {
            path: full_path,
            relative_path,
            metadata,
            kind,
            is_dir,
            depth,
            is_root: false,
        })
    }

    #[cfg(test)]
    pub(crate) fn push_frame(&mut self, frame: TraversalFrame) {
        self.stack.push(frame);
    }

    fn record_error(&mut self, error: WalkError) -> WalkError {
        self.stats.errors += 1;
        trace_entry!("entry access error: {}", error);
        error
    }
}

impl Iterator for TreeWalker {
    type Item = Result<WalkEntry, WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.produce_next().transpose()
    }
}

impl FusedIterator for TreeWalker {}

const fn within_depth(max_depth: Option<usize>, depth: usize) -> bool {
    match max_depth {
        Some(max) => depth < max,
        None => true,
    }
}
