//! crates/logging/src/levels.rs
//! Debug flag enum and the per-flag level table.

/// Debug flags for diagnostic categories.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DebugFlag {
    /// Directory descent, ascent and per-entry production.
    Walk,
    /// Subtree pruning requests.
    Skip,
    /// Filesystem primitive operations.
    Fs,
}

impl DebugFlag {
    /// Every flag, in the order used for rendering filter directives.
    pub const ALL: [Self; 3] = [Self::Walk, Self::Skip, Self::Fs];

    /// Returns the token used for this flag on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Walk => "walk",
            Self::Skip => "skip",
            Self::Fs => "fs",
        }
    }

    /// Returns the `tracing` target that events in this category use.
    #[must_use]
    pub const fn target(self) -> &'static str {
        match self {
            Self::Walk => crate::WALK_TARGET,
            Self::Skip => crate::SKIP_TARGET,
            Self::Fs => crate::FS_TARGET,
        }
    }

    /// Looks up a flag by its command-line token.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|flag| flag.name() == name)
    }
}

/// Debug verbosity levels for each flag.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct DebugLevels {
    /// Traversal level.
    pub walk: u8,
    /// Subtree pruning level.
    pub skip: u8,
    /// Filesystem primitive level.
    pub fs: u8,
}

impl DebugLevels {
    /// Returns the level configured for `flag`.
    #[must_use]
    pub const fn get(&self, flag: DebugFlag) -> u8 {
        match flag {
            DebugFlag::Walk => self.walk,
            DebugFlag::Skip => self.skip,
            DebugFlag::Fs => self.fs,
        }
    }

    /// Sets the level for `flag`.
    pub fn set(&mut self, flag: DebugFlag, level: u8) {
        match flag {
            DebugFlag::Walk => self.walk = level,
            DebugFlag::Skip => self.skip = level,
            DebugFlag::Fs => self.fs = level,
        }
    }

    /// Sets every flag to `level`.
    pub fn set_all(&mut self, level: u8) {
        for flag in DebugFlag::ALL {
            self.set(flag, level);
        }
    }
}
