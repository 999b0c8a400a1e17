#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` maps the dirwalk verbosity switches (`-v`, `--debug FLAGS`) onto
//! [`tracing`] targets. Library crates emit events through the target-scoped
//! macros exported here ([`trace_walk!`], [`trace_entry!`], [`trace_skip!`],
//! [`trace_fs!`]); binaries call [`init_tracing`] once with a
//! [`VerbosityConfig`] to decide which of those events reach stderr.
//!
//! # Design
//!
//! - [`DebugFlag`] names a diagnostic category and owns its `tracing` target.
//! - [`VerbosityConfig`] stores one level per flag and renders itself into
//!   `EnvFilter` directives: level 1 enables `info`, 2 `debug`, 3 and above
//!   `trace`.
//! - [`LOG_ENV_VAR`] overrides the derived directives for ad-hoc debugging.
//!
//! # Examples
//!
//! ```
//! use logging::VerbosityConfig;
//!
//! let mut config = VerbosityConfig::from_verbose_level(1);
//! config.apply_debug_flags("skip2").unwrap();
//! assert_eq!(
//!     config.filter_directives(),
//!     "warn,dirwalk::walk=info,dirwalk::skip=debug"
//! );
//! ```

mod config;
mod levels;
mod tracing_bridge;
mod tracing_macros;

pub use config::VerbosityConfig;
pub use levels::{DebugFlag, DebugLevels};
pub use tracing_bridge::{LOG_ENV_VAR, build_filter, init_tracing};

/// Target used by traversal events.
pub const WALK_TARGET: &str = "dirwalk::walk";
/// Target used by subtree pruning events.
pub const SKIP_TARGET: &str = "dirwalk::skip";
/// Target used by filesystem primitive events.
pub const FS_TARGET: &str = "dirwalk::fs";
