//! crates/logging/src/tracing_macros.rs
//! Convenience macros for dirwalk-specific tracing.
//!
//! These macros provide ergonomic wrappers around standard tracing macros
//! with appropriate targets for each subsystem. Callers must depend on
//! `tracing` directly.

/// Emit a directory descent or ascent trace.
///
/// # Example
/// ```ignore
/// trace_walk!("entering directory: {:?}", path);
/// ```
#[macro_export]
macro_rules! trace_walk {
    ($($arg:tt)*) => {
        ::tracing::info!(target: "dirwalk::walk", $($arg)*);
    };
}

/// Emit a per-entry trace at `debug`, one level finer than [`trace_walk!`].
///
/// # Example
/// ```ignore
/// trace_entry!("processing entry: {:?}", relative_path);
/// ```
#[macro_export]
macro_rules! trace_entry {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "dirwalk::walk", $($arg)*);
    };
}

/// Emit a subtree pruning trace.
///
/// # Example
/// ```ignore
/// trace_skip!("not descending into {:?}", path);
/// ```
#[macro_export]
macro_rules! trace_skip {
    ($($arg:tt)*) => {
        ::tracing::info!(target: "dirwalk::skip", $($arg)*);
    };
}

/// Emit a filesystem primitive trace.
///
/// # Example
/// ```ignore
/// trace_fs!("renaming {:?} to {:?}", src, dst);
/// ```
#[macro_export]
macro_rules! trace_fs {
    ($($arg:tt)*) => {
        ::tracing::info!(target: "dirwalk::fs", $($arg)*);
    };
}
