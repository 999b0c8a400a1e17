//! crates/logging/src/tracing_bridge.rs
//! Installation of the process-wide tracing subscriber.
//!
//! The verbosity configuration is rendered into an [`EnvFilter`] so standard
//! `tracing` macros on the workspace targets are enabled or disabled according
//! to `-v` and `--debug`. Setting [`LOG_ENV_VAR`] replaces the derived filter
//! entirely, using the usual directive syntax.
//!
//! # Usage
//!
//! ```rust,ignore
//! use logging::{VerbosityConfig, init_tracing};
//!
//! let config = VerbosityConfig::from_verbose_level(2);
//! init_tracing(&config);
//!
//! tracing::debug!(target: "dirwalk::walk", "entering directory");
//! ```

use super::config::VerbosityConfig;
use std::io;
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the derived filter.
pub const LOG_ENV_VAR: &str = "DIRWALK_LOG";

/// Builds the filter for `config`, preferring [`LOG_ENV_VAR`] when it is set
/// and parses.
#[must_use]
pub fn build_filter(config: &VerbosityConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(config.filter_directives()))
}

/// Initialize tracing with the dirwalk verbosity configuration.
///
/// Events are written to stderr without timestamps so they interleave
/// cleanly with listing output. Returns `false` when a global subscriber was
/// already installed, in which case the existing one stays in effect.
pub fn init_tracing(config: &VerbosityConfig) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(config))
        .with_writer(io::stderr)
        .with_target(true)
        .without_time()
        .try_init()
        .is_ok()
}
