#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` implements the `dirwalk` command-line front-end. It lists every
//! entry below a root directory, one path per line, reports unreadable
//! entries as warnings without stopping, and can prune directories by name.
//!
//! # Design
//!
//! [`run`] accepts an iterator of arguments together with handles for
//! standard output and error and returns the process exit code. A
//! [`clap`](https://docs.rs/clap/) command definition parses the arguments;
//! the traversal itself is a [`walk::TreeWalker`] configured through
//! [`walk::WalkBuilder`]. Verbosity switches are translated into a
//! [`logging::VerbosityConfig`] and installed with
//! [`logging::init_tracing`].
//!
//! # Invariants
//!
//! - `run` never panics; unexpected I/O failures surface as non-zero exit codes.
//! - Listed paths are the root as given joined with each entry's relative
//!   path, so relative roots produce relative output.
//! - An entry error never stops the listing; it turns exit code `0` into
//!   [`EXIT_PARTIAL`].
//!
//! # Errors
//!
//! Usage errors and an unusable root exit with [`EXIT_FAILURE`]. A listing
//! that completed with at least one entry error exits with [`EXIT_PARTIAL`].
//!
//! # Examples
//!
//! ```
//! use cli::run;
//!
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let exit_code = run(["dirwalk", "--version"], &mut stdout, &mut stderr);
//!
//! assert_eq!(exit_code, 0);
//! assert!(String::from_utf8(stdout).unwrap().starts_with("dirwalk "));
//! assert!(stderr.is_empty());
//! ```

use std::ffi::OsString;
use std::io::Write;

use logging::VerbosityConfig;
use walk::WalkBuilder;

mod args;
mod listing;

use crate::args::{ParsedArgs, parse_args};
use crate::listing::{ListingOptions, list_tree, render_summary};

/// Exit code for a complete listing.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for usage errors and unusable roots.
pub const EXIT_FAILURE: i32 = 1;
/// Exit code for a listing that skipped entries it could not read.
pub const EXIT_PARTIAL: i32 = 23;

/// Maximum exit code representable by a Unix process.
const MAX_EXIT_CODE: i32 = u8::MAX as i32;

/// Deterministic help text describing the supported options.
const HELP_TEXT: &str = concat!(
    "dirwalk ",
    env!("CARGO_PKG_VERSION"),
    "\n",
    "\n",
    "Usage: dirwalk [OPTIONS] ROOT\n",
    "\n",
    "Lists every entry below ROOT, one path per line. Entries that cannot be\n",
    "read are reported as warnings and the listing continues.\n",
    "\n",
    "Options:\n",
    "  -h, --help             Show this help message and exit.\n",
    "  -V, --version          Output version information and exit.\n",
    "  -v, --verbose          Increase diagnostic verbosity; may be repeated.\n",
    "      --debug=FLAGS      Enable diagnostics for walk, skip or fs (e.g. walk2).\n",
    "      --skip=NAME        Do not descend into directories named NAME.\n",
    "  -L, --follow-symlinks  Descend into symlinked directories.\n",
    "      --sort             List siblings in lexicographic order.\n",
    "      --include-root     List ROOT itself before its contents.\n",
    "      --max-depth=N      Do not descend below depth N.\n",
    "      --type=KIND        Only print entries of KIND: f, d or l.\n",
    "  -0, --null             Terminate printed paths with NUL instead of newline.\n",
    "      --summary          Print traversal counts to stderr when done.\n",
    "\n",
    "Exit status is 0 on success, 1 on usage errors or an unusable ROOT, and\n",
    "23 when some entries could not be read.\n",
    "\n",
    "Set DIRWALK_LOG to an EnvFilter directive to override the log filter.\n",
);

/// Runs the CLI using the provided argument iterator and output handles.
///
/// The function returns the process exit code that should be used by the
/// caller.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    match parse_args(arguments) {
        Ok(parsed) => execute(parsed, stdout, stderr),
        Err(error) => {
            let rendered = error.to_string();
            let _ = writeln!(stderr, "dirwalk: {}", rendered.trim_end());
            let _ = writeln!(stderr, "Try 'dirwalk --help' for more information.");
            EXIT_FAILURE
        }
    }
}

fn execute<Out, Err>(parsed: ParsedArgs, stdout: &mut Out, stderr: &mut Err) -> i32
where
    Out: Write,
    Err: Write,
{
    if parsed.show_help {
        return match stdout.write_all(HELP_TEXT.as_bytes()) {
            Ok(()) => EXIT_SUCCESS,
            Err(_) => EXIT_FAILURE,
        };
    }

    if parsed.show_version {
        return match writeln!(stdout, "dirwalk {}", env!("CARGO_PKG_VERSION")) {
            Ok(()) => EXIT_SUCCESS,
            Err(_) => EXIT_FAILURE,
        };
    }

    let mut verbosity = VerbosityConfig::from_verbose_level(parsed.verbose);
    for flags in &parsed.debug {
        if let Err(message) = verbosity.apply_debug_flags(flags) {
            let _ = writeln!(stderr, "dirwalk: {message}");
            return EXIT_FAILURE;
        }
    }
    logging::init_tracing(&verbosity);

    let Some(root) = parsed.root else {
        let _ = writeln!(stderr, "dirwalk: missing ROOT operand");
        let _ = writeln!(stderr, "Try 'dirwalk --help' for more information.");
        return EXIT_FAILURE;
    };

    let mut walker = match WalkBuilder::new(root)
        .follow_symlinks(parsed.follow_symlinks)
        .sort_entries(parsed.sort)
        .include_root(parsed.include_root)
        .max_depth(parsed.max_depth)
        .build()
    {
        Ok(walker) => walker,
        Err(error) => {
            let _ = writeln!(stderr, "dirwalk: error: {error}");
            return EXIT_FAILURE;
        }
    };

    let options = ListingOptions {
        skip: parsed.skip,
        type_filter: parsed.type_filter,
        null: parsed.null,
    };

    let stats = match list_tree(&mut walker, &options, stdout, stderr) {
        Ok(stats) => stats,
        Err(error) => {
            let _ = writeln!(stderr, "dirwalk: error: failed to write listing: {error}");
            return EXIT_FAILURE;
        }
    };

    if parsed.summary {
        let _ = writeln!(stderr, "{}", render_summary(&stats));
    }

    if stats.errors > 0 {
        EXIT_PARTIAL
    } else {
        EXIT_SUCCESS
    }
}

/// Converts a numeric exit code into an [`std::process::ExitCode`].
#[must_use]
pub fn exit_code_from(status: i32) -> std::process::ExitCode {
    let clamped = status.clamp(0, MAX_EXIT_CODE);
    std::process::ExitCode::from(u8::try_from(clamped).unwrap_or(u8::MAX))
}
