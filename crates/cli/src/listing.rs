use crate::args::TypeFilter;
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::Path;
use walk::{TreeWalker, WalkStats};

/// Output options applied while draining a walker.
#[derive(Debug, Default)]
pub(crate) struct ListingOptions {
    pub(crate) skip: Vec<OsString>,
    pub(crate) type_filter: Option<TypeFilter>,
    pub(crate) null: bool,
}

/// Prints every entry of `walker` to `stdout` and every entry error to
/// `stderr` as a warning.
///
/// Only a failure to write to `stdout` stops the listing early.
pub(crate) fn list_tree<Out, Err>(
    walker: &mut TreeWalker,
    options: &ListingOptions,
    stdout: &mut Out,
    stderr: &mut Err,
) -> io::Result<WalkStats>
where
    Out: Write,
    Err: Write,
{
    let terminator = if options.null { b'\0' } else { b'\n' };

    loop {
        match walker.produce_next() {
            Ok(Some(entry)) => {
                if entry.is_dir()
                    && entry
                        .file_name()
                        .is_some_and(|name| options.skip.iter().any(|skip| skip == name))
                {
                    // The entry is a directory, so the request is always accepted.
                    let _ = walker.skip_subtree();
                }
                if options.type_filter.is_none_or(|filter| filter.matches(&entry)) {
                    write_path(stdout, entry.path())?;
                    stdout.write_all(&[terminator])?;
                }
            }
            Ok(None) => break,
            Err(error) => {
                let _ = writeln!(stderr, "dirwalk: warning: {error}");
            }
        }
    }

    stdout.flush()?;
    Ok(walker.stats())
}

/// Renders the `--summary` line.
pub(crate) fn render_summary(stats: &WalkStats) -> String {
    format!(
        "dirwalk: {} entries ({} directories), {} errors, {} skipped",
        stats.entries, stats.directories, stats.errors, stats.skipped
    )
}

#[cfg(unix)]
fn write_path<W: Write>(out: &mut W, path: &Path) -> io::Result<()> {
    use std::os::unix::ffi::OsStrExt;
    out.write_all(path.as_os_str().as_bytes())
}

#[cfg(not(unix))]
fn write_path<W: Write>(out: &mut W, path: &Path) -> io::Result<()> {
    out.write_all(path.to_string_lossy().as_bytes())
}
