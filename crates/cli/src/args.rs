use clap::{Arg, ArgAction, Command, builder::OsStringValueParser};
use std::ffi::OsString;
use std::path::PathBuf;
use walk::{EntryKind, WalkEntry};

/// Entry kinds accepted by `--type`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TypeFilter {
    File,
    Directory,
    Symlink,
}

impl TypeFilter {
    fn from_flag(value: &str) -> Option<Self> {
        match value {
            "f" => Some(Self::File),
            "d" => Some(Self::Directory),
            "l" => Some(Self::Symlink),
            _ => None,
        }
    }

    pub(crate) fn matches(self, entry: &WalkEntry) -> bool {
        match self {
            Self::File => entry.kind() == EntryKind::File,
            Self::Directory => entry.is_dir(),
            Self::Symlink => entry.kind() == EntryKind::Symlink,
        }
    }
}

/// Parsed command produced by [`parse_args`].
#[derive(Debug, Default)]
pub(crate) struct ParsedArgs {
    pub(crate) show_help: bool,
    pub(crate) show_version: bool,
    pub(crate) verbose: u8,
    pub(crate) debug: Vec<String>,
    pub(crate) skip: Vec<OsString>,
    pub(crate) follow_symlinks: bool,
    pub(crate) sort: bool,
    pub(crate) include_root: bool,
    pub(crate) max_depth: Option<usize>,
    pub(crate) type_filter: Option<TypeFilter>,
    pub(crate) null: bool,
    pub(crate) summary: bool,
    pub(crate) root: Option<PathBuf>,
}

/// Builds the `clap` command used for parsing.
pub(crate) fn clap_command() -> Command {
    Command::new("dirwalk")
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg_required_else_help(false)
        .arg(
            Arg::new("help")
                .long("help")
                .short('h')
                .help("Show this help message and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .short('V')
                .help("Output version information and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase diagnostic verbosity; may be repeated.")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .value_name("FLAGS")
                .help("Enable diagnostics for walk, skip or fs, optionally with a level.")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("skip")
                .long("skip")
                .value_name("NAME")
                .help("Do not descend into directories named NAME.")
                .value_parser(OsStringValueParser::new())
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("follow-symlinks")
                .long("follow-symlinks")
                .short('L')
                .help("Descend into symlinked directories.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("sort")
                .long("sort")
                .help("List siblings in lexicographic order.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("include-root")
                .long("include-root")
                .help("List ROOT itself before its contents.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("max-depth")
                .long("max-depth")
                .value_name("N")
                .help("Do not descend below depth N.")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("type")
                .long("type")
                .value_name("KIND")
                .help("Only print entries of KIND: f, d or l.")
                .value_parser(["f", "d", "l"]),
        )
        .arg(
            Arg::new("null")
                .long("null")
                .short('0')
                .help("Terminate printed paths with NUL instead of newline.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("summary")
                .long("summary")
                .help("Print traversal counts to stderr when done.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("root")
                .value_name("ROOT")
                .value_parser(OsStringValueParser::new()),
        )
}

/// Parses command-line arguments into a [`ParsedArgs`] structure.
pub(crate) fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();

    if args.is_empty() {
        args.push(OsString::from("dirwalk"));
    }

    let mut matches = clap_command().try_get_matches_from(args)?;

    let debug = matches
        .remove_many::<String>("debug")
        .map(|values| values.collect())
        .unwrap_or_default();
    let skip = matches
        .remove_many::<OsString>("skip")
        .map(|values| values.collect())
        .unwrap_or_default();
    let type_filter = matches
        .remove_one::<String>("type")
        .and_then(|value| TypeFilter::from_flag(&value));
    let root = matches.remove_one::<OsString>("root").map(PathBuf::from);

    Ok(ParsedArgs {
        show_help: matches.get_flag("help"),
        show_version: matches.get_flag("version"),
        verbose: matches.get_count("verbose"),
        debug,
        skip,
        follow_symlinks: matches.get_flag("follow-symlinks"),
        sort: matches.get_flag("sort"),
        include_root: matches.get_flag("include-root"),
        max_depth: matches.get_one::<usize>("max-depth").copied(),
        type_filter,
        null: matches.get_flag("null"),
        summary: matches.get_flag("summary"),
        root,
    })
}
