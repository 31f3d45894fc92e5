use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Filesystem visitor with two-phase, cancellable search
#[derive(Parser, Debug)]
#[command(
    name = "fsvisit",
    about = "Search a folder tree with a glob pattern or an entry-kind filter",
    version,
    long_about = "fsvisit scans a target folder recursively, announces every discovered \
                  entry, applies the selected filter and prints the accepted files and \
                  folders.\n\n\
                  Examples:\n  \
                  fsvisit -t ./docs -f glob-pattern -g '*.md'\n  \
                  fsvisit -t ./docs -f folders-only\n  \
                  fsvisit -t ./docs -f files-only -g 'report?.txt' --log-events\n  \
                  fsvisit -t ./docs -f glob-pattern --all --format json"
)]
pub struct CliArgs {
    #[arg(
        short = 't',
        long,
        value_name = "PATH",
        help = "Folder to search"
    )]
    pub target_path: PathBuf,

    #[arg(
        short = 'f',
        long,
        value_enum,
        required_unless_present = "all",
        help = "Filter applied to discovered entries (not needed with --all)"
    )]
    pub filter: Option<FilterMode>,

    #[arg(
        short = 'g',
        long,
        value_name = "GLOB",
        default_value = "*",
        help = "Glob matched against the full entry path ('*' any run, '?' one character)"
    )]
    pub glob_pattern: String,

    #[arg(
        short = 'l',
        long,
        help = "Print an [EVENT] line for every notification (also FSVISIT_LOG_EVENTS=1)"
    )]
    pub log_events: bool,

    #[arg(
        short = 'a',
        long,
        help = "List every entry without filtering or notifications"
    )]
    pub all: bool,

    #[arg(long, value_enum, default_value = "human", help = "Output format")]
    pub format: OutputFormatArg,

    #[arg(long, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(
        short = 'q',
        long,
        help = "Quiet mode - suppress non-error log output"
    )]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FilterMode {
    /// Entries of either kind whose path matches the glob
    GlobPattern,
    /// Folders whose path matches the glob
    FoldersOnly,
    /// Files whose path matches the glob
    FilesOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Human,
    Json,
}

impl From<OutputFormatArg> for crate::cli::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => crate::cli::output::OutputFormat::Human,
            OutputFormatArg::Json => crate::cli::output::OutputFormat::Json,
        }
    }
}
