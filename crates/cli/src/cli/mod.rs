pub mod commands;
pub mod filters;
pub mod output;

pub use commands::{CliArgs, FilterMode, OutputFormatArg};
pub use filters::{glob_to_regex, resolve_filter};
pub use output::{OutputFormat, OutputFormatter};
