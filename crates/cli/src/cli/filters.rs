//! Translation of command-line filter options into an [`EntryFilter`]
//!
//! Globs are matched against the whole entry path. `*` matches any run of
//! characters (path separators included) and `?` matches exactly one; every
//! other character is literal.

use crate::cli::commands::FilterMode;
use anyhow::{Context, Result};
use fsvisit_core::{Entry, EntryFilter, EntryKind};
use regex::Regex;

/// Converts a glob into an anchored regular expression
pub fn glob_to_regex(glob: &str) -> Result<Regex> {
    let mut pattern = String::with_capacity(glob.len() + 8);
    pattern.push('^');

    let mut literal = String::new();
    for c in glob.chars() {
        match c {
            '*' | '?' => {
                pattern.push_str(&regex::escape(&literal));
                literal.clear();
                pattern.push_str(if c == '*' { ".*" } else { "." });
            }
            _ => literal.push(c),
        }
    }
    pattern.push_str(&regex::escape(&literal));
    pattern.push('$');

    Regex::new(&pattern).with_context(|| format!("Invalid glob pattern: {}", glob))
}

/// Builds the search predicate for a filter mode and glob
pub fn resolve_filter(mode: FilterMode, glob: &str) -> Result<EntryFilter> {
    let regex = glob_to_regex(glob)?;
    let kind = match mode {
        FilterMode::GlobPattern => None,
        FilterMode::FoldersOnly => Some(EntryKind::Folder),
        FilterMode::FilesOnly => Some(EntryKind::File),
    };

    Ok(EntryFilter::new(move |entry: &Entry| {
        kind.map_or(true, |k| entry.kind == k) && regex.is_match(&entry.path)
    }))
}
