//! Output formatting for search results
//!
//! Human output prints one `[Kind] path` line per entry, or `Nothing found` for an
//! empty result. JSON output is a pretty-printed array of `{kind, path}` objects.
//!
//! [`OutputFormatter::write_entries`] streams human lines as the search yields them,
//! so they interleave with `[EVENT]` diagnostics written to the same stream.

use anyhow::{Context, Result};
use fsvisit_core::{Entry, VisitError};
use std::io::Write;

pub const NOTHING_FOUND: &str = "Nothing found";

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// Human-readable formatted text
    Human,
}

/// Output formatter for visited entries
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Writes entries as they arrive and returns how many were written.
    ///
    /// Stops at the first `Err` item. Human lines already written stay written; JSON
    /// output is only produced once the whole sequence succeeded.
    pub fn write_entries<W, I>(&self, out: &mut W, entries: I) -> Result<usize>
    where
        W: Write,
        I: IntoIterator<Item = Result<Entry, VisitError>>,
    {
        match self.format {
            OutputFormat::Json => {
                let entries = entries.into_iter().collect::<Result<Vec<_>, _>>()?;
                writeln!(out, "{}", self.format_json(&entries)?)?;
                Ok(entries.len())
            }
            OutputFormat::Human => {
                let mut written = 0;
                for entry in entries {
                    writeln!(out, "{}", self.format_entry(&entry?))?;
                    written += 1;
                }
                if written == 0 {
                    writeln!(out, "{}", NOTHING_FOUND)?;
                }
                Ok(written)
            }
        }
    }

    fn format_entry(&self, entry: &Entry) -> String {
        format!("[{}] {}", entry.kind, entry.path)
    }

    fn format_json(&self, entries: &[Entry]) -> Result<String> {
        serde_json::to_string_pretty(entries).context("Failed to serialize entries to JSON")
    }
}
