use crate::entry::Entry;
use std::fmt;
use std::sync::Arc;

/// Acceptance predicate applied to search candidates
#[derive(Clone)]
pub struct EntryFilter(Arc<dyn Fn(&Entry) -> bool + Send + Sync>);

impl EntryFilter {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Entry) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(predicate))
    }

    /// Filter that accepts every entry
    pub fn accept_all() -> Self {
        Self::new(|_| true)
    }

    pub fn matches(&self, entry: &Entry) -> bool {
        (self.0)(entry)
    }
}

impl fmt::Debug for EntryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EntryFilter(..)")
    }
}
