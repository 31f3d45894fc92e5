use thiserror::Error;

/// Terminal failures of a visitor operation. None of them is retried.
#[derive(Debug, Error)]
pub enum VisitError {
    #[error("Target folder does not exist: {0}")]
    TargetNotFound(String),

    #[error("Filter must be configured for search operation")]
    MissingFilter,

    #[error("Search operation has been canceled")]
    SearchCancelled,

    /// The directory reader failed; carries its error untranslated
    #[error(transparent)]
    Scan(anyhow::Error),
}

impl VisitError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, VisitError::SearchCancelled)
    }
}
