//! Per-id failure type. Never fatal to a run.

use crate::extract::ExtractError;
use crate::fetch::FetchError;
use thiserror::Error;

/// Why one id could not be archived, tagged with the pipeline stage.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("metadata fetch: {0}")]
    Metadata(#[source] FetchError),
    #[error("media url: {0}")]
    Extract(#[from] ExtractError),
    #[error("media fetch: {0}")]
    Media(#[source] FetchError),
    /// Media file could not be written.
    #[error("write media: {0:#}")]
    Write(#[source] anyhow::Error),
    /// Media was written but the id could not be appended to the history log.
    #[error("record history: {0:#}")]
    History(#[source] anyhow::Error),
}

impl ArchiveError {
    /// Short stage name for logs and summaries.
    pub fn stage(&self) -> &'static str {
        match self {
            ArchiveError::Metadata(_) => "metadata",
            ArchiveError::Extract(_) => "extract",
            ArchiveError::Media(_) => "media",
            ArchiveError::Write(_) => "write",
            ArchiveError::History(_) => "history",
        }
    }
}
