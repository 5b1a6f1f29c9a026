//! Per-id outcomes and the run summary.

use super::ArchiveError;
use std::path::PathBuf;

/// Media written for one id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivedMedia {
    pub id: u64,
    /// URL extracted from the metadata payload.
    pub media_url: String,
    /// Lowercase hex MD5 of the media bytes.
    pub digest: String,
    pub path: PathBuf,
    pub bytes: usize,
}

/// Terminal state of one id.
#[derive(Debug)]
pub enum IdOutcome {
    /// Already in the history; nothing was fetched.
    Skipped,
    Archived(ArchivedMedia),
    Failed(ArchiveError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedId {
    pub id: u64,
    pub stage: &'static str,
    pub error: String,
}

/// Counts for a whole run. Failures are kept individually so callers can report them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub skipped: u64,
    pub archived: u64,
    pub failed: Vec<FailedId>,
}

impl RunSummary {
    pub(crate) fn note(&mut self, id: u64, outcome: &IdOutcome) {
        match outcome {
            IdOutcome::Skipped => self.skipped += 1,
            IdOutcome::Archived(_) => self.archived += 1,
            IdOutcome::Failed(e) => self.failed.push(FailedId {
                id,
                stage: e.stage(),
                error: e.to_string(),
            }),
        }
    }

    /// Ids visited, whatever their outcome.
    pub fn total(&self) -> u64 {
        self.skipped + self.archived + self.failed.len() as u64
    }

    pub fn failed_ids(&self) -> Vec<u64> {
        self.failed.iter().map(|f| f.id).collect()
    }
}
