//! Sequential archive loop.
//!
//! For each id in the range: skip if already recorded, otherwise fetch the
//! metadata, pull the media URL out of it, fetch the media, name it by its
//! MD5 and write it, and only then append the id to the history log. A failure
//! at any step abandons that id (it stays unrecorded) and the loop moves on.

mod error;
mod outcome;

pub use error::ArchiveError;
pub use outcome::{ArchivedMedia, FailedId, IdOutcome, RunSummary};

use std::path::PathBuf;

use crate::checksum;
use crate::config::{ArchiveConfig, IdRange};
use crate::extract;
use crate::fetch::Fetch;
use crate::history::HistoryStore;
use crate::storage;

/// Drives the fetch → extract → fetch → hash → write → record pipeline.
pub struct Archiver<F> {
    fetcher: F,
    cfg: ArchiveConfig,
    output_dir: PathBuf,
}

impl<F: Fetch> Archiver<F> {
    /// Media goes to `cfg.output_dir`, or the working directory when unset.
    pub fn new(cfg: ArchiveConfig, fetcher: F) -> Self {
        let output_dir = cfg
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            fetcher,
            cfg,
            output_dir,
        }
    }

    /// Walk the whole range. Per-id failures are logged and counted, never returned.
    pub fn run(&mut self, range: IdRange, history: &mut HistoryStore) -> RunSummary {
        self.run_with_observer(range, history, |_, _| {})
    }

    /// Like [`run`](Self::run), calling `observe` with every id's outcome as it happens.
    pub fn run_with_observer<O>(
        &mut self,
        range: IdRange,
        history: &mut HistoryStore,
        mut observe: O,
    ) -> RunSummary
    where
        O: FnMut(u64, &IdOutcome),
    {
        tracing::info!(
            start = range.start,
            end = range.end,
            known = history.len(),
            output_dir = %self.output_dir.display(),
            "archive run starting"
        );
        let mut summary = RunSummary::default();
        for id in range.iter() {
            let outcome = self.process(id, history);
            summary.note(id, &outcome);
            observe(id, &outcome);
        }
        tracing::info!(
            archived = summary.archived,
            skipped = summary.skipped,
            failed = summary.failed.len(),
            "archive run finished"
        );
        summary
    }

    /// Run the pipeline for one id and record it on success.
    pub fn process(&mut self, id: u64, history: &mut HistoryStore) -> IdOutcome {
        if history.contains(id) {
            tracing::debug!(id, "already archived");
            return IdOutcome::Skipped;
        }

        let media = match self.archive_one(id) {
            Ok(media) => media,
            Err(e) => {
                tracing::warn!(id, stage = e.stage(), "archive failed: {}", e);
                return IdOutcome::Failed(e);
            }
        };

        if let Err(e) = history.record(id) {
            let e = ArchiveError::History(e);
            tracing::warn!(id, path = %media.path.display(), "archive failed: {}", e);
            return IdOutcome::Failed(e);
        }

        tracing::info!(
            id,
            bytes = media.bytes,
            file = %media.path.display(),
            "archived"
        );
        IdOutcome::Archived(media)
    }

    /// Fetch, hash and write the media for `id` without touching the history.
    pub fn archive_one(&mut self, id: u64) -> Result<ArchivedMedia, ArchiveError> {
        let metadata_url = self.cfg.metadata_url(id);
        let payload = self
            .fetcher
            .fetch(&metadata_url)
            .map_err(ArchiveError::Metadata)?;
        let raw_url = extract::extract_url(&payload, self.cfg.marker.as_bytes())?;
        let media_url = extract::url_text(raw_url).into_owned();
        tracing::debug!(id, %media_url, "media url");

        let data = self.fetcher.fetch(&media_url).map_err(ArchiveError::Media)?;

        let digest = checksum::md5_hex(&data);
        let file_name = checksum::archive_file_name(&digest, &self.cfg.extension);
        let path = storage::write_media(&self.output_dir, &file_name, &data)
            .map_err(ArchiveError::Write)?;

        Ok(ArchivedMedia {
            id,
            media_url,
            digest,
            path,
            bytes: data.len(),
        })
    }
}
