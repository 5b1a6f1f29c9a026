//! Durable record of archived ids.
//!
//! The log is plain text: decimal ids separated by whitespace, appended one at
//! a time as `"<id> "`. Tokens that do not parse as ids are skipped on load so a
//! torn write from an interrupted run never blocks the next one.

use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Ids that have been archived. Only ever grows.
pub type ProcessedIds = BTreeSet<u64>;

/// Parse log text into the set of ids it records, skipping non-integer tokens.
pub fn parse_ids(text: &str) -> ProcessedIds {
    text.split_whitespace()
        .filter_map(|token| token.parse::<u64>().ok())
        .collect()
}

/// Read a history log without opening it for writing. A missing file is an error.
pub fn load(path: &Path) -> Result<ProcessedIds> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read history log: {}", path.display()))?;
    Ok(parse_ids(&String::from_utf8_lossy(&bytes)))
}

/// The processed-id set plus the append handle to its log, owned for one run.
#[derive(Debug)]
pub struct HistoryStore {
    ids: ProcessedIds,
    log: File,
    path: PathBuf,
}

impl HistoryStore {
    /// Open (creating if absent) the log in append mode and load its contents.
    ///
    /// Failure here is fatal for a run: without the log there is no way to
    /// tell which ids are already archived.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir: {}", parent.display()))?;
        }
        let mut log = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("open history log: {}", path.display()))?;
        let bytes =
            std::fs::read(&path).with_context(|| format!("read history log: {}", path.display()))?;
        let ids = parse_ids(&String::from_utf8_lossy(&bytes));

        // A torn final token must not swallow the next appended id.
        if bytes.last().is_some_and(|b| !b.is_ascii_whitespace()) {
            log.write_all(b" ")
                .with_context(|| format!("append separator to {}", path.display()))?;
        }

        tracing::debug!(path = %path.display(), count = ids.len(), "loaded history");
        Ok(Self { ids, log, path })
    }

    pub fn contains(&self, id: u64) -> bool {
        self.ids.contains(&id)
    }

    /// Append `id` to the log, then add it to the in-memory set.
    ///
    /// No fsync; a crash right after the media write may lose the entry, in
    /// which case the id is fetched again next run.
    pub fn record(&mut self, id: u64) -> Result<()> {
        write!(self.log, "{} ", id)
            .with_context(|| format!("append id {} to {}", id, self.path.display()))?;
        self.ids.insert(id);
        Ok(())
    }

    pub fn ids(&self) -> &ProcessedIds {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
