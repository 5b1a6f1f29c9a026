//! `seqarc status` – summarize the history log against the configured range.

use anyhow::Result;
use seqarc_core::config::{ArchiveConfig, IdRange};
use seqarc_core::history::{self, ProcessedIds};
use std::path::Path;

/// How many missing ids to list before eliding the rest.
const MISSING_PREVIEW: usize = 10;

/// Count of range ids absent from the log, plus the first few of them.
///
/// Never walks the whole range, so a huge `end` stays cheap.
fn missing_ids(ids: &ProcessedIds, range: IdRange) -> (u64, Vec<u64>) {
    let in_range = ids.range(range.start..=range.end).count() as u64;
    let preview = range
        .iter()
        .filter(|id| !ids.contains(id))
        .take(MISSING_PREVIEW)
        .collect();
    (range.len() - in_range, preview)
}

pub async fn run_status(cfg: &ArchiveConfig, history_path: &Path) -> Result<()> {
    let ids = history::load(history_path)?;
    let range = cfg.id_range()?;
    let (missing, preview) = missing_ids(&ids, range);
    let in_range = range.len() - missing;

    println!("History: {}", history_path.display());
    println!(
        "Archived ids: {} ({} in range {}-{})",
        ids.len(),
        in_range,
        range.start,
        range.end
    );
    if missing == 0 {
        println!("Nothing left to archive in range.");
    } else {
        let shown: Vec<String> = preview.iter().map(|id| id.to_string()).collect();
        let more = if missing > preview.len() as u64 { " ..." } else { "" };
        println!("Missing: {} ({}{})", missing, shown.join(" "), more);
    }
    Ok(())
}
