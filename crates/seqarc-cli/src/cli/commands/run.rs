//! `seqarc run` – archive the configured id range.

use anyhow::{Context, Result};
use seqarc_core::archiver::{Archiver, IdOutcome, RunSummary};
use seqarc_core::config::ArchiveConfig;
use seqarc_core::fetch::{CurlFetcher, FetchOptions};
use seqarc_core::history::HistoryStore;
use std::path::PathBuf;
use std::time::Duration;

/// Command-line values that take precedence over config.toml.
#[derive(Debug, Clone, Default)]
pub struct RunOverrides {
    pub start: Option<u64>,
    pub end: Option<u64>,
    pub output_dir: Option<PathBuf>,
    pub history: Option<PathBuf>,
}

impl RunOverrides {
    pub fn apply(self, mut cfg: ArchiveConfig) -> ArchiveConfig {
        if let Some(start) = self.start {
            cfg.start = start;
        }
        if let Some(end) = self.end {
            cfg.end = end;
        }
        if let Some(dir) = self.output_dir {
            cfg.output_dir = Some(dir);
        }
        if let Some(history) = self.history {
            cfg.history_file = history;
        }
        cfg
    }
}

fn print_outcome(id: u64, outcome: &IdOutcome) {
    match outcome {
        IdOutcome::Skipped => {}
        IdOutcome::Archived(media) => {
            println!("{:>6}  {}  ({} bytes)", id, media.path.display(), media.bytes)
        }
        IdOutcome::Failed(e) => eprintln!("{:>6}  error: {}", id, e),
    }
}

fn print_summary(summary: &RunSummary) {
    println!(
        "Archived {}, skipped {}, failed {}.",
        summary.archived,
        summary.skipped,
        summary.failed.len()
    );
}

/// Run the archive loop. Per-id failures are printed, not returned; only
/// setup failures (bad config, unopenable history log) are errors.
pub async fn run_archive(cfg: ArchiveConfig) -> Result<()> {
    cfg.validate()?;
    let range = cfg.id_range()?;
    if let Some(dir) = &cfg.output_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create output dir: {}", dir.display()))?;
    }

    let summary = tokio::task::spawn_blocking(move || -> Result<RunSummary> {
        let mut history = HistoryStore::open(&cfg.history_file)?;
        let opts = FetchOptions {
            user_agent: cfg.user_agent.clone(),
            connect_timeout: cfg.connect_timeout_secs.map(Duration::from_secs),
        };
        let fetcher = CurlFetcher::new(&opts).context("init HTTP client")?;
        let mut archiver = Archiver::new(cfg, fetcher);
        Ok(archiver.run_with_observer(range, &mut history, print_outcome))
    })
    .await
    .context("archive task join")??;

    print_summary(&summary);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_only_given_fields() {
        let cfg = RunOverrides {
            start: Some(100),
            history: Some(PathBuf::from("/tmp/h.txt")),
            ..RunOverrides::default()
        }
        .apply(ArchiveConfig::default());
        assert_eq!(cfg.start, 100);
        assert_eq!(cfg.end, 2826);
        assert_eq!(cfg.history_file, PathBuf::from("/tmp/h.txt"));
        assert!(cfg.output_dir.is_none());
    }

    #[test]
    fn empty_overrides_keep_config() {
        let cfg = RunOverrides::default().apply(ArchiveConfig::default());
        assert_eq!(cfg.start, 1);
        assert_eq!(cfg.history_file, PathBuf::from("Image_History.txt"));
    }

    #[tokio::test]
    async fn unopenable_history_fails_before_any_fetch() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let state = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();

        let cfg = ArchiveConfig {
            metadata_url_template: format!("http://127.0.0.1:{}/{{id}}/info.json", port),
            history_file: state.path().to_path_buf(),
            output_dir: Some(out.path().to_path_buf()),
            start: 1,
            end: 1,
            ..ArchiveConfig::default()
        };
        let err = run_archive(cfg).await.unwrap_err();
        assert!(format!("{:#}", err).contains("open history log"));

        listener.set_nonblocking(true).unwrap();
        let accepted = listener.accept().map(|_| ());
        assert_eq!(
            accepted.unwrap_err().kind(),
            std::io::ErrorKind::WouldBlock,
            "no request reached the server"
        );
    }
}
