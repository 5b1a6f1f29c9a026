//! `seqarc verify` – re-hash archived media.

use anyhow::{Context, Result};
use seqarc_core::verify::{self, VerifyIssue};
use std::path::Path;

pub async fn run_verify(dir: &Path, extension: &str) -> Result<()> {
    let report = tokio::task::spawn_blocking({
        let dir = dir.to_path_buf();
        let extension = extension.to_string();
        move || verify::verify_dir(&dir, &extension)
    })
    .await
    .context("verify task join")??;

    for issue in &report.issues {
        match issue {
            VerifyIssue::Mismatch { path, actual } => {
                println!("MISMATCH  {}  (content md5 {})", path.display(), actual)
            }
            VerifyIssue::Partial { path } => println!("PARTIAL   {}", path.display()),
        }
    }
    println!(
        "Checked {} file(s), {} issue(s).",
        report.checked,
        report.issues.len()
    );
    if !report.is_clean() {
        anyhow::bail!("{} archived file(s) failed verification", report.issues.len());
    }
    Ok(())
}
