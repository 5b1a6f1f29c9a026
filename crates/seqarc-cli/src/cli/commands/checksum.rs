//! Checksum command: compute MD5 of a file.

use anyhow::Result;
use seqarc_core::checksum;
use std::path::Path;

/// Print MD5 of the given file and the name the archiver would store it under.
pub async fn run_checksum(path: &Path, extension: &str) -> Result<()> {
    let digest = checksum::md5_path(path)?;
    println!(
        "{}  {}  -> {}",
        digest,
        path.display(),
        checksum::archive_file_name(&digest, extension)
    );
    Ok(())
}
