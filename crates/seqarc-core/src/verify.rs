//! Re-hash archived files and report any whose content no longer matches its name.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::checksum;
use crate::storage::TEMP_SUFFIX;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyIssue {
    /// File content hashes to something other than its name.
    Mismatch { path: PathBuf, actual: String },
    /// Leftover temp file from an interrupted write.
    Partial { path: PathBuf },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyReport {
    /// Archive files checked (names of the form `<32 hex>.<extension>`).
    pub checked: usize,
    pub issues: Vec<VerifyIssue>,
}

impl VerifyReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Check every `<md5>.<extension>` file directly inside `dir`. Other files are ignored.
pub fn verify_dir(dir: &Path, extension: &str) -> Result<VerifyReport> {
    let suffix = format!(".{}", extension);
    let partial_suffix = format!("{}{}", suffix, TEMP_SUFFIX);

    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("read dir: {}", dir.display()))?
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|e| e.path())
        .collect();
    entries.sort();

    let mut report = VerifyReport::default();
    for path in entries {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(stem) = name.strip_suffix(&partial_suffix) {
            if checksum::is_hex_digest(stem) {
                report.issues.push(VerifyIssue::Partial { path: path.clone() });
            }
            continue;
        }
        let Some(stem) = name.strip_suffix(&suffix) else {
            continue;
        };
        if !checksum::is_hex_digest(stem) {
            continue;
        }
        report.checked += 1;
        let actual = checksum::md5_path(&path)?;
        if actual != stem {
            tracing::warn!(path = %path.display(), %actual, "content does not match name");
            report.issues.push(VerifyIssue::Mismatch { path, actual });
        }
    }
    Ok(report)
}
