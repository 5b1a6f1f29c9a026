//! Media file persistence.
//!
//! Bytes go to `<name>.part` first and are renamed onto `<name>`, replacing
//! any existing file. The rename keeps a crash from leaving truncated content
//! under a content-hash name.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `a.png` → `a.png.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Write `data` to `dir/file_name`, creating or replacing it. Returns the final path.
pub fn write_media(dir: &Path, file_name: &str, data: &[u8]) -> Result<PathBuf> {
    let final_path = dir.join(file_name);
    let tmp = temp_path(&final_path);

    let result = write_and_rename(&tmp, &final_path, data);
    if result.is_err() {
        let _ = std::fs::remove_file(&tmp);
    }
    result.map(|()| final_path)
}

fn write_and_rename(tmp: &Path, final_path: &Path, data: &[u8]) -> Result<()> {
    {
        let mut f = File::create(tmp)
            .with_context(|| format!("failed to create temp file: {}", tmp.display()))?;
        f.write_all(data)
            .with_context(|| format!("write {}", tmp.display()))?;
    }
    std::fs::rename(tmp, final_path).with_context(|| {
        format!(
            "failed to rename {} to {}",
            tmp.display(),
            final_path.display()
        )
    })?;
    Ok(())
}
