use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Placeholder replaced by the numeric id in `metadata_url_template`.
pub const ID_PLACEHOLDER: &str = "{id}";

/// Closed interval of resource ids to walk, `start..=end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdRange {
    pub start: u64,
    pub end: u64,
}

impl IdRange {
    /// Builds a range, rejecting zero ids and reversed bounds.
    pub fn new(start: u64, end: u64) -> Result<Self> {
        if start == 0 {
            anyhow::bail!("id range must start at 1 or above (got {})", start);
        }
        if start > end {
            anyhow::bail!("id range start {} is after end {}", start, end);
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, id: u64) -> bool {
        (self.start..=self.end).contains(&id)
    }

    /// Number of ids in the range; never zero.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    pub fn iter(&self) -> std::ops::RangeInclusive<u64> {
        self.start..=self.end
    }
}

/// Archive configuration loaded from `~/.config/seqarc/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveConfig {
    /// Metadata endpoint; `{id}` is replaced with the resource id.
    pub metadata_url_template: String,
    /// Substring whose first occurrence precedes the media URL in the metadata payload.
    pub marker: String,
    /// Extension given to every archived file, without the leading dot.
    pub extension: String,
    /// Append-only log of archived ids. Relative paths resolve against the working directory.
    pub history_file: PathBuf,
    /// First id of the range (inclusive).
    pub start: u64,
    /// Last id of the range (inclusive).
    pub end: u64,
    /// Directory receiving media files (None = working directory).
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    /// Optional User-Agent header sent with every request.
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Optional connect timeout in seconds (None = transport default).
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            metadata_url_template: "https://xkcd.com/{id}/info.0.json".to_string(),
            marker: "\"img\": \"".to_string(),
            extension: "png".to_string(),
            history_file: PathBuf::from("Image_History.txt"),
            start: 1,
            end: 2826,
            output_dir: None,
            user_agent: None,
            connect_timeout_secs: None,
        }
    }
}

impl ArchiveConfig {
    /// The configured id range, validated.
    pub fn id_range(&self) -> Result<IdRange> {
        IdRange::new(self.start, self.end)
    }

    /// Metadata URL for one id.
    pub fn metadata_url(&self, id: u64) -> String {
        self.metadata_url_template.replace(ID_PLACEHOLDER, &id.to_string())
    }

    /// Rejects configurations the archive loop cannot run with.
    pub fn validate(&self) -> Result<()> {
        if !self.metadata_url_template.contains(ID_PLACEHOLDER) {
            anyhow::bail!(
                "metadata_url_template must contain {} (got {:?})",
                ID_PLACEHOLDER,
                self.metadata_url_template
            );
        }
        let sample = self.metadata_url(self.start.max(1));
        url::Url::parse(&sample).with_context(|| {
            format!("metadata_url_template does not yield a valid URL: {}", sample)
        })?;
        if self.marker.is_empty() {
            anyhow::bail!("marker must not be empty");
        }
        if self.extension.is_empty()
            || self.extension.starts_with('.')
            || self.extension.contains('/')
        {
            anyhow::bail!(
                "extension must be a bare suffix like \"png\" (got {:?})",
                self.extension
            );
        }
        self.id_range()?;
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("seqarc")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ArchiveConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ArchiveConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: ArchiveConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
