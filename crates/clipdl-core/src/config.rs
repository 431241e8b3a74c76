use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::filter::{MediaFilter, DEFAULT_MAX_DURATION_SECS};
use crate::placeholder::DEFAULT_OUTPUT_SUFFIX;

/// Global configuration loaded from `~/.config/clipdl/config.toml`.
///
/// Every field has a default, so a missing file or a partial file is fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipConfig {
    /// Reject media whose duration exceeds this many seconds. `0` disables the check.
    pub max_duration_secs: u64,
    /// Reject media that is or was a livestream.
    pub reject_live: bool,
    /// Appended to the placeholder path to form the downloader's output template.
    pub output_suffix: String,
    /// Command used to run yt-dlp, e.g. `["python3", "-m", "yt_dlp"]`.
    /// When unset, `yt-dlp` is looked up on `PATH`.
    pub ytdlp_command: Option<Vec<String>>,
    /// Directory for the placeholder (None = system temp dir).
    pub temp_dir: Option<PathBuf>,
}

impl Default for ClipConfig {
    fn default() -> Self {
        Self {
            max_duration_secs: DEFAULT_MAX_DURATION_SECS as u64,
            reject_live: true,
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
            ytdlp_command: None,
            temp_dir: None,
        }
    }
}

impl ClipConfig {
    pub fn media_filter(&self) -> MediaFilter {
        MediaFilter {
            reject_live: self.reject_live,
            max_duration_secs: (self.max_duration_secs > 0).then_some(self.max_duration_secs as f64),
        }
    }
}

pub fn config_path() -> Result<Option<PathBuf>> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("clipdl")?;
    Ok(xdg_dirs.find_config_file("config.toml"))
}

/// Load configuration from disk if present; defaults otherwise.
///
/// Unlike a long-running tool, a fetch must not leave files behind, so no
/// default file is written.
pub fn load() -> Result<ClipConfig> {
    match config_path()? {
        Some(path) => load_from(&path),
        None => Ok(ClipConfig::default()),
    }
}

pub fn load_from(path: &Path) -> Result<ClipConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: ClipConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    tracing::debug!("loaded config from {}", path.display());
    Ok(cfg)
}
