//! Contract with the external download engine.
//!
//! clipdl never fetches media itself. It hands a [`Downloader`] a URL list, a
//! match filter, an output template and a [`Logger`], and gets back the
//! engine's result code. [`YtDlp`] is the production engine.

mod ytdlp;

pub use ytdlp::{YtDlp, FILTERED_RETCODE};

use crate::info::InfoDict;

/// Four-severity sink the engine reports through.
///
/// `Sync` because engines may drain several output streams at once.
pub trait Logger: Sync {
    fn debug(&self, msg: &str);
    fn info(&self, msg: &str);
    fn warning(&self, msg: &str);
    fn error(&self, msg: &str);
}

/// Predicate consulted before fetching. `Some(reason)` aborts the download.
/// The `bool` is the engine's "metadata incomplete" flag.
pub type MatchFilter<'a> = &'a dyn Fn(&InfoDict, bool) -> Option<String>;

/// Everything the engine needs for one invocation.
pub struct DownloadOptions<'a> {
    pub match_filter: MatchFilter<'a>,
    /// Output path with a `%(ext)s` placeholder for the extension.
    pub output_template: String,
    pub logger: &'a dyn Logger,
    pub no_progress: bool,
    /// Always write to `output_template`, replacing a stale file already
    /// there (`--force-overwrites` for yt-dlp). The final path is found from
    /// the template by the caller, not printed by the engine.
    pub force_filename: bool,
}

/// Fatal engine faults. A filtered or failed download is *not* one of these;
/// it comes back as a non-zero result code.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("downloader I/O: {0}")]
    Io(#[from] std::io::Error),
    #[error("unreadable metadata: {0}")]
    Metadata(#[from] serde_json::Error),
    #[error("downloader terminated without an exit code")]
    Terminated,
    #[error("downloader not found: {0}")]
    NotFound(String),
}

/// An engine that fetches URLs honoring [`DownloadOptions`].
pub trait Downloader {
    /// Returns the engine's own result code (0 = success) or a fatal fault.
    fn download(&self, urls: &[&str], opts: &DownloadOptions<'_>) -> Result<i32, DownloadError>;
}
