//! One fetch, start to finish: reserve a placeholder, hand the URL to the
//! downloader with the match filter and logger, then release the placeholder
//! and report an outcome.

use std::cell::Cell;
use std::io;
use std::path::PathBuf;

use crate::config::ClipConfig;
use crate::downloader::{DownloadError, DownloadOptions, Downloader, Logger};
use crate::info::InfoDict;
use crate::placeholder::Placeholder;

/// How a run ended once the placeholder was in place.
#[derive(Debug)]
pub enum RunOutcome {
    /// Downloader returned 0. `artifact` is the first `<placeholder>.<ext>` found.
    Completed { artifact: Option<PathBuf> },
    /// Match filter refused the media; `code` is what the downloader returned.
    Filtered { reason: String, code: i32 },
    /// Downloader returned a non-zero code for some other reason.
    Failed { code: i32 },
    /// Downloader could not run to completion. Detail is logged, not surfaced.
    Faulted(DownloadError),
}

impl RunOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            RunOutcome::Completed { .. } => 0,
            RunOutcome::Filtered { code, .. } | RunOutcome::Failed { code } => *code,
            RunOutcome::Faulted(_) => 1,
        }
    }
}

/// Faults around the placeholder itself; these end the process.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("create placeholder: {0}")]
    Setup(#[source] io::Error),
    #[error("remove placeholder {}: {source}", .path.display())]
    Cleanup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Fetch `url` through `downloader`. The placeholder is removed before this
/// returns, whatever the outcome.
pub fn run(
    url: &str,
    cfg: &ClipConfig,
    downloader: &dyn Downloader,
    logger: &dyn Logger,
) -> Result<RunOutcome, RunError> {
    let placeholder = match &cfg.temp_dir {
        Some(dir) => Placeholder::create_in(dir),
        None => Placeholder::create(),
    }
    .map_err(RunError::Setup)?;

    let outcome = fetch(url, cfg, &placeholder, downloader, logger);
    tracing::info!(url, exit_code = outcome.exit_code(), "fetch finished");

    let path = placeholder.path().to_path_buf();
    placeholder
        .release()
        .map_err(|source| RunError::Cleanup { path, source })?;
    Ok(outcome)
}

fn fetch(
    url: &str,
    cfg: &ClipConfig,
    placeholder: &Placeholder,
    downloader: &dyn Downloader,
    logger: &dyn Logger,
) -> RunOutcome {
    let media_filter = cfg.media_filter();
    let rejected: Cell<Option<String>> = Cell::new(None);
    let filter = |info: &InfoDict, incomplete: bool| {
        let reason = media_filter.check(info, incomplete).map(|r| r.to_string());
        if let Some(r) = &reason {
            tracing::info!(url, reason = %r, "rejected by match filter");
            rejected.set(Some(r.clone()));
        }
        reason
    };

    let opts = DownloadOptions {
        match_filter: &filter,
        output_template: placeholder.output_template(&cfg.output_suffix),
        logger,
        no_progress: true,
        force_filename: true,
    };
    tracing::debug!(url, template = %opts.output_template, "starting download");

    match (downloader.download(&[url], &opts), rejected.take()) {
        (Err(e), _) => {
            tracing::warn!(url, error = %e, "download fault");
            RunOutcome::Faulted(e)
        }
        (Ok(code), Some(reason)) => RunOutcome::Filtered { reason, code },
        (Ok(0), None) => {
            let artifact = match placeholder.artifacts() {
                Ok(found) => found.into_iter().next(),
                Err(e) => {
                    tracing::warn!("listing artifacts for {}: {}", placeholder.path().display(), e);
                    None
                }
            };
            RunOutcome::Completed { artifact }
        }
        (Ok(code), None) => RunOutcome::Failed { code },
    }
}
