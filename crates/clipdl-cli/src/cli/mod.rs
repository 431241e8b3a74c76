//! CLI for clipdl: `clipdl <URL>`.

use anyhow::Result;
use clap::Parser;
use clipdl_core::config::{self, ClipConfig};
use clipdl_core::downloader::YtDlp;
use clipdl_core::run::{run, RunOutcome};
use clipdl_core::status_log::StatusLogger;

/// Fetch one clip to a temporary path, refusing livestreams and long videos.
#[derive(Debug, Parser)]
#[command(name = "clipdl", version)]
#[command(about = "clipdl: fetch a single short clip via yt-dlp", long_about = None)]
pub struct Cli {
    /// URL of the media to fetch. Passed to yt-dlp unchanged.
    #[arg(allow_hyphen_values = true)]
    pub url: String,
}

/// Exit code for a clap outcome: `--help`/`--version` succeed, anything
/// else (missing or extra arguments) is a plain failure.
pub(crate) fn parse_exit_code(err: &clap::Error) -> i32 {
    if err.exit_code() == 0 {
        0
    } else {
        1
    }
}

impl Cli {
    /// Returns the process exit code: 0 on success, 1 on a download fault,
    /// otherwise yt-dlp's own code.
    pub fn run_from_args() -> Result<i32> {
        let cli = match Cli::try_parse() {
            Ok(cli) => cli,
            Err(err) => {
                let code = parse_exit_code(&err);
                // Help and version go to stdout, usage errors to stderr.
                let _ = err.print();
                return Ok(code);
            }
        };
        let cfg = config::load()?;
        tracing::debug!("loaded config: {:?}", cfg);
        cli.execute(&cfg)
    }

    fn execute(&self, cfg: &ClipConfig) -> Result<i32> {
        let ytdlp = match &cfg.ytdlp_command {
            Some(argv) => YtDlp::from_argv(argv)?,
            None => YtDlp::locate()?,
        };
        let logger = StatusLogger::stderr();

        let outcome = run(&self.url, cfg, &ytdlp, &logger)?;
        match &outcome {
            RunOutcome::Completed { artifact: Some(path) } => println!("{}", path.display()),
            RunOutcome::Completed { artifact: None } => {
                tracing::warn!("download reported success but no artifact was found")
            }
            RunOutcome::Filtered { reason, code } => {
                tracing::info!(code, "filtered: {}", reason)
            }
            RunOutcome::Failed { code } => tracing::info!(code, "download failed"),
            RunOutcome::Faulted(e) => tracing::info!("download fault: {}", e),
        }
        Ok(outcome.exit_code())
    }
}

#[cfg(test)]
mod tests;
