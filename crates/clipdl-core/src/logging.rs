//! Logging init: file under the XDG state dir, or nothing at all.
//!
//! stderr belongs to the downloader's forwarded error lines, so diagnostic
//! tracing never falls back to it.

use anyhow::Result;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,clipdl_core=debug,clipdl=debug";

/// Writer that is either a file or a sink (used when the handle clone fails).
enum FileOrSink {
    File(fs::File),
    Sink,
}

impl io::Write for FileOrSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            FileOrSink::File(f) => f.write(buf),
            FileOrSink::Sink => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            FileOrSink::File(f) => f.flush(),
            FileOrSink::Sink => Ok(()),
        }
    }
}

struct FileMakeWriter(fs::File);

impl<'a> MakeWriter<'a> for FileMakeWriter {
    type Writer = FileOrSink;

    fn make_writer(&'a self) -> Self::Writer {
        self.0
            .try_clone()
            .map(FileOrSink::File)
            .unwrap_or(FileOrSink::Sink)
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

pub fn log_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("clipdl")?;
    Ok(xdg_dirs.place_state_file("clipdl.log")?)
}

/// Initialize structured logging to `~/.local/state/clipdl/clipdl.log`.
/// On failure (e.g. state dir unwritable), returns Err so the caller can
/// run without logging.
pub fn init_logging() -> Result<()> {
    let log_file_path = log_path()?;

    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)?;

    let writer: BoxMakeWriter = BoxMakeWriter::new(FileMakeWriter(file));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    tracing::info!("clipdl logging initialized at {}", log_file_path.display());

    Ok(())
}
