//! yt-dlp driven as a child process.
//!
//! Each URL is probed first (`--dump-single-json`) so the match filter can run
//! in-process, then fetched in a second invocation whose output lines are
//! routed to the [`Logger`] by severity.

use std::ffi::{OsStr, OsString};
use std::io::{self, BufRead, BufReader, Read};
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use std::thread;

use super::{DownloadError, DownloadOptions, Downloader, Logger};
use crate::info::InfoDict;

/// Result code when the match filter rejects a URL (yt-dlp's code for a
/// download cancelled by a rejected filter).
pub const FILTERED_RETCODE: i32 = 101;

const BINARY: &str = "yt-dlp";

/// Handle to a yt-dlp installation: a program plus leading arguments
/// (e.g. `python3 -m yt_dlp`).
#[derive(Debug, Clone)]
pub struct YtDlp {
    program: OsString,
    base_args: Vec<OsString>,
}

enum Probe {
    Info(InfoDict),
    Failed(i32),
}

impl YtDlp {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            base_args: Vec::new(),
        }
    }

    /// Arguments inserted before every invocation's own flags.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.base_args
            .extend(args.into_iter().map(|a| a.as_ref().to_owned()));
        self
    }

    /// Build from a configured argv (`["yt-dlp"]`, `["python3", "-m", "yt_dlp"]`).
    pub fn from_argv(argv: &[String]) -> Result<Self, DownloadError> {
        let (program, rest) = argv
            .split_first()
            .ok_or_else(|| DownloadError::NotFound("empty yt-dlp command".to_string()))?;
        Ok(Self::new(program).with_args(rest))
    }

    /// Find `yt-dlp` on `PATH`.
    pub fn locate() -> Result<Self, DownloadError> {
        let path: PathBuf =
            which::which(BINARY).map_err(|e| DownloadError::NotFound(format!("{BINARY}: {e}")))?;
        tracing::debug!("using {}", path.display());
        Ok(Self::new(path))
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.base_args)
            // Match the library defaults: user config files must not alter
            // output paths or printing.
            .arg("--ignore-config")
            .arg("--no-playlist")
            .stdin(Stdio::null());
        cmd
    }

    fn spawn_error(&self, source: io::Error) -> DownloadError {
        DownloadError::Spawn {
            program: self.program.to_string_lossy().into_owned(),
            source,
        }
    }

    fn probe(&self, url: &str, logger: &dyn Logger) -> Result<Probe, DownloadError> {
        let output = self
            .command()
            .args(["--dump-single-json", "--", url])
            .output()
            .map_err(|e| self.spawn_error(e))?;
        drain(output.stderr.as_slice(), |line| route_stderr(logger, line))?;

        let code = exit_code(output.status)?;
        if code != 0 {
            tracing::debug!(url, code, "probe failed");
            return Ok(Probe::Failed(code));
        }
        let info = InfoDict::from_json(&String::from_utf8_lossy(&output.stdout))?;
        tracing::debug!(url, ?info, "probed");
        Ok(Probe::Info(info))
    }

    fn fetch(&self, url: &str, opts: &DownloadOptions<'_>) -> Result<i32, DownloadError> {
        let mut cmd = self.command();
        cmd.arg("--newline");
        if opts.no_progress {
            cmd.arg("--no-progress");
        }
        if opts.force_filename {
            cmd.arg("--force-overwrites");
        }
        cmd.arg("-o")
            .arg(&opts.output_template)
            .args(["--", url])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|e| self.spawn_error(e))?;
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let logger = opts.logger;

        let drained = thread::scope(|s| -> io::Result<()> {
            let errs = stderr.map(|pipe| s.spawn(move || drain(pipe, |l| route_stderr(logger, l))));
            if let Some(pipe) = stdout {
                drain(pipe, |l| logger.debug(l))?;
            }
            if let Some(handle) = errs {
                handle
                    .join()
                    .unwrap_or_else(|_| Err(io::Error::other("stderr reader panicked")))?;
            }
            Ok(())
        });

        let status = child.wait()?;
        drained?;
        exit_code(status)
    }
}

impl Downloader for YtDlp {
    fn download(&self, urls: &[&str], opts: &DownloadOptions<'_>) -> Result<i32, DownloadError> {
        let mut retcode = 0;
        for url in urls {
            let info = match self.probe(url, opts.logger)? {
                Probe::Info(info) => info,
                Probe::Failed(code) => {
                    retcode = code;
                    continue;
                }
            };
            if let Some(reason) = (opts.match_filter)(&info, false) {
                opts.logger.debug(&format!("[download] {reason}"));
                return Ok(FILTERED_RETCODE);
            }
            let code = self.fetch(url, opts)?;
            if code != 0 {
                retcode = code;
            }
        }
        Ok(retcode)
    }
}

fn exit_code(status: ExitStatus) -> Result<i32, DownloadError> {
    status.code().ok_or(DownloadError::Terminated)
}

/// Severity is carried in yt-dlp's stderr prefixes.
fn route_stderr(logger: &dyn Logger, line: &str) {
    if line.starts_with("ERROR:") {
        logger.error(line);
    } else if line.starts_with("WARNING:") {
        logger.warning(line);
    } else {
        logger.debug(line);
    }
}

/// Feed each line of `pipe` to `f`, tolerating non-UTF-8 output.
fn drain<R: Read>(pipe: R, mut f: impl FnMut(&str)) -> io::Result<()> {
    let mut reader = BufReader::new(pipe);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(());
        }
        let line = String::from_utf8_lossy(&buf);
        f(line.trim_end_matches(&['\r', '\n'][..]));
    }
}
