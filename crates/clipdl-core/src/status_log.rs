//! Logger handed to the downloader: drops chatter, forwards errors.
//!
//! yt-dlp is verbose at debug/info level; only download-status lines and
//! errors are relevant to whoever invoked `clipdl`.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::downloader::Logger;

/// Debug lines carrying this prefix are download status and get forwarded.
pub const STATUS_PREFIX: &str = "[download] ";

/// Forwards `error` (and `[download] ` debug lines) verbatim to a sink.
pub struct StatusLogger<W: Write + Send> {
    sink: Mutex<W>,
}

impl StatusLogger<io::Stderr> {
    /// Logger writing to the process's standard error stream.
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write + Send> StatusLogger<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink: Mutex::new(sink),
        }
    }

    pub fn into_inner(self) -> W {
        self.sink
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<W: Write + Send> Logger for StatusLogger<W> {
    fn debug(&self, msg: &str) {
        if msg.starts_with(STATUS_PREFIX) {
            self.error(msg);
        }
    }

    fn info(&self, _msg: &str) {}

    fn warning(&self, _msg: &str) {}

    fn error(&self, msg: &str) {
        let mut sink = match self.sink.lock() {
            Ok(s) => s,
            Err(poisoned) => poisoned.into_inner(),
        };
        // Nowhere left to report a failing stderr.
        let _ = writeln!(sink, "{msg}");
        let _ = sink.flush();
    }
}
