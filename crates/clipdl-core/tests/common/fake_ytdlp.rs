//! Stand-in for the yt-dlp executable: a POSIX shell script run via `sh`.
//!
//! Probe invocations (`--dump-single-json`) print canned metadata; fetch
//! invocations write `media` to the `-o` template with the extension filled
//! in. Every invocation's argv is appended to `calls.log`.

use clipdl_core::downloader::YtDlp;
use std::fs;
use std::path::{Path, PathBuf};

const SCRIPT: &str = r#"#!/bin/sh
echo "$*" >> "@LOG@"
out=""
probe=0
while [ $# -gt 0 ]; do
  case "$1" in
    --dump-single-json) probe=1 ;;
    -o) shift; out="$1" ;;
    --) shift; break ;;
  esac
  shift
done
if [ "$probe" = 1 ]; then
  echo "[debug] probing $1" >&2
@PROBE_STDERR@
  cat <<'JSON'
@JSON@
JSON
  exit @PROBE_CODE@
fi
echo "[youtube] Extracting URL: $1"
target=$(printf '%s' "$out" | sed 's/%(ext)s/@EXT@/')
if [ "@WRITE@" = 1 ]; then
  printf 'media' > "$target"
  echo "[download] Destination: $target"
fi
@FETCH_STDERR@
exit @FETCH_CODE@
"#;

pub struct FakeYtDlp {
    pub json: String,
    pub probe_code: i32,
    pub probe_stderr: Vec<String>,
    pub ext: String,
    pub write: bool,
    pub fetch_stderr: Vec<String>,
    pub fetch_code: i32,
}

impl Default for FakeYtDlp {
    fn default() -> Self {
        Self {
            json: r#"{"id": "abc", "title": "clip", "duration": 59, "is_live": false}"#.to_string(),
            probe_code: 0,
            probe_stderr: Vec::new(),
            ext: "mp4".to_string(),
            write: true,
            fetch_stderr: Vec::new(),
            fetch_code: 0,
        }
    }
}

fn stderr_lines(lines: &[String]) -> String {
    lines
        .iter()
        .map(|l| format!("  echo '{}' >&2", l.replace('\'', "'\\''")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Installed script plus where its invocations are logged.
pub struct Installed {
    pub ytdlp: YtDlp,
    pub calls_log: PathBuf,
}

impl Installed {
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(&self.calls_log)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl FakeYtDlp {
    pub fn install(&self, dir: &Path) -> Installed {
        let calls_log = dir.join("calls.log");
        let script = SCRIPT
            .replace("@LOG@", &calls_log.display().to_string())
            .replace("@PROBE_STDERR@", &stderr_lines(&self.probe_stderr))
            .replace("@JSON@", &self.json)
            .replace("@PROBE_CODE@", &self.probe_code.to_string())
            .replace("@EXT@", &self.ext)
            .replace("@WRITE@", if self.write { "1" } else { "0" })
            .replace("@FETCH_STDERR@", &stderr_lines(&self.fetch_stderr))
            .replace("@FETCH_CODE@", &self.fetch_code.to_string());
        let path = dir.join("yt-dlp.sh");
        fs::write(&path, script).unwrap();
        Installed {
            ytdlp: YtDlp::new("sh").with_args([&path]),
            calls_log,
        }
    }
}
