//! Zero-byte placeholder that reserves a unique output path prefix.
//!
//! The downloader writes the real media to `<placeholder>.<ext>`; the
//! placeholder itself is only there to keep the prefix unique and is removed
//! when the run ends, on every path.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempPath;

/// Name prefix of every placeholder.
pub const PREFIX: &str = "clipdl-";

/// Suffix appended to the placeholder path to form the output template.
pub const DEFAULT_OUTPUT_SUFFIX: &str = ".%(ext)s";

/// Owned placeholder file. Dropping it removes the file; [`Placeholder::release`]
/// does the same but reports failure.
#[derive(Debug)]
pub struct Placeholder {
    path: TempPath,
}

impl Placeholder {
    /// Create in the system temp directory.
    pub fn create() -> io::Result<Self> {
        Self::create_in(std::env::temp_dir())
    }

    /// Create in `dir`. The file handle is closed before returning so the
    /// downloader can write derived paths without contention; if closing
    /// fails the file is already gone.
    pub fn create_in(dir: impl AsRef<Path>) -> io::Result<Self> {
        let file = tempfile::Builder::new().prefix(PREFIX).tempfile_in(dir)?;
        let path = file.into_temp_path();
        tracing::debug!("placeholder {}", path.display());
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `<placeholder><suffix>`, e.g. `/tmp/clipdl-ab12.%(ext)s`.
    pub fn output_template(&self, suffix: &str) -> String {
        format!("{}{}", self.path.display(), suffix)
    }

    /// Files next to the placeholder named `<placeholder>.<anything>`,
    /// sorted by name. These are what the downloader produced.
    pub fn artifacts(&self) -> io::Result<Vec<PathBuf>> {
        let (Some(dir), Some(name)) = (self.path.parent(), self.path.file_name()) else {
            return Ok(Vec::new());
        };
        let mut stem: OsString = name.to_owned();
        stem.push(".");
        let stem = stem.to_string_lossy().into_owned();

        let mut found = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let file_name = entry.file_name();
            if file_name.to_string_lossy().starts_with(&stem) && entry.file_type()?.is_file() {
                found.push(entry.path());
            }
        }
        found.sort();
        Ok(found)
    }

    /// Remove the placeholder now. Leaves `<placeholder>.<ext>` untouched.
    pub fn release(self) -> io::Result<()> {
        let shown = self.path.display().to_string();
        self.path.close()?;
        tracing::debug!("released placeholder {}", shown);
        Ok(())
    }
}
