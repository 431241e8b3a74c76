//! Match filter: decides whether a download may proceed based on metadata.

use std::fmt;

use crate::info::InfoDict;

/// Default upper bound on clip length: ten minutes.
pub const DEFAULT_MAX_DURATION_SECS: f64 = 60.0 * 10.0;

/// Reason a download was refused by the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Livestream,
    TooLong,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Livestream => write!(f, "This is/was a livestream"),
            Rejection::TooLong => write!(f, "This video is too long"),
        }
    }
}

/// Pure predicate over an [`InfoDict`]. Built from config thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediaFilter {
    pub reject_live: bool,
    /// `None` disables the length check.
    pub max_duration_secs: Option<f64>,
}

impl Default for MediaFilter {
    fn default() -> Self {
        Self {
            reject_live: true,
            max_duration_secs: Some(DEFAULT_MAX_DURATION_SECS),
        }
    }
}

impl MediaFilter {
    /// Returns the rejection reason, or `None` to allow the download.
    ///
    /// `_incomplete` is accepted for parity with the downloader's filter
    /// signature and does not influence the result.
    pub fn check(&self, info: &InfoDict, _incomplete: bool) -> Option<Rejection> {
        if self.reject_live && (info.is_live || info.was_live) {
            return Some(Rejection::Livestream);
        }
        // Zero or missing duration is unknown length, not a violation.
        match (info.duration, self.max_duration_secs) {
            (Some(d), Some(max)) if d != 0.0 && d > max => Some(Rejection::TooLong),
            _ => None,
        }
    }
}
