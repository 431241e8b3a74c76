//! Metadata snapshot ("info dict") reported by the downloader before a fetch.
//!
//! Only the fields the match filter reads are modelled; everything else in
//! yt-dlp's JSON is ignored.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Read-only view of the downloader's metadata for one media resource.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InfoDict {
    /// Resource is currently live.
    #[serde(default, deserialize_with = "truthy")]
    pub is_live: bool,
    /// Resource is a recording of a past livestream.
    #[serde(default, deserialize_with = "truthy")]
    pub was_live: bool,
    /// Length in seconds, if the extractor knows it.
    #[serde(default, deserialize_with = "seconds")]
    pub duration: Option<f64>,
}

impl InfoDict {
    /// Parse yt-dlp's `--dump-single-json` output.
    pub fn from_json(data: &str) -> serde_json::Result<Self> {
        serde_json::from_str(data)
    }
}

/// Extractors emit `null`, booleans, or occasionally numbers/strings for the
/// live flags; anything empty or zero counts as false.
fn truthy<'de, D>(d: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(d)?;
    Ok(match v {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    })
}

fn seconds<'de, D>(d: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(d)?;
    Ok(match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_typical_video() {
        let info = InfoDict::from_json(
            r#"{"id": "abc", "title": "clip", "duration": 59, "is_live": false, "was_live": false}"#,
        )
        .unwrap();
        assert!(!info.is_live);
        assert!(!info.was_live);
        assert_eq!(info.duration, Some(59.0));
    }

    #[test]
    fn missing_and_null_fields_default() {
        let info = InfoDict::from_json(r#"{"is_live": null, "duration": null}"#).unwrap();
        assert_eq!(info, InfoDict::default());
        let info = InfoDict::from_json("{}").unwrap();
        assert_eq!(info, InfoDict::default());
    }

    #[test]
    fn live_flags_follow_truthiness() {
        let info = InfoDict::from_json(r#"{"is_live": 1, "was_live": ""}"#).unwrap();
        assert!(info.is_live);
        assert!(!info.was_live);
        let info = InfoDict::from_json(r#"{"is_live": 0, "was_live": "yes"}"#).unwrap();
        assert!(!info.is_live);
        assert!(info.was_live);
    }

    #[test]
    fn fractional_duration() {
        let info = InfoDict::from_json(r#"{"duration": 600.5}"#).unwrap();
        assert_eq!(info.duration, Some(600.5));
    }

    #[test]
    fn invalid_json_is_error() {
        assert!(InfoDict::from_json("not json").is_err());
    }
}
