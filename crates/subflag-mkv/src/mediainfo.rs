//! MediaInfo-based subtitle track probing.
//!
//! MediaInfo is the only tool of the three that reports per-track element
//! counts, which is what the forced-track heuristic runs on. Full output
//! mode is required; the count fields are omitted otherwise.

use crate::types::SubtitleTrackInfo;
use crate::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use std::process::Command;

#[derive(Debug, Deserialize)]
struct MediaInfoOutput {
    media: MediaInfoMedia,
}

#[derive(Debug, Deserialize)]
struct MediaInfoMedia {
    #[serde(rename = "@ref")]
    #[allow(dead_code)]
    file_ref: String,
    track: Vec<MediaInfoTrack>,
}

#[derive(Debug, Deserialize)]
struct MediaInfoTrack {
    #[serde(rename = "@type")]
    track_type: String,
    #[serde(rename = "ID")]
    id: Option<String>,
    #[serde(rename = "Format")]
    format: Option<String>,
    #[serde(rename = "Language")]
    language: Option<String>,
    #[serde(rename = "Default")]
    default: Option<String>,
    #[serde(rename = "Forced")]
    forced: Option<String>,
    // The element count has gone by several names across mediainfo
    // releases. All three spellings are checked, in this order.
    #[serde(rename = "Count_of_elements")]
    count_of_elements: Option<String>,
    #[serde(rename = "Count of elements")]
    count_of_elements_spaced: Option<String>,
    #[serde(rename = "ElementCount")]
    element_count: Option<String>,
}

impl MediaInfoTrack {
    /// Resolve the element count across its known spellings.
    ///
    /// A field that is absent or reads "0" falls through to the next
    /// spelling; when none carries a count the track counts as empty.
    fn resolved_element_count(&self) -> &str {
        let candidates = [
            &self.count_of_elements,
            &self.count_of_elements_spaced,
            &self.element_count,
        ];
        for candidate in candidates {
            if let Some(value) = candidate.as_deref() {
                if value != "0" {
                    return value;
                }
            }
        }
        "0"
    }
}

/// List the subtitle tracks of a file using mediainfo.
///
/// Invokes `mediainfo --Full --Output=JSON` and keeps only tracks of type
/// "Text". Tracks whose element count is not numeric come back with
/// `element_count: None`.
pub fn list_subtitle_tracks(path: &Path) -> Result<Vec<SubtitleTrackInfo>> {
    if !path.exists() {
        return Err(Error::file_not_found(path));
    }

    let output = Command::new("mediainfo")
        .args(["--Full", "--Output=JSON"])
        .arg(path)
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::tool_not_found("mediainfo")
            } else {
                Error::Io(e)
            }
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::tool_failed("mediainfo", stderr.to_string()));
    }

    let json_str = String::from_utf8(output.stdout)
        .map_err(|e| Error::parse_error("mediainfo", format!("Invalid UTF-8: {}", e)))?;

    parse_report(&json_str)
}

fn parse_report(json_str: &str) -> Result<Vec<SubtitleTrackInfo>> {
    let report: MediaInfoOutput = serde_json::from_str(json_str)?;

    Ok(report
        .media
        .track
        .into_iter()
        .filter(|t| t.track_type == "Text")
        .map(convert_track)
        .collect())
}

fn convert_track(track: MediaInfoTrack) -> SubtitleTrackInfo {
    let element_count = track.resolved_element_count().parse::<u64>().ok();

    if element_count.is_none() {
        tracing::warn!(
            "Track {} has a non-numeric element count: {:?}",
            track.id.as_deref().unwrap_or("?"),
            track.resolved_element_count()
        );
    }

    SubtitleTrackInfo {
        id: track.id,
        format: track.format.unwrap_or_default(),
        language: track.language,
        default: track.default.as_deref() == Some("Yes"),
        forced: track.forced.as_deref() == Some("Yes"),
        element_count,
    }
}
