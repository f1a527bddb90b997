//! mkvinfo-based track identity reconciliation.
//!
//! mediainfo and the MKVToolNix tools disagree about track numbering:
//! mediainfo reports the Matroska track number, while mkvpropedit wants the
//! ID that mkvmerge and mkvextract use. mkvinfo is the one tool that prints
//! both on the same line, so its dump is parsed here into a map from one
//! scheme to the other.

use crate::{Error, Result};
use std::collections::HashMap;
use std::path::Path;
use std::process::Command;

const TRACK_OPENER: &str = "| + Track";
const TRACK_NUMBER_LABEL: &str = "Track number:";
const TRACK_TYPE_LABEL: &str = "Track type:";

/// Run `mkvinfo` on a file and return its textual dump.
pub fn read_track_dump(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(Error::file_not_found(path));
    }

    let output = Command::new("mkvinfo").arg(path).output().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::tool_not_found("mkvinfo")
        } else {
            Error::Io(e)
        }
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::tool_failed("mkvinfo", stderr.to_string()));
    }

    String::from_utf8(output.stdout)
        .map_err(|e| Error::parse_error("mkvinfo", format!("Invalid UTF-8: {}", e)))
}

/// Map from mediainfo track IDs to mkvmerge track IDs, for subtitle
/// tracks only.
///
/// Both sides stay strings: keys come from mediainfo's `ID` field, values
/// feed [`crate::propedit::edit_selector`], which does the one numeric
/// conversion.
#[derive(Debug, Clone, Default)]
pub struct TrackIdentityMap {
    entries: HashMap<String, String>,
}

#[derive(Debug, Default)]
struct PendingTrack {
    number: Option<String>,
    merge_id: Option<String>,
}

impl TrackIdentityMap {
    /// Parse an mkvinfo dump into an identity map.
    ///
    /// The dump is processed line by line. A `| + Track` line opens a track
    /// entry, replacing any entry still open. Inside an entry, a
    /// `Track number:` line contributes both IDs, and a `Track type:` line
    /// closes the entry, committing it only when the type is subtitles and
    /// both IDs were seen. Lines that match neither label are ignored, and
    /// a number line that does not parse is logged and skipped.
    pub fn parse(dump: &str) -> Self {
        let mut entries = HashMap::new();
        let mut pending: Option<PendingTrack> = None;

        for raw_line in dump.lines() {
            let line = raw_line.trim();

            if line.contains(TRACK_OPENER) {
                tracing::debug!("Found track entry: {}", line);
                pending = Some(PendingTrack::default());
                continue;
            }

            let Some(track) = pending.as_mut() else {
                continue;
            };

            if line.contains(TRACK_NUMBER_LABEL) {
                match parse_track_number_line(line) {
                    Some((number, merge_id)) => {
                        tracing::debug!(
                            "Track number {} has mkvmerge ID {}",
                            number,
                            merge_id
                        );
                        track.number = Some(number);
                        track.merge_id = Some(merge_id);
                    }
                    None => {
                        tracing::warn!("Could not parse track number line: {}", line);
                    }
                }
            } else if line.contains(TRACK_TYPE_LABEL) {
                if line.to_lowercase().contains("subtitles") {
                    if let (Some(number), Some(merge_id)) =
                        (track.number.take(), track.merge_id.take())
                    {
                        tracing::debug!(
                            "Mapped subtitle track {} to mkvmerge ID {}",
                            number,
                            merge_id
                        );
                        entries.insert(number, merge_id);
                    }
                }
                pending = None;
            }
        }

        TrackIdentityMap { entries }
    }

    /// Look up the mkvmerge track ID for a mediainfo track ID.
    pub fn merge_id(&self, mediainfo_id: &str) -> Option<&str> {
        self.entries.get(mediainfo_id).map(|s| s.as_str())
    }

    /// Number of subtitle tracks in the map.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map contains no subtitle tracks.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Extract both track IDs from a number line.
///
/// Example: `|  + Track number: 3 (track ID for mkvmerge & mkvextract: 2)`
/// yields `("3", "2")`.
fn parse_track_number_line(line: &str) -> Option<(String, String)> {
    let (before_paren, after_paren) = line.split_once('(')?;
    let number = before_paren.split_once(':')?.1.trim();
    let merge_id = after_paren.split_once(':')?.1.split_once(')')?.0.trim();

    if number.is_empty() || merge_id.is_empty() {
        return None;
    }

    Some((number.to_string(), merge_id.to_string()))
}
