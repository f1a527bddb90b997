//! Subtitle track types.

use serde::{Deserialize, Serialize};

/// Information about a subtitle track as reported by mediainfo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubtitleTrackInfo {
    /// Track ID as mediainfo reports it. Usually numeric, but kept as a
    /// string because mediainfo makes no promises.
    pub id: Option<String>,
    /// Subtitle format (e.g., "PGS", "UTF-8", "VobSub").
    pub format: String,
    /// Language code (e.g., "en", "de").
    pub language: Option<String>,
    /// Whether this is the default track.
    pub default: bool,
    /// Whether the forced flag is already set.
    pub forced: bool,
    /// Number of subtitle elements in the track. `None` when mediainfo
    /// reported a count that is not a number.
    pub element_count: Option<u64>,
}

impl SubtitleTrackInfo {
    /// Language for display and grouping, with a stable fallback for
    /// tracks that carry no language tag.
    pub fn language_label(&self) -> &str {
        self.language.as_deref().unwrap_or("und")
    }

    /// Track ID for display.
    pub fn id_label(&self) -> &str {
        self.id.as_deref().unwrap_or("?")
    }
}
