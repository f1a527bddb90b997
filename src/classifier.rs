//! Forced-track classification for subtitle tracks.
//!
//! Sparse subtitle tracks that only cover foreign-language dialogue or
//! signs are routinely muxed without the forced flag set. This module
//! spots them by element count:
//!
//! - **Absolute rule**: fewer than 400 elements. Full dialogue tracks sit
//!   well above that.
//! - **Relative rule**: fewer than 20% of the largest track in the same
//!   language, which catches sparse tracks in formats with unusually low
//!   counts.
//!
//! A track matching either rule should carry the forced flag.

use subflag_mkv::SubtitleTrackInfo;

/// Element count below which a track counts as sparse outright.
pub const FORCED_MAX_ELEMENTS: u64 = 400;

/// Percentage of the same-language maximum below which a track counts as
/// sparse.
pub const FORCED_MAX_SHARE: f64 = 20.0;

/// Result of classifying one subtitle track.
#[derive(Debug, Clone)]
pub struct ClassificationResult {
    /// Element count as a percentage of the largest same-language track.
    /// `None` when the track's own element count is unknown.
    pub percent_of_language_max: Option<f64>,
    /// Whether the track should carry the forced flag.
    pub should_be_forced: bool,
}

/// Classifier for forced subtitle tracks.
pub struct ForcedClassifier;

impl ForcedClassifier {
    /// Create a new classifier.
    pub fn new() -> Self {
        Self
    }

    /// Classify one track against the subtitle tracks of its file.
    ///
    /// `all_tracks` must include `track` itself; a track that is the only
    /// one in its language is therefore always at 100% of the maximum.
    /// A track with an unknown element count is never flagged.
    pub fn classify(
        &self,
        track: &SubtitleTrackInfo,
        all_tracks: &[SubtitleTrackInfo],
    ) -> ClassificationResult {
        let Some(element_count) = track.element_count else {
            return ClassificationResult {
                percent_of_language_max: None,
                should_be_forced: false,
            };
        };

        let language_max = self.language_max(track, all_tracks);
        let percentage = if language_max > 0 {
            (element_count as f64 / language_max as f64) * 100.0
        } else {
            100.0
        };

        let should_be_forced =
            element_count < FORCED_MAX_ELEMENTS || percentage < FORCED_MAX_SHARE;

        ClassificationResult {
            percent_of_language_max: Some(percentage),
            should_be_forced,
        }
    }

    /// Classify every subtitle track of a file against its siblings.
    pub fn classify_all(&self, tracks: &[SubtitleTrackInfo]) -> Vec<ClassificationResult> {
        tracks.iter().map(|t| self.classify(t, tracks)).collect()
    }

    /// Largest known element count among tracks of the same language.
    ///
    /// Tracks with unknown counts do not contribute to the maximum.
    fn language_max(&self, track: &SubtitleTrackInfo, all_tracks: &[SubtitleTrackInfo]) -> u64 {
        all_tracks
            .iter()
            .filter(|t| t.language == track.language)
            .filter_map(|t| t.element_count)
            .max()
            .unwrap_or(0)
    }
}

impl Default for ForcedClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: &str, language: Option<&str>, element_count: Option<u64>) -> SubtitleTrackInfo {
        SubtitleTrackInfo {
            id: Some(id.to_string()),
            format: "PGS".to_string(),
            language: language.map(|s| s.to_string()),
            default: false,
            forced: false,
            element_count,
        }
    }

    #[test]
    fn test_sparse_track_is_forced() {
        let tracks = vec![
            track("3", Some("en"), Some(50)),
            track("4", Some("en"), Some(1000)),
        ];
        let classifier = ForcedClassifier::new();
        let results = classifier.classify_all(&tracks);

        assert!(results[0].should_be_forced);
        assert_eq!(results[0].percent_of_language_max, Some(5.0));
        assert!(!results[1].should_be_forced);
        assert_eq!(results[1].percent_of_language_max, Some(100.0));
    }

    #[test]
    fn test_relative_rule_catches_large_but_sparse_track() {
        // 500 elements clears the absolute cutoff but is only a sixth of
        // the full track.
        let tracks = vec![
            track("3", Some("de"), Some(500)),
            track("4", Some("de"), Some(3000)),
        ];
        let classifier = ForcedClassifier::new();
        let results = classifier.classify_all(&tracks);

        assert!(results[0].should_be_forced);
        let share = results[0].percent_of_language_max.unwrap();
        assert!((share - 16.666).abs() < 0.01);
        assert!(!results[1].should_be_forced);
    }

    #[test]
    fn test_languages_group_separately() {
        // The same 500-element track is not sparse once the 3000-element
        // track belongs to another language.
        let tracks = vec![
            track("3", Some("de"), Some(500)),
            track("4", Some("en"), Some(3000)),
        ];
        let classifier = ForcedClassifier::new();
        let results = classifier.classify_all(&tracks);

        assert!(!results[0].should_be_forced);
        assert_eq!(results[0].percent_of_language_max, Some(100.0));
    }

    #[test]
    fn test_singleton_track_is_its_own_maximum() {
        let tracks = vec![track("3", Some("en"), Some(30000))];
        let classifier = ForcedClassifier::new();
        let result = classifier.classify(&tracks[0], &tracks);

        assert!(!result.should_be_forced);
        assert_eq!(result.percent_of_language_max, Some(100.0));
    }

    #[test]
    fn test_empty_track_counts_as_full_share() {
        let tracks = vec![track("3", Some("en"), Some(0))];
        let classifier = ForcedClassifier::new();
        let result = classifier.classify(&tracks[0], &tracks);

        assert_eq!(result.percent_of_language_max, Some(100.0));
        assert!(result.should_be_forced);
    }

    #[test]
    fn test_unknown_count_is_never_forced() {
        let tracks = vec![
            track("3", Some("en"), None),
            track("4", Some("en"), Some(1000)),
        ];
        let classifier = ForcedClassifier::new();
        let result = classifier.classify(&tracks[0], &tracks);

        assert!(!result.should_be_forced);
        assert_eq!(result.percent_of_language_max, None);
    }

    #[test]
    fn test_unknown_sibling_does_not_affect_maximum() {
        let tracks = vec![
            track("3", Some("en"), Some(50)),
            track("4", Some("en"), None),
        ];
        let classifier = ForcedClassifier::new();
        let result = classifier.classify(&tracks[0], &tracks);

        assert!(result.should_be_forced);
        assert_eq!(result.percent_of_language_max, Some(100.0));
    }

    #[test]
    fn test_untagged_tracks_group_together() {
        let tracks = vec![track("3", None, Some(80)), track("4", None, Some(2000))];
        let classifier = ForcedClassifier::new();
        let results = classifier.classify_all(&tracks);

        assert!(results[0].should_be_forced);
        assert_eq!(results[0].percent_of_language_max, Some(4.0));
        assert!(!results[1].should_be_forced);
    }

    #[test]
    fn test_cutoffs_are_exclusive() {
        // Exactly 400 elements at exactly 20% stays unflagged.
        let tracks = vec![
            track("3", Some("en"), Some(400)),
            track("4", Some("en"), Some(2000)),
        ];
        let classifier = ForcedClassifier::new();
        let result = classifier.classify(&tracks[0], &tracks);

        assert!(!result.should_be_forced);
        assert_eq!(result.percent_of_language_max, Some(20.0));

        let tracks = vec![
            track("3", Some("en"), Some(399)),
            track("4", Some("en"), Some(2000)),
        ];
        let result = classifier.classify(&tracks[0], &tracks);
        assert!(result.should_be_forced);
    }
}
