//! Per-file processing pipeline.
//!
//! One file moves through four stages: probing with mediainfo and mkvinfo,
//! reconciling the two track numbering schemes, classifying each subtitle
//! track, and setting the forced flag where the classifier asks for it.
//! A probe failure fails the whole file; a failure while editing marks
//! only that track and the remaining tracks are still processed.

use crate::classifier::ForcedClassifier;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use subflag_mkv::{mediainfo, mkvinfo, propedit, SubtitleTrackInfo, TrackIdentityMap};

/// What happened to one track during the edit stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackOutcome {
    /// No edit was attempted, either because the track was not flagged or
    /// because this was a dry run.
    Unattempted,
    /// The forced flag was set.
    Succeeded,
    /// The edit failed; details are in the log.
    Failed,
}

/// One subtitle track with its classification and edit outcome.
#[derive(Debug, Clone, Serialize)]
pub struct TrackRecord {
    #[serde(flatten)]
    pub info: SubtitleTrackInfo,
    /// Element count as a percentage of the largest same-language track.
    pub percent_of_language_max: Option<f64>,
    /// Whether the heuristic wants the forced flag on this track.
    pub should_be_forced: bool,
    /// Edit-stage outcome.
    pub outcome: TrackOutcome,
}

impl TrackRecord {
    /// Human-readable element count summary, e.g.
    /// `"56 elements (3.6% of max for de)"`.
    pub fn element_summary(&self) -> String {
        let count = match self.info.element_count {
            Some(n) => n.to_string(),
            None => "unknown".to_string(),
        };

        match self.percent_of_language_max {
            Some(pct) => format!(
                "{} elements ({:.1}% of max for {})",
                count,
                pct,
                self.info.language_label()
            ),
            None => format!("{} elements", count),
        }
    }
}

/// Report for one processed file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// The file that was processed.
    pub path: PathBuf,
    /// All subtitle tracks of the file, flagged or not.
    pub tracks: Vec<TrackRecord>,
}

impl FileReport {
    /// Tracks the classifier wants flagged.
    pub fn flagged(&self) -> usize {
        self.tracks.iter().filter(|t| t.should_be_forced).count()
    }

    /// Tracks whose forced flag was set.
    pub fn succeeded(&self) -> usize {
        self.tracks
            .iter()
            .filter(|t| t.outcome == TrackOutcome::Succeeded)
            .count()
    }

    /// Tracks whose edit failed.
    pub fn failed(&self) -> usize {
        self.tracks
            .iter()
            .filter(|t| t.outcome == TrackOutcome::Failed)
            .count()
    }
}

/// Classify a file's subtitle tracks into records.
///
/// Outcomes start as [`TrackOutcome::Unattempted`]; only the edit stage
/// moves them.
pub fn classify_tracks(tracks: Vec<SubtitleTrackInfo>) -> Vec<TrackRecord> {
    let classifier = ForcedClassifier::new();
    let results = classifier.classify_all(&tracks);

    tracks
        .into_iter()
        .zip(results)
        .map(|(info, result)| TrackRecord {
            info,
            percent_of_language_max: result.percent_of_language_max,
            should_be_forced: result.should_be_forced,
            outcome: TrackOutcome::Unattempted,
        })
        .collect()
}

/// Pipeline that takes one MKV file from probe to edited forced flags.
pub struct FilePipeline {
    dry_run: bool,
}

impl FilePipeline {
    /// Create a pipeline. With `dry_run` set, edits are logged but not
    /// executed.
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Process a single file and report per-track results.
    ///
    /// Returns an error when either probe fails; the caller decides
    /// whether to stop or move on to the next file.
    pub fn process(&self, path: &Path) -> Result<FileReport> {
        let tracks =
            mediainfo::list_subtitle_tracks(path).context("mediainfo probe failed")?;
        let dump = mkvinfo::read_track_dump(path).context("mkvinfo dump failed")?;

        let identity = TrackIdentityMap::parse(&dump);
        tracing::debug!("Track identity map: {:?}", identity);

        let mut records = classify_tracks(tracks);

        if records.is_empty() {
            tracing::info!("No subtitle tracks found in this file");
            return Ok(FileReport {
                path: path.to_path_buf(),
                tracks: records,
            });
        }

        tracing::info!("Found {} subtitle tracks:", records.len());
        for record in &records {
            tracing::info!("  Track ID {}:", record.info.id_label());
            tracing::info!("    Format: {}", record.info.format);
            tracing::info!("    Language: {}", record.info.language_label());
            tracing::info!("    Current forced flag: {}", record.info.forced);
            tracing::info!("    Default: {}", record.info.default);
            tracing::info!("    Elements: {}", record.element_summary());
            tracing::info!(
                "    Needs to be flagged as forced: {}",
                record.should_be_forced
            );
        }

        let flagged: Vec<String> = records
            .iter()
            .filter(|r| r.should_be_forced)
            .map(|r| {
                format!(
                    "track {} ({}): {}",
                    r.info.id_label(),
                    r.info.language_label(),
                    r.element_summary()
                )
            })
            .collect();

        if flagged.is_empty() {
            tracing::info!("No tracks need to be modified in this file");
        } else {
            tracing::info!("Will modify {} tracks:", flagged.len());
            for line in &flagged {
                tracing::info!("  - {}", line);
            }

            self.apply_flags(path, &identity, &mut records);

            tracing::info!("Final track status:");
            for record in records.iter().filter(|r| r.should_be_forced) {
                let action = match record.outcome {
                    TrackOutcome::Succeeded => "Success",
                    TrackOutcome::Failed => "Failed",
                    TrackOutcome::Unattempted => "Skipped (dry run)",
                };
                tracing::info!(
                    "  Track {} ({}): {} -> {}",
                    record.info.id_label(),
                    record.info.language_label(),
                    record.element_summary(),
                    action
                );
            }
        }

        Ok(FileReport {
            path: path.to_path_buf(),
            tracks: records,
        })
    }

    /// Edit stage: set the forced flag on every flagged track.
    ///
    /// Tracks whose mediainfo ID has no mkvmerge counterpart fail
    /// individually; one failed edit never stops the remaining tracks.
    fn apply_flags(
        &self,
        path: &Path,
        identity: &TrackIdentityMap,
        records: &mut [TrackRecord],
    ) {
        for record in records.iter_mut().filter(|r| r.should_be_forced) {
            let merge_id = record
                .info
                .id
                .as_deref()
                .and_then(|id| identity.merge_id(id));

            match merge_id {
                None => {
                    tracing::error!(
                        "✗ Could not find mkvmerge ID for track {}",
                        record.info.id_label()
                    );
                    record.outcome = TrackOutcome::Failed;
                }
                Some(merge_id) => {
                    if self.dry_run {
                        tracing::info!(
                            "[DRY RUN] Would set forced flag on track {} (mkvmerge ID {})",
                            record.info.id_label(),
                            merge_id
                        );
                        continue;
                    }

                    tracing::info!(
                        "Setting forced flag for track {} (mkvmerge ID {})",
                        record.info.id_label(),
                        merge_id
                    );

                    match propedit::set_forced_flag(path, merge_id, true) {
                        Ok(()) => {
                            tracing::info!("✓ Successfully set forced flag");
                            record.outcome = TrackOutcome::Succeeded;
                        }
                        Err(e) => {
                            tracing::error!("✗ Failed to set forced flag: {}", e);
                            record.outcome = TrackOutcome::Failed;
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(id: Option<&str>, language: &str, element_count: Option<u64>) -> SubtitleTrackInfo {
        SubtitleTrackInfo {
            id: id.map(|s| s.to_string()),
            format: "PGS".to_string(),
            language: Some(language.to_string()),
            default: false,
            forced: false,
            element_count,
        }
    }

    #[test]
    fn test_classify_tracks_builds_records() {
        let records = classify_tracks(vec![
            info(Some("3"), "en", Some(50)),
            info(Some("4"), "en", Some(1000)),
        ]);

        assert_eq!(records.len(), 2);
        assert!(records[0].should_be_forced);
        assert!(!records[1].should_be_forced);
        assert!(records
            .iter()
            .all(|r| r.outcome == TrackOutcome::Unattempted));
    }

    #[test]
    fn test_apply_flags_marks_unmapped_track_failed() {
        // The identity map knows nothing about this file's tracks, so both
        // flagged tracks must fail without stopping each other.
        let pipeline = FilePipeline::new(false);
        let identity = TrackIdentityMap::parse("");
        let mut records = classify_tracks(vec![
            info(Some("3"), "en", Some(50)),
            info(Some("4"), "de", Some(30)),
            info(Some("5"), "en", Some(5000)),
        ]);

        pipeline.apply_flags(Path::new("/nonexistent/movie.mkv"), &identity, &mut records);

        assert_eq!(records[0].outcome, TrackOutcome::Failed);
        assert_eq!(records[1].outcome, TrackOutcome::Failed);
        assert_eq!(records[2].outcome, TrackOutcome::Unattempted);
    }

    #[test]
    fn test_apply_flags_handles_track_without_id() {
        let pipeline = FilePipeline::new(false);
        let dump = "\
| + Track
|  + Track number: 3 (track ID for mkvmerge & mkvextract: 2)
|  + Track type: subtitles
";
        let identity = TrackIdentityMap::parse(dump);
        let mut records = classify_tracks(vec![info(None, "en", Some(50))]);

        pipeline.apply_flags(Path::new("/nonexistent/movie.mkv"), &identity, &mut records);

        assert_eq!(records[0].outcome, TrackOutcome::Failed);
    }

    #[test]
    fn test_apply_flags_dry_run_attempts_nothing() {
        let pipeline = FilePipeline::new(true);
        let dump = "\
| + Track
|  + Track number: 3 (track ID for mkvmerge & mkvextract: 2)
|  + Track type: subtitles
";
        let identity = TrackIdentityMap::parse(dump);
        let mut records = classify_tracks(vec![info(Some("3"), "en", Some(50))]);

        pipeline.apply_flags(Path::new("/nonexistent/movie.mkv"), &identity, &mut records);

        assert_eq!(records[0].outcome, TrackOutcome::Unattempted);
    }

    #[test]
    fn test_report_counts() {
        let mut records = classify_tracks(vec![
            info(Some("3"), "en", Some(50)),
            info(Some("4"), "de", Some(30)),
            info(Some("5"), "en", Some(5000)),
        ]);
        records[0].outcome = TrackOutcome::Succeeded;
        records[1].outcome = TrackOutcome::Failed;

        let report = FileReport {
            path: PathBuf::from("movie.mkv"),
            tracks: records,
        };

        assert_eq!(report.flagged(), 2);
        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed(), 1);
    }

    #[test]
    fn test_element_summary_formats() {
        let records = classify_tracks(vec![
            info(Some("3"), "de", Some(56)),
            info(Some("4"), "de", Some(1542)),
        ]);
        assert_eq!(records[0].element_summary(), "56 elements (3.6% of max for de)");

        let records = classify_tracks(vec![info(Some("3"), "en", None)]);
        assert_eq!(records[0].element_summary(), "unknown elements");
    }
}
