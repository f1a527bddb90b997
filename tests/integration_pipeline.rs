//! Integration tests for the classify, reconcile, and address chain.
//!
//! Walks the same path the batch pipeline takes, minus the external
//! tools: classify mediainfo-shaped tracks, reconcile IDs from an
//! mkvinfo dump, and derive the mkvpropedit selector.

use std::path::PathBuf;
use subflag::pipeline::{classify_tracks, FileReport, TrackOutcome};
use subflag_mkv::{propedit, SubtitleTrackInfo, TrackIdentityMap};

fn track(id: &str, language: &str, element_count: Option<u64>) -> SubtitleTrackInfo {
    SubtitleTrackInfo {
        id: Some(id.to_string()),
        format: "PGS".to_string(),
        language: Some(language.to_string()),
        default: false,
        forced: false,
        element_count,
    }
}

const MOVIE_DUMP: &str = "\
+ EBML head
+ Segment: size 4099271
|+ Tracks
| + Track
|  + Track number: 1 (track ID for mkvmerge & mkvextract: 0)
|  + Track type: video
| + Track
|  + Track number: 2 (track ID for mkvmerge & mkvextract: 1)
|  + Track type: audio
| + Track
|  + Track number: 3 (track ID for mkvmerge & mkvextract: 2)
|  + Track type: subtitles
|  + Language: ger
| + Track
|  + Track number: 4 (track ID for mkvmerge & mkvextract: 3)
|  + Track type: subtitles
|  + Language: ger
";

#[test]
fn sparse_track_resolves_to_propedit_selector() {
    // Track 3 is the sparse German track sitting next to the full one.
    let records = classify_tracks(vec![
        track("3", "de", Some(56)),
        track("4", "de", Some(1542)),
    ]);

    assert!(records[0].should_be_forced);
    assert!(!records[1].should_be_forced);

    let map = TrackIdentityMap::parse(MOVIE_DUMP);
    let merge_id = map.merge_id(records[0].info.id.as_deref().unwrap()).unwrap();

    assert_eq!(merge_id, "2");
    assert_eq!(propedit::edit_selector(merge_id).unwrap(), 3);
}

#[test]
fn classification_starts_with_no_outcome() {
    let records = classify_tracks(vec![
        track("3", "en", Some(50)),
        track("4", "en", Some(1000)),
    ]);

    assert!(records
        .iter()
        .all(|r| r.outcome == TrackOutcome::Unattempted));
}

#[test]
fn ambiguous_count_is_reported_but_never_flagged() {
    let records = classify_tracks(vec![
        track("3", "en", None),
        track("4", "en", Some(1000)),
    ]);

    assert!(!records[0].should_be_forced);
    assert_eq!(records[0].percent_of_language_max, None);
    assert_eq!(records[0].element_summary(), "unknown elements");
}

#[test]
fn report_serializes_flat_track_fields() {
    let records = classify_tracks(vec![
        track("3", "de", Some(56)),
        track("4", "de", Some(1542)),
    ]);
    let report = FileReport {
        path: PathBuf::from("movie.mkv"),
        tracks: records,
    };

    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(value["path"], "movie.mkv");
    assert_eq!(value["tracks"][0]["id"], "3");
    assert_eq!(value["tracks"][0]["language"], "de");
    assert_eq!(value["tracks"][0]["should_be_forced"], true);
    assert_eq!(value["tracks"][0]["outcome"], "unattempted");
    assert_eq!(value["tracks"][1]["should_be_forced"], false);
}
