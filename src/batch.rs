//! Batch driver over a folder of MKV files.
//!
//! The folder is listed non-recursively and matching files are processed
//! in sorted order. Anything that goes wrong with an individual file is
//! logged and the run moves on to the next one.

use crate::pipeline::FilePipeline;
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use walkdir::WalkDir;

/// Totals for one batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    /// MKV files found in the folder.
    pub files_found: usize,
    /// Files that made it through the pipeline.
    pub files_processed: usize,
    /// Files skipped after a probe failure.
    pub files_failed: usize,
    /// Tracks the classifier flagged across all files.
    pub tracks_flagged: usize,
    /// Tracks whose forced flag was set.
    pub tracks_updated: usize,
    /// Tracks whose edit failed.
    pub tracks_failed: usize,
}

/// Batch runner for a folder of MKV files.
pub struct BatchRunner {
    folder: PathBuf,
    dry_run: bool,
    pipeline: FilePipeline,
}

impl BatchRunner {
    /// Create a runner for `folder`.
    pub fn new(folder: impl Into<PathBuf>, dry_run: bool) -> Self {
        Self {
            folder: folder.into(),
            dry_run,
            pipeline: FilePipeline::new(dry_run),
        }
    }

    /// Process every MKV file in the folder.
    ///
    /// Returns an error only when the folder itself is unusable; per-file
    /// errors are logged and counted instead.
    pub fn run(&self) -> Result<BatchSummary> {
        if !self.folder.exists() {
            anyhow::bail!(
                "The specified folder path does not exist: {:?}",
                self.folder
            );
        }

        info!("Starting MKV analysis for folder: {:?}", self.folder);

        let files = discover_mkv_files(&self.folder);

        let mut summary = BatchSummary {
            files_found: files.len(),
            ..Default::default()
        };

        if files.is_empty() {
            warn!("No MKV files found in the specified folder");
            return Ok(summary);
        }

        info!("Found {} MKV files", files.len());

        for file in &files {
            let name = file.file_name().unwrap_or(file.as_os_str());
            info!("Analyzing file: {:?}", name);

            match self.pipeline.process(file) {
                Ok(report) => {
                    summary.files_processed += 1;
                    summary.tracks_flagged += report.flagged();
                    summary.tracks_updated += report.succeeded();
                    summary.tracks_failed += report.failed();
                }
                Err(e) => {
                    error!("Error processing {:?}: {:#}", name, e);
                    summary.files_failed += 1;
                }
            }
        }

        info!(
            "Summary: {} files found, {} files processed, {} files failed, {} tracks flagged, {} tracks updated, {} track edits failed",
            summary.files_found,
            summary.files_processed,
            summary.files_failed,
            summary.tracks_flagged,
            summary.tracks_updated,
            summary.tracks_failed
        );

        if self.dry_run {
            info!("[DRY RUN] No files were modified");
        }

        Ok(summary)
    }
}

/// List the MKV files directly inside `folder`, sorted by name.
///
/// Subdirectories are not descended into. Entries that cannot be read
/// (dangling symlinks, unreadable metadata) are logged and skipped.
pub fn discover_mkv_files(folder: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(folder).max_depth(1).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable directory entry: {}", e);
                continue;
            }
        };
        if entry.file_type().is_file() && is_mkv_file(entry.path()) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    files
}

/// Check if a path has the .mkv extension, case-insensitively.
pub fn is_mkv_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase() == "mkv")
        .unwrap_or(false)
}
