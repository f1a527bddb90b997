//! mkvpropedit forced-flag editing.

use crate::{Error, Result};
use std::path::Path;
use std::process::Command;

/// Offset between mkvmerge track IDs and mkvpropedit `track:` selectors.
///
/// The IDs mkvinfo reports for mkvmerge & mkvextract count from zero, while
/// mkvpropedit's positional `track:N` selector counts from one.
pub const EDIT_SELECTOR_OFFSET: u64 = 1;

/// Convert an mkvmerge track ID into an mkvpropedit `track:` selector.
///
/// The ID arrives as a string straight from the mkvinfo dump; this is the
/// single place it is converted to a number and offset.
pub fn edit_selector(merge_id: &str) -> Result<u64> {
    let id: u64 = merge_id.trim().parse().map_err(|_| {
        Error::parse_error("mkvinfo", format!("track ID is not numeric: {}", merge_id))
    })?;
    Ok(id + EDIT_SELECTOR_OFFSET)
}

/// Set or clear the forced flag on one track using mkvpropedit.
///
/// `merge_id` is the mkvmerge track ID as listed in the identity map; the
/// 1-based selector is derived via [`edit_selector`].
pub fn set_forced_flag(path: &Path, merge_id: &str, forced: bool) -> Result<()> {
    if !path.exists() {
        return Err(Error::file_not_found(path));
    }

    let selector = edit_selector(merge_id)?;
    let flag = if forced { 1 } else { 0 };

    tracing::debug!(
        "Executing: mkvpropedit {} --edit track:{} --set flag-forced={}",
        path.display(),
        selector,
        flag
    );

    let output = Command::new("mkvpropedit")
        .arg(path)
        .arg("--edit")
        .arg(format!("track:{}", selector))
        .arg("--set")
        .arg(format!("flag-forced={}", flag))
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::tool_not_found("mkvpropedit")
            } else {
                Error::Io(e)
            }
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::tool_failed("mkvpropedit", stderr.to_string()));
    }

    // mkvpropedit can warn and still exit zero; keep those visible.
    if !output.stderr.is_empty() {
        tracing::warn!(
            "mkvpropedit warnings: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    Ok(())
}
