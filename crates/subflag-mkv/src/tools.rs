//! External tool detection and management.

use crate::{Error, Result};
use std::path::PathBuf;
use std::process::Command;

/// The external tools subflag drives.
///
/// MediaInfo reports track metadata and element counts, `mkvinfo` exposes
/// both track numbering schemes, and `mkvpropedit` writes the forced flag.
pub const REQUIRED_TOOLS: [&str; 3] = ["mediainfo", "mkvinfo", "mkvpropedit"];

/// Information about an external tool.
#[derive(Debug, Clone)]
pub struct ToolInfo {
    /// Name of the tool.
    pub name: String,
    /// Whether the tool is available.
    pub available: bool,
    /// Version string if available.
    pub version: Option<String>,
    /// Path to the tool executable.
    pub path: Option<PathBuf>,
}

/// Check if a tool is available and get its information.
///
/// # Example
///
/// ```no_run
/// use subflag_mkv::check_tool;
///
/// let info = check_tool("mkvpropedit");
/// if info.available {
///     println!("mkvpropedit version: {:?}", info.version);
/// }
/// ```
pub fn check_tool(name: &str) -> ToolInfo {
    let result = Command::new(name).arg("--version").output();

    match result {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout)
                .lines()
                .next()
                .map(|s| s.to_string());

            let path = which::which(name).ok();

            ToolInfo {
                name: name.to_string(),
                available: true,
                version,
                path,
            }
        }
        _ => ToolInfo {
            name: name.to_string(),
            available: false,
            version: None,
            path: None,
        },
    }
}

/// Check all tools subflag needs.
///
/// Returns information about mediainfo, mkvinfo, and mkvpropedit.
pub fn check_tools() -> Vec<ToolInfo> {
    REQUIRED_TOOLS.iter().map(|name| check_tool(name)).collect()
}

/// Require that a tool is available, returning its path.
///
/// # Errors
///
/// Returns an error if the tool is not found.
pub fn require_tool(name: &str) -> Result<PathBuf> {
    which::which(name).map_err(|_| Error::tool_not_found(name))
}
