//! Logging setup.
//!
//! Console logging is always on. Batch runs additionally mirror everything
//! into a timestamped log file inside the folder being processed, which
//! keeps the record of what was changed next to the files themselves.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

// Respect RUST_LOG if set, otherwise use defaults based on the verbose flag.
fn env_filter(verbose: bool) -> EnvFilter {
    let directives = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if verbose {
            "subflag=debug,subflag_mkv=debug".to_string()
        } else {
            "subflag=info,subflag_mkv=info".to_string()
        }
    });

    EnvFilter::new(directives)
}

/// Initialize console-only logging.
pub fn init_console(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Initialize logging to the console and to a fresh log file in `folder`.
///
/// The file is named `mkv_analysis_<timestamp>.log`. Returns the log file
/// path. When the file cannot be created nothing is initialized, so the
/// caller can still fall back to [`init_console`].
pub fn init_with_log_file(folder: &Path, verbose: bool) -> Result<PathBuf> {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let log_path = folder.join(format!("mkv_analysis_{}.log", timestamp));

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to create log file: {:?}", log_path))?;

    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Arc::new(file)),
        )
        .init();

    Ok(log_path)
}
