use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "subflag")]
#[command(author, version, about = "Forced-subtitle flag automation for Matroska files")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Without a subcommand, the configured folder is analyzed and fixed.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a folder of MKV files and set forced flags on sparse tracks
    Run {
        /// Folder to process (defaults to the configured folder)
        dir: Option<PathBuf>,

        /// Show what would be done without executing
        #[arg(long)]
        dry_run: bool,
    },

    /// Probe a single MKV file and display its subtitle tracks
    Probe {
        /// File to probe
        #[arg(required = true)]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that required external tools are available
    CheckTools,
}
