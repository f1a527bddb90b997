mod cli;

use subflag::{batch, config, logging, pipeline};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => {
            run_batch(cli.config.as_deref(), None, false, cli.verbose);
            Ok(())
        }
        Some(Commands::Run { dir, dry_run }) => {
            run_batch(cli.config.as_deref(), dir, dry_run, cli.verbose);
            Ok(())
        }
        Some(Commands::Probe { file, json }) => {
            logging::init_console(cli.verbose);
            probe_file(&file, json)
        }
        Some(Commands::CheckTools) => {
            logging::init_console(cli.verbose);
            check_tools()
        }
    }
}

/// Run the batch over the target folder.
///
/// Errors are logged rather than returned; a batch invocation always
/// exits zero so that scheduled runs never trip on a bad file or folder.
fn run_batch(
    config_path: Option<&Path>,
    dir_override: Option<PathBuf>,
    dry_run: bool,
    verbose: bool,
) {
    let (config, source) = match config::load_config_or_init(config_path) {
        Ok(loaded) => loaded,
        Err(e) => {
            logging::init_console(verbose);
            tracing::error!("Script failed: {:#}", e);
            return;
        }
    };

    let folder = dir_override.unwrap_or(config.paths.mkv_folder);

    // The log file lives in the folder being processed, so logging can
    // only be set up once the folder is known.
    match logging::init_with_log_file(&folder, verbose) {
        Ok(log_path) => tracing::info!("Logging to {:?}", log_path),
        Err(e) => {
            logging::init_console(verbose);
            tracing::warn!("Console logging only: {:#}", e);
        }
    }

    match source {
        config::ConfigSource::Loaded(path) => tracing::debug!("Loaded config from {:?}", path),
        config::ConfigSource::Created(path) => {
            tracing::info!("Created default config at {:?}", path);
        }
    }

    let runner = batch::BatchRunner::new(folder, dry_run);
    match runner.run() {
        Ok(_) => tracing::info!("Analysis and fixes completed successfully"),
        Err(e) => tracing::error!("Script failed: {:#}", e),
    }
}

fn probe_file(file: &Path, json: bool) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {:?}", file);
    }

    let tracks = subflag_mkv::mediainfo::list_subtitle_tracks(file)?;
    let records = pipeline::classify_tracks(tracks);

    if json {
        let report = pipeline::FileReport {
            path: file.to_path_buf(),
            tracks: records,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("File: {}", file.display());
        println!("Subtitle tracks: {}", records.len());

        for record in &records {
            print!(
                "  [{}] {} ({})",
                record.info.id_label(),
                record.info.format,
                record.info.language_label()
            );
            if record.info.forced {
                print!(" [forced]");
            }
            if record.info.default {
                print!(" [default]");
            }
            println!();
            println!("      {}", record.element_summary());
            if record.should_be_forced {
                println!("      should be flagged as forced");
            }
        }
    }

    Ok(())
}

fn check_tools() -> Result<()> {
    println!("Checking external tools...\n");

    let tools = subflag_mkv::check_tools();
    let mut all_ok = true;

    for tool in &tools {
        let status = if tool.available {
            "✓"
        } else {
            all_ok = false;
            "✗"
        };

        print!("{} {}", status, tool.name);

        if let Some(ref version) = tool.version {
            print!(" ({})", version);
        }

        if let Some(ref path) = tool.path {
            print!(" - {}", path.display());
        }

        println!();
    }

    println!();
    if all_ok {
        println!("All required tools are available!");
    } else {
        println!("Some tools are missing. Install MediaInfo and MKVToolNix to enable all features.");
    }

    Ok(())
}
