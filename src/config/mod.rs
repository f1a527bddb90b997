mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Read from an existing file.
    Loaded(PathBuf),
    /// No config file found; defaults were written to this path.
    Created(PathBuf),
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}

/// Save configuration to a TOML file.
pub fn save_config(path: &Path, config: &Config) -> Result<()> {
    let content = toml::to_string_pretty(config).with_context(|| "Failed to serialize config")?;

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config file: {:?}", path))?;

    Ok(())
}

/// Load config from default locations, writing a default file on first run.
///
/// With an explicit path the file is loaded if present and created with
/// defaults otherwise. Without one, `./subflag.toml` and
/// `~/.config/subflag/config.toml` are tried in order before falling back
/// to creating `./subflag.toml`.
pub fn load_config_or_init(custom_path: Option<&Path>) -> Result<(Config, ConfigSource)> {
    if let Some(path) = custom_path {
        if path.exists() {
            return Ok((load_config(path)?, ConfigSource::Loaded(path.to_path_buf())));
        }
        let config = Config::default();
        save_config(path, &config)?;
        return Ok((config, ConfigSource::Created(path.to_path_buf())));
    }

    // Try default locations
    let default_paths = ["./subflag.toml", "~/.config/subflag/config.toml"];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return Ok((load_config(path)?, ConfigSource::Loaded(path.to_path_buf())));
        }
    }

    // First run
    let path = PathBuf::from("./subflag.toml");
    let config = Config::default();
    save_config(&path, &config)?;
    Ok((config, ConfigSource::Created(path)))
}
