use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PathsConfig {
    /// Folder scanned for MKV files.
    #[serde(default = "default_mkv_folder")]
    pub mkv_folder: PathBuf,
}

fn default_mkv_folder() -> PathBuf {
    PathBuf::from("/Volumes/Lager/mkv_test")
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            mkv_folder: default_mkv_folder(),
        }
    }
}
