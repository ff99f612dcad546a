// ============================================================================
// bitshrink-core/src/config/file.rs
// ============================================================================
//
// CONFIGURATION FILE: Optional TOML layer
//
// Every key is optional; keys that are absent keep the built-in default.
// Unknown keys are rejected so typos surface at start-up.
//
// Example:
//
//   input_dir = "/media/incoming"
//   output_dir = "/media/shrunk"
//   max_concurrent_encodes = 2
//   log_level = "debug"

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{CoreError, CoreResult};

/// The parsed contents of a bitshrink TOML configuration file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub temp_dir: Option<PathBuf>,
    pub max_concurrent_encodes: Option<usize>,
    pub ffmpeg_path: Option<String>,
    pub ffprobe_path: Option<String>,
    pub video_codec: Option<String>,
    pub audio_codec: Option<String>,
    pub log_level: Option<String>,
}

impl ConfigFile {
    /// Reads and parses a configuration file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            CoreError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&contents)
            .map_err(|e| CoreError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Parses configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}
