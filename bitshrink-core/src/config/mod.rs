// ============================================================================
// bitshrink-core/src/config/mod.rs
// ============================================================================
//
// CONFIGURATION: Static start-up configuration for a transcoding run
//
// All values are fixed before the worker pool starts. Layering, lowest to
// highest precedence: built-in defaults, TOML file, BITSHRINK_* environment
// variables, command-line flags (applied by the CLI through the builder).
//
// KEY COMPONENTS:
// - CoreConfig: the resolved configuration
// - CoreConfigBuilder: fluent construction (builder.rs)
// - ConfigFile: optional TOML layer (file.rs)
// - Environment helpers (utils.rs)

// ---- Standard library imports ----
use std::path::{Path, PathBuf};
use std::str::FromStr;

// ---- External crate imports ----
use log::LevelFilter;

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult};

mod builder;
mod file;
pub mod utils;

pub use builder::CoreConfigBuilder;
pub use file::ConfigFile;

// ============================================================================
// DEFAULTS
// ============================================================================

pub const DEFAULT_INPUT_DIR: &str = "./input";
pub const DEFAULT_OUTPUT_DIR: &str = "./output";
pub const DEFAULT_LOG_DIR: &str = "./log";

/// Concurrent encodes; matches the session limit of consumer NVENC parts.
pub const DEFAULT_MAX_CONCURRENT_ENCODES: usize = 3;

pub const DEFAULT_FFMPEG: &str = "ffmpeg";
pub const DEFAULT_FFPROBE: &str = "ffprobe";
pub const DEFAULT_VIDEO_CODEC: &str = "hevc_nvenc";
pub const DEFAULT_AUDIO_CODEC: &str = "aac";

// ---- Environment variable names ----

pub const ENV_INPUT_DIR: &str = "BITSHRINK_INPUT_DIR";
pub const ENV_OUTPUT_DIR: &str = "BITSHRINK_OUTPUT_DIR";
pub const ENV_LOG_DIR: &str = "BITSHRINK_LOG_DIR";
pub const ENV_TEMP_DIR: &str = "BITSHRINK_TEMP_DIR";
pub const ENV_JOBS: &str = "BITSHRINK_JOBS";
pub const ENV_FFMPEG: &str = "BITSHRINK_FFMPEG";
pub const ENV_FFPROBE: &str = "BITSHRINK_FFPROBE";

// ============================================================================
// CORE CONFIGURATION
// ============================================================================

/// Resolved configuration for one transcoding run.
#[derive(Debug, Clone, PartialEq)]
pub struct CoreConfig {
    /// Root of the tree to discover input files in
    pub input_dir: PathBuf,

    /// Root of the mirrored output tree
    pub output_dir: PathBuf,

    /// Directory holding one log file per run
    pub log_dir: PathBuf,

    /// Temporary directory handed to subprocesses through TMP/TEMP.
    /// Falls back to `log_dir` when unset.
    pub temp_dir: Option<PathBuf>,

    /// Maximum number of encodes in flight
    pub max_concurrent_encodes: usize,

    pub ffmpeg_path: String,
    pub ffprobe_path: String,
    pub video_codec: String,
    pub audio_codec: String,

    pub log_level: LevelFilter,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            temp_dir: None,
            max_concurrent_encodes: DEFAULT_MAX_CONCURRENT_ENCODES,
            ffmpeg_path: DEFAULT_FFMPEG.to_string(),
            ffprobe_path: DEFAULT_FFPROBE.to_string(),
            video_codec: DEFAULT_VIDEO_CODEC.to_string(),
            audio_codec: DEFAULT_AUDIO_CODEC.to_string(),
            log_level: LevelFilter::Info,
        }
    }
}

impl CoreConfig {
    /// The directory subprocesses should use for temporary files.
    #[must_use]
    pub fn effective_temp_dir(&self) -> &Path {
        self.temp_dir.as_deref().unwrap_or(&self.log_dir)
    }

    /// Overlays values present in a parsed configuration file.
    pub fn apply_file(&mut self, file: &ConfigFile) -> CoreResult<()> {
        if let Some(dir) = &file.input_dir {
            self.input_dir = dir.clone();
        }
        if let Some(dir) = &file.output_dir {
            self.output_dir = dir.clone();
        }
        if let Some(dir) = &file.log_dir {
            self.log_dir = dir.clone();
        }
        if let Some(dir) = &file.temp_dir {
            self.temp_dir = Some(dir.clone());
        }
        if let Some(jobs) = file.max_concurrent_encodes {
            self.max_concurrent_encodes = jobs;
        }
        if let Some(path) = &file.ffmpeg_path {
            self.ffmpeg_path = path.clone();
        }
        if let Some(path) = &file.ffprobe_path {
            self.ffprobe_path = path.clone();
        }
        if let Some(codec) = &file.video_codec {
            self.video_codec = codec.clone();
        }
        if let Some(codec) = &file.audio_codec {
            self.audio_codec = codec.clone();
        }
        if let Some(level) = &file.log_level {
            self.log_level = LevelFilter::from_str(level)
                .map_err(|_| CoreError::Config(format!("unknown log level '{}'", level)))?;
        }
        Ok(())
    }

    /// Overlays BITSHRINK_* variables resolved through `lookup`.
    ///
    /// `lookup` is normally [`utils::process_env`]; tests pass a map so the
    /// process environment is never mutated. A job count that does not parse
    /// is ignored and the lower layer is kept.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = utils::env_path(&lookup, ENV_INPUT_DIR) {
            self.input_dir = dir;
        }
        if let Some(dir) = utils::env_path(&lookup, ENV_OUTPUT_DIR) {
            self.output_dir = dir;
        }
        if let Some(dir) = utils::env_path(&lookup, ENV_LOG_DIR) {
            self.log_dir = dir;
        }
        if let Some(dir) = utils::env_path(&lookup, ENV_TEMP_DIR) {
            self.temp_dir = Some(dir);
        }
        if let Some(jobs) = utils::env_usize(&lookup, ENV_JOBS) {
            self.max_concurrent_encodes = jobs;
        }
        if let Some(path) = utils::env_string(&lookup, ENV_FFMPEG) {
            self.ffmpeg_path = path;
        }
        if let Some(path) = utils::env_string(&lookup, ENV_FFPROBE) {
            self.ffprobe_path = path;
        }
    }

    /// Rejects configurations the batch cannot run with.
    pub fn validate(&self) -> CoreResult<()> {
        if self.max_concurrent_encodes == 0 {
            return Err(CoreError::Config(
                "max_concurrent_encodes must be at least 1".to_string(),
            ));
        }

        let named = [
            ("ffmpeg_path", &self.ffmpeg_path),
            ("ffprobe_path", &self.ffprobe_path),
            ("video_codec", &self.video_codec),
            ("audio_codec", &self.audio_codec),
        ];
        for (field, value) in named {
            if value.trim().is_empty() {
                return Err(CoreError::Config(format!("{} must not be empty", field)));
            }
        }

        Ok(())
    }
}
