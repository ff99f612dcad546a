// ============================================================================
// bitshrink-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for CoreConfig
//
// Starts from the built-in defaults and lets callers override individual
// fields. The CLI seeds the builder with the file/env layers and then applies
// its flags on top.

// ---- Standard library imports ----
use std::path::PathBuf;

// ---- External crate imports ----
use log::LevelFilter;

// ---- Internal crate imports ----
use super::CoreConfig;

/// Builder for creating CoreConfig instances.
///
/// # Examples
///
/// ```rust
/// use bitshrink_core::config::CoreConfigBuilder;
/// use std::path::PathBuf;
///
/// let config = CoreConfigBuilder::new()
///     .input_dir(PathBuf::from("/media/incoming"))
///     .output_dir(PathBuf::from("/media/shrunk"))
///     .max_concurrent_encodes(2)
///     .build();
///
/// assert_eq!(config.max_concurrent_encodes, 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CoreConfigBuilder {
    config: CoreConfig,
}

impl CoreConfigBuilder {
    /// Creates a builder holding the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder seeded with an existing configuration.
    #[must_use]
    pub fn from_config(config: CoreConfig) -> Self {
        Self { config }
    }

    /// Sets the input root directory.
    ///
    /// # Arguments
    ///
    /// * `input_dir` - Directory tree to discover input files in
    #[must_use]
    pub fn input_dir(mut self, input_dir: PathBuf) -> Self {
        self.config.input_dir = input_dir;
        self
    }

    /// Sets the output root directory.
    ///
    /// # Arguments
    ///
    /// * `output_dir` - Root of the mirrored output tree
    #[must_use]
    pub fn output_dir(mut self, output_dir: PathBuf) -> Self {
        self.config.output_dir = output_dir;
        self
    }

    /// Sets the log directory.
    #[must_use]
    pub fn log_dir(mut self, log_dir: PathBuf) -> Self {
        self.config.log_dir = log_dir;
        self
    }

    /// Sets the temporary directory passed to subprocesses.
    #[must_use]
    pub fn temp_dir(mut self, temp_dir: PathBuf) -> Self {
        self.config.temp_dir = Some(temp_dir);
        self
    }

    /// Sets the maximum number of concurrent encodes.
    ///
    /// # Arguments
    ///
    /// * `jobs` - Worker count; validated to be at least 1 by
    ///   [`CoreConfig::validate`]
    #[must_use]
    pub fn max_concurrent_encodes(mut self, jobs: usize) -> Self {
        self.config.max_concurrent_encodes = jobs;
        self
    }

    #[must_use]
    pub fn ffmpeg_path(mut self, path: impl Into<String>) -> Self {
        self.config.ffmpeg_path = path.into();
        self
    }

    #[must_use]
    pub fn ffprobe_path(mut self, path: impl Into<String>) -> Self {
        self.config.ffprobe_path = path.into();
        self
    }

    #[must_use]
    pub fn video_codec(mut self, codec: impl Into<String>) -> Self {
        self.config.video_codec = codec.into();
        self
    }

    #[must_use]
    pub fn audio_codec(mut self, codec: impl Into<String>) -> Self {
        self.config.audio_codec = codec.into();
        self
    }

    #[must_use]
    pub fn log_level(mut self, level: LevelFilter) -> Self {
        self.config.log_level = level;
        self
    }

    /// Returns the configuration. Call [`CoreConfig::validate`] before use.
    #[must_use]
    pub fn build(self) -> CoreConfig {
        self.config
    }
}
