// ============================================================================
// bitshrink-core/src/context.rs
// ============================================================================
//
// RUN CONTEXT: Everything fixed at start-up for one transcoding run
//
// Built once from a validated CoreConfig and passed by reference to every
// component. Holds the run timestamp, resolved directories, the log file
// path, the subprocess environment and, once installed, the logger handle.

// ---- Standard library imports ----
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ---- External crate imports ----
use chrono::{DateTime, Local};

// ---- Internal crate imports ----
use crate::config::CoreConfig;
use crate::error::CoreResult;
use crate::external::{CommandFfmpegSpawner, CommandFfprobeExecutor, ToolEnv, check_dependency};

/// strftime format of the run timestamp (14 digits).
pub const RUN_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Formats `now` as a run timestamp, e.g. `20240131235959`.
#[must_use]
pub fn run_timestamp(now: DateTime<Local>) -> String {
    now.format(RUN_TIMESTAMP_FORMAT).to_string()
}

/// File name of the log for the run started at `timestamp`.
#[must_use]
pub fn log_file_name(timestamp: &str) -> String {
    format!("transcoding_{}.log", timestamp)
}

/// Start-up state shared by every component of a run.
pub struct RunContext {
    config: CoreConfig,
    input_root: PathBuf,
    output_root: PathBuf,
    timestamp: String,
    log_file: PathBuf,
    tool_env: ToolEnv,
    log_handle: Option<log4rs::Handle>,
}

impl RunContext {
    /// Validates `config` and captures the current local time as the run
    /// timestamp.
    pub fn new(config: CoreConfig) -> CoreResult<Self> {
        Self::with_timestamp(config, run_timestamp(Local::now()))
    }

    /// Like [`RunContext::new`] with an explicit timestamp.
    pub fn with_timestamp(config: CoreConfig, timestamp: String) -> CoreResult<Self> {
        config.validate()?;

        let input_root = std::path::absolute(&config.input_dir)?;
        let output_root = std::path::absolute(&config.output_dir)?;
        let log_file = config.log_dir.join(log_file_name(&timestamp));
        let tool_env = ToolEnv::new(config.effective_temp_dir());

        Ok(Self {
            config,
            input_root,
            output_root,
            timestamp,
            log_file,
            tool_env,
            log_handle: None,
        })
    }

    /// Creates the output, log and temporary directories.
    ///
    /// Must run before the first subprocess so TMP/TEMP point at an existing
    /// directory.
    pub fn prepare(&self) -> CoreResult<()> {
        for dir in [
            self.output_root(),
            self.log_dir(),
            self.tool_env.temp_dir(),
        ] {
            fs::create_dir_all(dir)?;
        }
        log::debug!(
            "Prepared output {}, log {}, temp {}",
            self.output_root().display(),
            self.log_dir().display(),
            self.tool_env.temp_dir().display()
        );
        Ok(())
    }

    /// Checks that the configured ffprobe and ffmpeg programs can be started.
    pub fn check_dependencies(&self) -> CoreResult<()> {
        check_dependency(&self.config.ffprobe_path, &self.tool_env)?;
        check_dependency(&self.config.ffmpeg_path, &self.tool_env)?;
        log::info!("External dependency check passed.");
        Ok(())
    }

    /// ffprobe adapter configured for this run.
    pub fn ffprobe_executor(&self) -> CommandFfprobeExecutor {
        CommandFfprobeExecutor::new(self.config.ffprobe_path.clone(), self.tool_env.clone())
    }

    /// ffmpeg adapter configured for this run.
    pub fn ffmpeg_spawner(&self) -> CommandFfmpegSpawner {
        CommandFfmpegSpawner::new(self.config.ffmpeg_path.clone(), self.tool_env.clone())
    }

    pub fn set_log_handle(&mut self, handle: log4rs::Handle) {
        self.log_handle = Some(handle);
    }

    pub fn log_handle(&self) -> Option<&log4rs::Handle> {
        self.log_handle.as_ref()
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// Absolute input root.
    pub fn input_root(&self) -> &Path {
        &self.input_root
    }

    /// Absolute output root.
    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    pub fn log_dir(&self) -> &Path {
        &self.config.log_dir
    }

    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn tool_env(&self) -> &ToolEnv {
        &self.tool_env
    }

    pub fn max_concurrent_encodes(&self) -> usize {
        self.config.max_concurrent_encodes
    }
}

impl fmt::Debug for RunContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunContext")
            .field("config", &self.config)
            .field("input_root", &self.input_root)
            .field("output_root", &self.output_root)
            .field("timestamp", &self.timestamp)
            .field("log_file", &self.log_file)
            .field("tool_env", &self.tool_env)
            .field("logger_installed", &self.log_handle.is_some())
            .finish()
    }
}
