// ============================================================================
// bitshrink-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with ffprobe and ffmpeg
//
// Both tools are invoked as subprocesses built from argument lists, never
// shell strings. Each tool sits behind a trait (FfprobeExecutor,
// FfmpegSpawner) so the encode adapter and the batch coordinator can be
// exercised with injected fakes.
//
// KEY COMPONENTS:
// - ToolEnv: TMP/TEMP environment applied to every subprocess
// - run_command: run a command to completion, capturing output
// - check_dependency: start-up availability check
// - Submodules with the concrete ffprobe/ffmpeg implementations

// ---- Internal crate imports ----
use crate::error::{CoreResult, command_start_error};

// ---- Standard library imports ----
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

// ============================================================================
// SUBMODULES
// ============================================================================

/// ffmpeg argument building and encode parameters
pub mod ffmpeg;

/// Trait and implementation for running ffmpeg encodes
pub mod ffmpeg_executor;

/// Trait and implementation for running ffprobe queries
pub mod ffprobe_executor;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use ffmpeg::{EncodeParams, build_encode_args};
pub use ffmpeg_executor::{CommandFfmpegSpawner, FfmpegSpawner};
pub use ffprobe_executor::{CommandFfprobeExecutor, FfprobeExecutor, MediaMetrics};

// ============================================================================
// SUBPROCESS ENVIRONMENT
// ============================================================================

/// Environment variables that redirect a subprocess's temporary files.
pub const TEMP_DIR_VARS: [&str; 2] = ["TMP", "TEMP"];

/// Subprocess environment shared by every tool invocation of a run.
///
/// The directory is created by [`crate::RunContext::prepare`] before the
/// first subprocess is started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolEnv {
    temp_dir: PathBuf,
}

impl ToolEnv {
    pub fn new(temp_dir: impl Into<PathBuf>) -> Self {
        Self {
            temp_dir: temp_dir.into(),
        }
    }

    pub fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }

    /// Sets TMP and TEMP on `cmd`.
    pub fn apply<'c>(&self, cmd: &'c mut Command) -> &'c mut Command {
        for var in TEMP_DIR_VARS {
            cmd.env(var, &self.temp_dir);
        }
        cmd
    }
}

// ============================================================================
// COMMAND EXECUTION
// ============================================================================

/// Renders a command as a single line for logging.
pub fn describe_command(cmd: &Command) -> String {
    let mut line = cmd.get_program().to_string_lossy().into_owned();
    for arg in cmd.get_args() {
        line.push(' ');
        line.push_str(&arg.to_string_lossy());
    }
    line
}

/// Runs `cmd` to completion and returns its captured output.
///
/// Only a failure to start the process is an error here; the exit status is
/// left for the caller to interpret.
pub fn run_command(cmd: &mut Command, name: &str) -> CoreResult<Output> {
    log::debug!("Running: {}", describe_command(cmd));

    let output = cmd
        .stdin(Stdio::null())
        .output()
        .map_err(|e| {
            log::error!("Failed to start '{}': {}", name, e);
            command_start_error(name, e)
        })?;

    if !output.status.success() {
        log::debug!(
            "'{}' exited with code {}",
            name,
            output.status.code().unwrap_or(-1)
        );
    }

    Ok(output)
}

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Checks that an external command can be started.
///
/// Runs `<cmd_name> -version` with all output discarded. Only the ability
/// to spawn the program matters; the exit status is ignored.
///
/// # Returns
///
/// * `Ok(())` - If the command could be started
/// * `Err(CoreError::DependencyNotFound)` - If the command is not found
/// * `Err(CoreError::CommandStart)` - If the command exists but fails to start
pub fn check_dependency(cmd_name: &str, env: &ToolEnv) -> CoreResult<()> {
    let mut cmd = Command::new(cmd_name);
    cmd.arg("-version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    env.apply(&mut cmd);

    match cmd.status() {
        Ok(_) => {
            log::debug!("Found dependency: {}", cmd_name);
            Ok(())
        }
        Err(e) => {
            log::error!("Dependency check for '{}' failed: {}", cmd_name, e);
            Err(command_start_error(cmd_name, e))
        }
    }
}
