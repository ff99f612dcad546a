// ============================================================================
// bitshrink-core/src/external/ffprobe_executor.rs
// ============================================================================
//
// FFPROBE EXECUTION: Bitrate and dimension queries
//
// Two separate plain-text queries are issued per file: the container bit
// rate, then the width/height of the first video stream. Output parsing is
// kept in free functions so it can be tested without a subprocess.

use std::path::Path;
use std::process::Command;

use crate::error::{CoreResult, probe_error};
use crate::external::{ToolEnv, run_command};

/// Bitrate and frame size of one input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaMetrics {
    /// Container bit rate in bits per second
    pub bitrate: u64,
    pub width: u32,
    pub height: u32,
}

impl MediaMetrics {
    /// The smaller of width and height.
    #[must_use]
    pub fn short_side(&self) -> u32 {
        self.width.min(self.height)
    }
}

/// Trait for querying media properties of an input file.
///
/// Implementations must be shareable across worker threads.
pub trait FfprobeExecutor: Send + Sync {
    /// Container bit rate in bits per second.
    fn probe_bitrate(&self, input_path: &Path) -> CoreResult<u64>;

    /// `(width, height)` of the first video stream.
    fn probe_dimensions(&self, input_path: &Path) -> CoreResult<(u32, u32)>;

    /// Runs both queries and combines their results.
    fn probe_metrics(&self, input_path: &Path) -> CoreResult<MediaMetrics> {
        let bitrate = self.probe_bitrate(input_path)?;
        let (width, height) = self.probe_dimensions(input_path)?;
        Ok(MediaMetrics {
            bitrate,
            width,
            height,
        })
    }
}

/// Arguments of the container bit rate query, excluding the input path.
pub const BITRATE_QUERY_ARGS: [&str; 6] = [
    "-v",
    "error",
    "-show_entries",
    "format=bit_rate",
    "-of",
    "default=noprint_wrappers=1:nokey=1",
];

/// Arguments of the video stream dimension query, excluding the input path.
pub const DIMENSIONS_QUERY_ARGS: [&str; 8] = [
    "-v",
    "error",
    "-select_streams",
    "v:0",
    "-show_entries",
    "stream=width,height",
    "-of",
    "csv=p=0",
];

/// FfprobeExecutor running the real `ffprobe` binary.
#[derive(Debug, Clone)]
pub struct CommandFfprobeExecutor {
    program: String,
    env: ToolEnv,
}

impl CommandFfprobeExecutor {
    pub fn new(program: impl Into<String>, env: ToolEnv) -> Self {
        Self {
            program: program.into(),
            env,
        }
    }

    fn query(&self, input_path: &Path, args: &[&str]) -> CoreResult<String> {
        let mut cmd = Command::new(&self.program);
        cmd.args(args).arg(input_path);
        self.env.apply(&mut cmd);

        let output = run_command(&mut cmd, &self.program)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(probe_error(
                input_path,
                format!(
                    "{} exited with {}: {}",
                    self.program,
                    output.status,
                    stderr.trim()
                ),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl FfprobeExecutor for CommandFfprobeExecutor {
    fn probe_bitrate(&self, input_path: &Path) -> CoreResult<u64> {
        log::debug!("Probing bit rate of {}", input_path.display());
        let stdout = self.query(input_path, &BITRATE_QUERY_ARGS)?;
        parse_bitrate(&stdout).map_err(|msg| probe_error(input_path, msg))
    }

    fn probe_dimensions(&self, input_path: &Path) -> CoreResult<(u32, u32)> {
        log::debug!("Probing dimensions of {}", input_path.display());
        let stdout = self.query(input_path, &DIMENSIONS_QUERY_ARGS)?;
        parse_dimensions(&stdout).map_err(|msg| probe_error(input_path, msg))
    }
}

// ============================================================================
// OUTPUT PARSING
// ============================================================================

fn first_line(stdout: &str) -> Option<&str> {
    stdout.lines().map(str::trim).find(|line| !line.is_empty())
}

/// Parses the bit rate query output: one positive decimal integer.
pub fn parse_bitrate(stdout: &str) -> Result<u64, String> {
    let line = first_line(stdout).ok_or_else(|| "ffprobe printed no bit rate".to_string())?;
    if line == "N/A" {
        return Err("container bit rate is not available".to_string());
    }
    match line.parse::<u64>() {
        Ok(0) => Err("container bit rate is zero".to_string()),
        Ok(bitrate) => Ok(bitrate),
        Err(_) => Err(format!("unparsable bit rate '{}'", line)),
    }
}

/// Parses the dimension query output: `width,height`.
///
/// Empty output means the file has no video stream.
pub fn parse_dimensions(stdout: &str) -> Result<(u32, u32), String> {
    let line = first_line(stdout).ok_or_else(|| "no video stream found".to_string())?;

    let mut fields = line.split(',').map(str::trim).filter(|f| !f.is_empty());
    let (Some(w), Some(h)) = (fields.next(), fields.next()) else {
        return Err(format!("unparsable dimensions '{}'", line));
    };

    let parse = |value: &str| -> Result<u32, String> {
        match value.parse::<u32>() {
            Ok(0) | Err(_) => Err(format!("unparsable dimensions '{}'", line)),
            Ok(v) => Ok(v),
        }
    };
    Ok((parse(w)?, parse(h)?))
}
