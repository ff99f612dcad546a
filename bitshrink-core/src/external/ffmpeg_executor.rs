// ============================================================================
// bitshrink-core/src/external/ffmpeg_executor.rs
// ============================================================================
//
// FFMPEG EXECUTION: Running a single encode
//
// ffmpeg writes its progress and diagnostics to stderr. The stream is read
// while the encode runs and only the last lines are kept for the failure
// message. Carriage-return progress updates count as separate lines.

// ---- Standard library imports ----
use std::collections::VecDeque;
use std::io::{BufRead, BufReader};
use std::process::{Command, Stdio};

// ---- Internal crate imports ----
use crate::error::{CoreResult, command_start_error, encode_error};
use crate::external::ffmpeg::{EncodeParams, build_encode_args};
use crate::external::{ToolEnv, describe_command};

/// Number of trailing stderr lines kept for failure messages.
pub const STDERR_TAIL_LINES: usize = 20;

/// Trait for running an encode to completion.
pub trait FfmpegSpawner: Send + Sync {
    /// Blocks until the encoder exits. A non-zero exit is an
    /// [`crate::CoreError::Encode`] carrying the encoder's error text.
    fn encode(&self, params: &EncodeParams) -> CoreResult<()>;
}

/// FfmpegSpawner running the real `ffmpeg` binary.
#[derive(Debug, Clone)]
pub struct CommandFfmpegSpawner {
    program: String,
    env: ToolEnv,
}

impl CommandFfmpegSpawner {
    pub fn new(program: impl Into<String>, env: ToolEnv) -> Self {
        Self {
            program: program.into(),
            env,
        }
    }
}

impl FfmpegSpawner for CommandFfmpegSpawner {
    fn encode(&self, params: &EncodeParams) -> CoreResult<()> {
        let mut cmd = Command::new(&self.program);
        cmd.args(build_encode_args(params))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        self.env.apply(&mut cmd);

        log::debug!("Running: {}", describe_command(&cmd));

        let mut child = cmd.spawn().map_err(|e| {
            log::error!("Failed to start '{}': {}", self.program, e);
            command_start_error(&self.program, e)
        })?;

        let mut tail = StderrTail::new(STDERR_TAIL_LINES);
        if let Some(stderr) = child.stderr.take() {
            let mut reader = BufReader::new(stderr);
            let mut chunk = Vec::new();
            loop {
                chunk.clear();
                // A read error only loses diagnostics; the exit status decides.
                match reader.read_until(b'\n', &mut chunk) {
                    Ok(0) | Err(_) => break,
                    Ok(_) => tail.push_chunk(&chunk),
                }
            }
        }

        let status = child.wait()?;
        if status.success() {
            return Ok(());
        }

        let detail = tail.into_text();
        log::debug!(
            "{} exited with {} for {}",
            self.program,
            status,
            params.input_path.display()
        );
        Err(encode_error(
            &params.input_path,
            if detail.is_empty() {
                format!("{} exited with {}", self.program, status)
            } else {
                format!("{} exited with {}: {}", self.program, status, detail)
            },
        ))
    }
}

// ============================================================================
// STDERR TAIL
// ============================================================================

/// Bounded buffer holding the last lines of a subprocess's stderr.
#[derive(Debug)]
pub struct StderrTail {
    lines: VecDeque<String>,
    capacity: usize,
}

impl StderrTail {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Adds raw stderr bytes; `\r` and `\n` both end a line.
    pub fn push_chunk(&mut self, chunk: &[u8]) {
        for piece in chunk.split(|b| *b == b'\n' || *b == b'\r') {
            let line = String::from_utf8_lossy(piece);
            let line = line.trim();
            if line.is_empty() || self.capacity == 0 {
                continue;
            }
            if self.lines.len() == self.capacity {
                self.lines.pop_front();
            }
            self.lines.push_back(line.to_string());
        }
    }

    /// The kept lines joined with newlines.
    pub fn into_text(self) -> String {
        Vec::from(self.lines).join("\n")
    }
}
