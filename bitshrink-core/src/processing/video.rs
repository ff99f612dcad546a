// ============================================================================
// bitshrink-core/src/processing/video.rs
// ============================================================================
//
// VIDEO PROCESSING: Transcoding a single file
//
// WORKFLOW:
// 1. Compute the mirrored output path
// 2. Skip if the output already exists (no subprocess is started)
// 3. Create missing output directories
// 4. Probe bit rate and dimensions
// 5. Select the target bit rate
// 6. Run the encode
//
// Every terminal outcome is logged exactly once: info for success and skip,
// error for failure. A failed encode leaves its partial output in place, so
// the next run skips that file until the partial output is removed by hand.

// ---- Internal crate imports ----
use crate::context::RunContext;
use crate::error::CoreResult;
use crate::external::{EncodeParams, FfmpegSpawner, FfprobeExecutor};
use crate::processing::bitrate::{ResolutionTier, target_bitrate};
use crate::processing::paths::mirrored_output_path;
use crate::utils::{format_bitrate, format_duration};

// ---- External crate imports ----
use log::{debug, error, info};

// ---- Standard library imports ----
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

// ============================================================================
// OUTCOMES
// ============================================================================

/// Details of a successful encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeSummary {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// Source container bit rate, bits per second
    pub source_bitrate: u64,
    /// Requested video bit rate, bits per second
    pub target_bitrate: u64,
    pub tier: ResolutionTier,
    pub duration: Duration,
    /// Zero when the size could not be read
    pub input_size: u64,
    /// Zero when the size could not be read
    pub output_size: u64,
}

/// Result of processing one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscodeOutcome {
    Success(EncodeSummary),
    /// The output already existed; nothing was run.
    Skipped { output_path: PathBuf },
    /// Error text of the failed step.
    Failed(String),
}

impl TranscodeOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, TranscodeOutcome::Success(_))
    }

    #[must_use]
    pub fn is_skipped(&self) -> bool {
        matches!(self, TranscodeOutcome::Skipped { .. })
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, TranscodeOutcome::Failed(_))
    }

    /// The failure message, if this outcome is a failure.
    #[must_use]
    pub fn failure(&self) -> Option<&str> {
        match self {
            TranscodeOutcome::Failed(message) => Some(message),
            _ => None,
        }
    }
}

// ============================================================================
// TRANSCODER
// ============================================================================

/// Processes one file to a terminal outcome.
///
/// This is the seam between the batch coordinator and the encode adapter;
/// implementations must never panic on bad input and must be usable from
/// several worker threads at once.
pub trait FileTranscoder: Send + Sync {
    fn transcode(&self, input_path: &Path) -> TranscodeOutcome;
}

/// The encode adapter: probes, selects a bit rate and encodes one file.
pub struct VideoTranscoder<'a, P: FfprobeExecutor, S: FfmpegSpawner> {
    ctx: &'a RunContext,
    ffprobe: P,
    ffmpeg: S,
}

impl<'a, P: FfprobeExecutor, S: FfmpegSpawner> VideoTranscoder<'a, P, S> {
    pub fn new(ctx: &'a RunContext, ffprobe: P, ffmpeg: S) -> Self {
        Self {
            ctx,
            ffprobe,
            ffmpeg,
        }
    }

    /// Output path `input_path` is encoded to.
    pub fn output_path_for(&self, input_path: &Path) -> CoreResult<PathBuf> {
        mirrored_output_path(self.ctx.input_root(), self.ctx.output_root(), input_path)
    }

    fn run(&self, input_path: &Path) -> CoreResult<TranscodeOutcome> {
        let output_path = self.output_path_for(input_path)?;

        if output_path.exists() {
            return Ok(TranscodeOutcome::Skipped { output_path });
        }

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let metrics = self.ffprobe.probe_metrics(input_path)?;
        let target = target_bitrate(metrics.bitrate, metrics.width, metrics.height);
        let tier = ResolutionTier::from_short_side(metrics.short_side());
        debug!(
            "{}: {}x{} ({}), source {}, target {}",
            input_path.display(),
            metrics.width,
            metrics.height,
            tier,
            format_bitrate(metrics.bitrate),
            format_bitrate(target)
        );

        let config = self.ctx.config();
        let params = EncodeParams {
            input_path: input_path.to_path_buf(),
            output_path: output_path.clone(),
            video_codec: config.video_codec.clone(),
            audio_codec: config.audio_codec.clone(),
            target_bitrate: target,
        };

        let start = Instant::now();
        self.ffmpeg.encode(&params)?;

        Ok(TranscodeOutcome::Success(EncodeSummary {
            input_path: input_path.to_path_buf(),
            output_size: file_size(&output_path),
            output_path,
            source_bitrate: metrics.bitrate,
            target_bitrate: target,
            tier,
            duration: start.elapsed(),
            input_size: file_size(input_path),
        }))
    }
}

impl<P: FfprobeExecutor, S: FfmpegSpawner> FileTranscoder for VideoTranscoder<'_, P, S> {
    fn transcode(&self, input_path: &Path) -> TranscodeOutcome {
        let outcome = match self.run(input_path) {
            Ok(outcome) => outcome,
            Err(e) => TranscodeOutcome::Failed(e.to_string()),
        };

        match &outcome {
            TranscodeOutcome::Success(summary) => info!(
                "Successfully compressed {} from {} to {} in {}. New file: {}",
                input_path.display(),
                summary.source_bitrate,
                summary.target_bitrate,
                format_duration(summary.duration),
                summary.output_path.display()
            ),
            TranscodeOutcome::Skipped { output_path } => info!(
                "Output {} already exists, skipping {}",
                output_path.display(),
                input_path.display()
            ),
            TranscodeOutcome::Failed(message) => error!(
                "Failed to compress {}. Error: {}",
                input_path.display(),
                message
            ),
        }

        outcome
    }
}

fn file_size(path: &Path) -> u64 {
    fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}
