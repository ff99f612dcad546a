// ============================================================================
// bitshrink-core/src/processing/mod.rs
// ============================================================================
//
// PROCESSING: Bitrate policy, path mirroring, per-file transcoding and batch
// coordination.

pub mod batch;
pub mod bitrate;
pub mod paths;
pub mod video;

pub use batch::BatchCoordinator;
pub use bitrate::{ResolutionTier, bitrate_ceiling, target_bitrate};
pub use paths::mirrored_output_path;
pub use video::{EncodeSummary, FileTranscoder, TranscodeOutcome, VideoTranscoder};

use std::path::PathBuf;

use crate::context::RunContext;
use crate::error::CoreResult;
use crate::reporting::BatchReport;

/// Transcodes `files` with the real ffprobe/ffmpeg adapters of `ctx`.
///
/// The context must have been prepared so the output and temporary
/// directories exist.
pub fn process_videos(ctx: &RunContext, files: &[PathBuf]) -> CoreResult<BatchReport> {
    let transcoder = VideoTranscoder::new(ctx, ctx.ffprobe_executor(), ctx.ffmpeg_spawner());
    BatchCoordinator::new(ctx.max_concurrent_encodes())?.run(&transcoder, files)
}
