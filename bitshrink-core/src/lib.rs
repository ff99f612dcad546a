//! Core library for batch-transcoding a directory tree of videos to a lower
//! bit rate with ffmpeg.
//!
//! Each discovered file is probed with ffprobe, given a target bit rate of
//! 40% of its source bit rate (capped per resolution tier), and encoded into
//! a mirrored output tree. Files whose output already exists are skipped.
//! Several encodes run concurrently; a failing file never stops the batch.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use bitshrink_core::{CoreConfig, RunContext, find_processable_files, process_videos};
//! use std::path::PathBuf;
//!
//! let config = CoreConfig {
//!     input_dir: PathBuf::from("/path/to/input"),
//!     output_dir: PathBuf::from("/path/to/output"),
//!     log_dir: PathBuf::from("/path/to/logs"),
//!     ..Default::default()
//! };
//!
//! let ctx = RunContext::new(config)?;
//! ctx.prepare()?;
//!
//! let files = find_processable_files(ctx.input_root())?;
//! if !files.is_empty() {
//!     ctx.check_dependencies()?;
//!     let report = process_videos(&ctx, &files)?;
//!     report.log_summary();
//! }
//! # Ok::<(), bitshrink_core::CoreError>(())
//! ```

pub mod config;
pub mod context;
pub mod discovery;
pub mod error;
pub mod external;
pub mod file_logging;
pub mod processing;
pub mod reporting;
pub mod utils;

// Re-exports for public API
pub use config::{ConfigFile, CoreConfig, CoreConfigBuilder};
pub use context::RunContext;
pub use discovery::find_processable_files;
pub use error::{CoreError, CoreResult};
pub use external::{FfmpegSpawner, FfprobeExecutor, MediaMetrics};
pub use file_logging::setup_file_logging;
pub use processing::{
    BatchCoordinator, FileTranscoder, TranscodeOutcome, VideoTranscoder, process_videos,
    target_bitrate,
};
pub use reporting::{BatchReport, FileReport};
pub use utils::{format_bitrate, format_bytes, format_duration};
