// ============================================================================
// bitshrink-core/src/processing/batch.rs
// ============================================================================
//
// BATCH COORDINATION: Bounded concurrent processing of the discovered files
//
// A dedicated rayon pool of N threads runs the transcoder over the file list.
// Each file is its own task, so at most N files are in flight and an idle
// worker always picks up the next unprocessed file. Outcomes are collected
// in input order once every file has finished. A panicking transcoder is
// turned into a Failed outcome for that file only.

// ---- External crate imports ----
use log::info;
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;

// ---- Standard library imports ----
use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::{Path, PathBuf};
use std::time::Instant;

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult};
use crate::processing::video::{FileTranscoder, TranscodeOutcome};
use crate::reporting::{BatchReport, FileReport};

/// Runs a transcoder over many files with a fixed concurrency limit.
///
/// # Examples
///
/// ```rust,no_run
/// use bitshrink_core::processing::batch::BatchCoordinator;
/// use bitshrink_core::processing::video::{FileTranscoder, TranscodeOutcome};
/// use std::path::{Path, PathBuf};
///
/// struct AlwaysSkip;
///
/// impl FileTranscoder for AlwaysSkip {
///     fn transcode(&self, input_path: &Path) -> TranscodeOutcome {
///         TranscodeOutcome::Skipped { output_path: input_path.to_path_buf() }
///     }
/// }
///
/// let coordinator = BatchCoordinator::new(3)?;
/// let report = coordinator.run(&AlwaysSkip, &[PathBuf::from("a.mp4")])?;
/// assert_eq!(report.skipped(), 1);
/// # Ok::<(), bitshrink_core::CoreError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchCoordinator {
    max_concurrent: usize,
}

impl BatchCoordinator {
    /// Creates a coordinator running at most `max_concurrent` files at once.
    ///
    /// # Returns
    ///
    /// * `Err(CoreError::Config)` - If `max_concurrent` is zero
    pub fn new(max_concurrent: usize) -> CoreResult<Self> {
        if max_concurrent == 0 {
            return Err(CoreError::Config(
                "concurrency limit must be at least 1".to_string(),
            ));
        }
        Ok(Self { max_concurrent })
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Processes every file exactly once and returns the outcomes in input
    /// order. Only a failure to build the worker pool is an error; per-file
    /// failures are recorded in the report.
    pub fn run<T>(&self, transcoder: &T, files: &[PathBuf]) -> CoreResult<BatchReport>
    where
        T: FileTranscoder + ?Sized,
    {
        let start = Instant::now();
        info!(
            "Processing {} file(s) with up to {} concurrent encode(s)",
            files.len(),
            self.max_concurrent
        );

        let pool = ThreadPoolBuilder::new()
            .num_threads(self.max_concurrent)
            .thread_name(|index| format!("bitshrink-worker-{}", index))
            .build()?;

        let entries: Vec<FileReport> = pool.install(|| {
            files
                .par_iter()
                .with_max_len(1)
                .map(|input_path| FileReport {
                    input_path: input_path.clone(),
                    outcome: transcode_isolated(transcoder, input_path),
                })
                .collect()
        });

        Ok(BatchReport::new(entries, start.elapsed()))
    }
}

fn transcode_isolated<T>(transcoder: &T, input_path: &Path) -> TranscodeOutcome
where
    T: FileTranscoder + ?Sized,
{
    match catch_unwind(AssertUnwindSafe(|| transcoder.transcode(input_path))) {
        Ok(outcome) => outcome,
        Err(payload) => {
            let message = format!("transcoder panicked: {}", panic_message(payload.as_ref()));
            log::error!("Failed to compress {}. Error: {}", input_path.display(), message);
            TranscodeOutcome::Failed(message)
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
