// ============================================================================
// bitshrink-core/src/reporting.rs
// ============================================================================
//
// BATCH REPORTING: Aggregated outcomes of a run
//
// The report pairs every input file with its outcome, in input order. The
// end-of-run summary is a single pass over those pairs.

use std::path::PathBuf;
use std::time::Duration;

use log::{error, info};

use crate::processing::video::TranscodeOutcome;
use crate::utils::{calculate_size_reduction, format_bytes, format_duration};

/// One input file and what happened to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub input_path: PathBuf,
    pub outcome: TranscodeOutcome,
}

/// Outcomes of every file in a batch, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub entries: Vec<FileReport>,
    pub elapsed: Duration,
}

impl BatchReport {
    pub fn new(entries: Vec<FileReport>, elapsed: Duration) -> Self {
        Self { entries, elapsed }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn succeeded(&self) -> usize {
        self.entries.iter().filter(|e| e.outcome.is_success()).count()
    }

    pub fn skipped(&self) -> usize {
        self.entries.iter().filter(|e| e.outcome.is_skipped()).count()
    }

    pub fn failed(&self) -> usize {
        self.entries.iter().filter(|e| e.outcome.is_failed()).count()
    }

    pub fn has_failures(&self) -> bool {
        self.entries.iter().any(|e| e.outcome.is_failed())
    }

    /// Failed files and their error text, in input order.
    pub fn failures(&self) -> impl Iterator<Item = (&PathBuf, &str)> {
        self.entries
            .iter()
            .filter_map(|e| e.outcome.failure().map(|msg| (&e.input_path, msg)))
    }

    /// Input and output bytes summed over successful encodes.
    pub fn total_sizes(&self) -> (u64, u64) {
        self.entries
            .iter()
            .filter_map(|e| match &e.outcome {
                TranscodeOutcome::Success(summary) => Some((summary.input_size, summary.output_size)),
                _ => None,
            })
            .fold((0, 0), |(i, o), (si, so)| (i.saturating_add(si), o.saturating_add(so)))
    }

    /// Logs the end-of-run summary, including one record per failed file.
    pub fn log_summary(&self) {
        for (path, message) in self.failures() {
            error!("Skipping file {} due to error: {}", path.display(), message);
        }

        info!("========================================");
        info!(
            "Processed {} file(s): {} encoded, {} skipped, {} failed",
            self.len(),
            self.succeeded(),
            self.skipped(),
            self.failed()
        );

        let (input_total, output_total) = self.total_sizes();
        if self.succeeded() > 0 {
            info!(
                "Encoded size: {} -> {} (reduced by {}%)",
                format_bytes(input_total),
                format_bytes(output_total),
                calculate_size_reduction(input_total, output_total)
            );
        }
        info!("Total execution time: {}", format_duration(self.elapsed));
        info!("========================================");
    }
}
