// ============================================================================
// bitshrink-cli/src/logging.rs
// ============================================================================
//
// LOGGING UTILITIES: Level selection and the run header
//
// The logger itself is log4rs, installed by bitshrink_core::setup_file_logging
// with the run's log file and an optional stderr mirror.

use bitshrink_core::RunContext;
use log::{LevelFilter, info};

/// `--verbose` raises the configured level to debug; it never lowers it.
pub fn effective_level(configured: LevelFilter, verbose: bool) -> LevelFilter {
    if verbose {
        configured.max(LevelFilter::Debug)
    } else {
        configured
    }
}

/// Logs where this run reads from and writes to.
pub fn log_run_header(ctx: &RunContext) {
    info!("========================================");
    info!("bitshrink run started: {}", ctx.timestamp());
    info!("Input directory: {}", ctx.input_root().display());
    info!("Output directory: {}", ctx.output_root().display());
    info!("Log file: {}", ctx.log_file().display());
    info!("Temporary directory: {}", ctx.tool_env().temp_dir().display());
    info!("Concurrent encodes: {}", ctx.max_concurrent_encodes());
    info!("========================================");
}
