//! Run log setup: one log file per run plus an optional stderr mirror.

mod setup;

pub use setup::{LOG_PATTERN, build_logging_config, setup_file_logging};
