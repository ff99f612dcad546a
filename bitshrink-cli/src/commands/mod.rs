//! Command implementations for the CLI.

/// The `encode` command: discover, transcode and summarise a batch.
pub mod encode;
