// bitshrink-cli/src/lib.rs
//
// Library portion of the bitshrink CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod logging;

// Re-export items needed by the binary or integration tests
pub use cli::{Cli, Commands, EncodeArgs};
pub use commands::encode::{RunStatus, resolve_config, run_encode};
