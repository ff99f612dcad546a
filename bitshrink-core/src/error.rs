// ============================================================================
// bitshrink-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Error types for the bitshrink core library
//
// File-scoped errors (probe and encode failures) are caught by the encode
// adapter and turned into `Failed` outcomes. Discovery, configuration and
// dependency errors are fatal and abort the run before any encode starts.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors produced by the bitshrink core library.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Cannot read input tree: {0}")]
    Discovery(#[from] walkdir::Error),

    #[error("Path error: {0}")]
    PathError(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Required external command '{0}' not found")]
    DependencyNotFound(String),

    #[error("Failed to start '{0}': {1}")]
    CommandStart(String, #[source] io::Error),

    #[error("Probe failed for {}: {}", .path.display(), .message)]
    Probe { path: PathBuf, message: String },

    #[error("Encode failed for {}: {}", .path.display(), .message)]
    Encode { path: PathBuf, message: String },

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result type for bitshrink core operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

// ---- Helper constructors ----

pub(crate) fn probe_error(path: &Path, message: impl Into<String>) -> CoreError {
    CoreError::Probe {
        path: path.to_path_buf(),
        message: message.into(),
    }
}

pub(crate) fn encode_error(path: &Path, message: impl Into<String>) -> CoreError {
    CoreError::Encode {
        path: path.to_path_buf(),
        message: message.into(),
    }
}

/// Maps a spawn failure to either `DependencyNotFound` or `CommandStart`.
pub(crate) fn command_start_error(cmd_name: &str, e: io::Error) -> CoreError {
    if e.kind() == io::ErrorKind::NotFound {
        CoreError::DependencyNotFound(cmd_name.to_string())
    } else {
        CoreError::CommandStart(cmd_name.to_string(), e)
    }
}

impl CoreError {
    /// Whether this error only affects a single file.
    #[must_use]
    pub fn is_file_scoped(&self) -> bool {
        matches!(self, CoreError::Probe { .. } | CoreError::Encode { .. })
    }
}
