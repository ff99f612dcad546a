//! File discovery module for finding video files to process.
//!
//! Walks the input tree recursively and keeps regular files whose extension
//! is in [`VIDEO_EXTENSIONS`]. The match is case-sensitive: `a.MP4` is not
//! picked up.

use crate::error::CoreResult;

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Extensions of files that are transcoded.
pub const VIDEO_EXTENSIONS: [&str; 7] = ["mp4", "mkv", "ts", "avi", "rm", "rmvb", "wmv"];

/// Whether `path` has one of the [`VIDEO_EXTENSIONS`].
#[must_use]
pub fn has_video_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| VIDEO_EXTENSIONS.contains(&ext))
}

/// Finds video files eligible for processing under the specified directory.
///
/// Subdirectories are searched recursively. Entries are visited in file name
/// order within each directory, so the result is the same on every run over
/// an unchanged tree.
///
/// # Arguments
///
/// * `input_dir` - The root of the tree to search
///
/// # Returns
///
/// * `Ok(Vec<PathBuf>)` - Paths of the discovered files, possibly empty
/// * `Err(CoreError::Discovery)` - If the root or any directory below it
///   cannot be read
///
/// # Examples
///
/// ```rust,no_run
/// use bitshrink_core::find_processable_files;
/// use std::path::Path;
///
/// let input_dir = Path::new("/path/to/videos");
/// match find_processable_files(input_dir) {
///     Ok(files) => {
///         println!("Found {} video files:", files.len());
///         for file in files {
///             println!("  {}", file.display());
///         }
///     },
///     Err(e) => println!("Error finding video files: {}", e),
/// }
/// ```
pub fn find_processable_files(input_dir: &Path) -> CoreResult<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(input_dir).sort_by_file_name() {
        let entry = entry?;
        // Symlinked files count; symlinked directories are not descended.
        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if is_file && has_video_extension(entry.path()) {
            files.push(entry.into_path());
        }
    }

    log::debug!(
        "Discovered {} video file(s) under {}",
        files.len(),
        input_dir.display()
    );
    Ok(files)
}
