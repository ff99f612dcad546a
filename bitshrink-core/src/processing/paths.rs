// bitshrink-core/src/processing/paths.rs
//
// Output path mirroring: the path relative to the input root is re-rooted
// under the output root, file name and extension unchanged. Distinct inputs
// under the same root always map to distinct outputs.

use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};

/// Computes the mirrored output path for `input_path`.
///
/// # Arguments
///
/// * `input_root` - Root the input file was discovered under
/// * `output_root` - Root of the output tree
/// * `input_path` - File under `input_root`
///
/// # Returns
///
/// * `Ok(PathBuf)` - `output_root` joined with the relative subpath
/// * `Err(CoreError::PathError)` - If `input_path` is not strictly below
///   `input_root`
pub fn mirrored_output_path(
    input_root: &Path,
    output_root: &Path,
    input_path: &Path,
) -> CoreResult<PathBuf> {
    let relative = input_path.strip_prefix(input_root).map_err(|_| {
        CoreError::PathError(format!(
            "{} is not under input root {}",
            input_path.display(),
            input_root.display()
        ))
    })?;

    if relative.as_os_str().is_empty() {
        return Err(CoreError::PathError(format!(
            "{} is the input root itself",
            input_path.display()
        )));
    }

    Ok(output_root.join(relative))
}
