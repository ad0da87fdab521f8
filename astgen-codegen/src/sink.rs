//! Output sink for generated headers.
//!
//! The artifact is written to a sibling temporary file and renamed into
//! place, so a failed run never leaves a truncated header behind.

use crate::error::CodegenError;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Writes a fully generated artifact to `dir/file_name`.
///
/// Creates `dir` if it does not exist.
///
/// # Arguments
/// * `dir` - Output directory
/// * `file_name` - Artifact file name, a single path component
/// * `contents` - Complete artifact text
///
/// # Returns
/// The path of the written artifact.
///
/// # Errors
/// Returns `CodegenError::Write` if the directory cannot be created or the
/// artifact cannot be written, and `CodegenError::Generation` if
/// `file_name` is not a plain file name.
pub fn write_artifact(
    dir: &Path,
    file_name: &str,
    contents: &str,
) -> Result<PathBuf, CodegenError> {
    let mut components = Path::new(file_name).components();
    if !matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) {
        return Err(CodegenError::generation(format!(
            "invalid output file name '{}'",
            file_name
        )));
    }

    fs::create_dir_all(dir).map_err(|e| CodegenError::write(dir, e))?;

    let path = dir.join(file_name);
    let tmp_path = dir.join(format!(".{}.tmp", file_name));

    if let Err(e) = fs::write(&tmp_path, contents) {
        let _ = fs::remove_file(&tmp_path);
        return Err(CodegenError::write(&path, e));
    }
    if let Err(e) = fs::rename(&tmp_path, &path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(CodegenError::write(&path, e));
    }

    tracing::debug!("wrote {} bytes to {}", contents.len(), path.display());
    Ok(path)
}
