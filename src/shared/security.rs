use crate::shared::error::ModWhyError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum size of a saved graph dump or indirect listing (100 MB)
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Reads a text file after checking that it is a regular, non-symlinked
/// file no larger than `MAX_FILE_SIZE`.
///
/// # Arguments
/// * `path` - The file to read
/// * `file_description` - Human readable name used in error messages
///
/// # Errors
/// Returns `ModWhyError::FileReadError` if any check or the read fails
pub fn read_regular_file(path: &Path, file_description: &str) -> Result<String> {
    let fail = |details: String| ModWhyError::FileReadError {
        path: path.to_path_buf(),
        details,
    };

    let metadata = fs::symlink_metadata(path)
        .map_err(|e| fail(format!("Failed to read {} metadata: {}", file_description, e)))?;

    if metadata.is_symlink() {
        return Err(fail(format!(
            "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
            file_description
        ))
        .into());
    }

    if !metadata.is_file() {
        return Err(fail(format!("{} is not a regular file", file_description)).into());
    }

    if metadata.len() > MAX_FILE_SIZE {
        return Err(fail(format!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            file_description,
            metadata.len(),
            MAX_FILE_SIZE
        ))
        .into());
    }

    fs::read_to_string(path)
        .map_err(|e| fail(format!("Failed to read {}: {}", file_description, e)).into())
}

/// Validates the project directory the go toolchain will run in.
///
/// The path must exist, must not be a symbolic link and must resolve to a
/// directory.
pub fn validate_project_directory(path: &Path) -> Result<()> {
    let invalid = |reason: String| ModWhyError::InvalidProjectPath {
        path: path.to_path_buf(),
        reason,
    };

    if !path.exists() {
        return Err(invalid("Directory does not exist".to_string()).into());
    }

    let metadata = fs::symlink_metadata(path)
        .map_err(|e| invalid(format!("Failed to read path metadata: {}", e)))?;

    if metadata.is_symlink() {
        return Err(invalid(
            "Security: Project path is a symbolic link. For security reasons, symbolic links are not allowed."
                .to_string(),
        )
        .into());
    }

    if !path.is_dir() {
        return Err(invalid("Not a directory".to_string()).into());
    }

    let canonical_path = path
        .canonicalize()
        .map_err(|e| invalid(format!("Failed to canonicalize path: {}", e)))?;

    if !canonical_path.is_dir() {
        return Err(invalid("Resolved path is not a directory".to_string()).into());
    }

    Ok(())
}
