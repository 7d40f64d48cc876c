//! Upload validation module
//!
//! Provides validation utilities for uploaded content.

use crate::error::ApiError;

/// Validates the size of an uploaded file
///
/// Returns an error if the file exceeds the maximum size.
pub fn validate_file_size(size: usize, max_size: usize) -> Result<(), ApiError> {
    if size > max_size {
        let max_mb = max_size / (1024 * 1024);
        let actual_mb = size / (1024 * 1024);
        Err(ApiError::payload_too_large(format!(
            "File too large: {} MB exceeds maximum of {} MB",
            actual_mb, max_mb
        )))
    } else {
        Ok(())
    }
}

/// Returns the trimmed filename, or `None` when it is missing or blank
pub fn sanitize_filename(file_name: Option<&str>) -> Option<String> {
    // Keep only the last path component; some clients send full paths.
    file_name
        .and_then(|name| name.rsplit(['/', '\\']).next())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}
