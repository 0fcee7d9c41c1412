use crate::error::{PdfsiftError, PdfsiftResult};

pub fn validate_file_type(file_name: &str, allowed_types: &[&str]) -> PdfsiftResult<()> {
    let extension = std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");

    if !allowed_types.contains(&extension.to_lowercase().as_str()) {
        return Err(PdfsiftError::validation(
            "file_type",
            format!(
                "File type '{}' not allowed. Allowed types: {}",
                extension,
                allowed_types.join(", ")
            ),
        ));
    }

    Ok(())
}

pub fn validate_file_size(file_size: u64, max_size: u64) -> PdfsiftResult<()> {
    if file_size > max_size {
        return Err(PdfsiftError::validation(
            "file_size",
            format!(
                "File size {} bytes exceeds maximum allowed size {} bytes",
                file_size, max_size
            ),
        ));
    }

    Ok(())
}

/// Reduce an uploaded filename to a safe single path component: path
/// separators become underscores and anything outside `[A-Za-z0-9._-]`
/// is dropped.
pub fn sanitize_filename(file_name: &str) -> String {
    let base = file_name.replace(['/', '\\'], "_");

    let cleaned: String = base
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();

    cleaned.trim_matches(['.', '_'].as_slice()).to_string()
}
