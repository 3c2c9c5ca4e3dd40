use crate::error::{ProcessingError, ProcessingResult};
use std::path::Path;

const DANGEROUS_CHARS: [char; 11] = [';', '|', '&', '$', '`', '(', ')', '<', '>', '\n', '\r'];

/// Reject paths with shell metacharacters or traversal sequences.
pub(crate) fn validate_path(path: &Path) -> ProcessingResult<()> {
    let path_str = path.to_string_lossy();

    if path_str.chars().any(|c| DANGEROUS_CHARS.contains(&c)) {
        return Err(ProcessingError::InvalidPath(format!(
            "Path contains dangerous characters: {}",
            path_str
        )));
    }

    if path_str.contains("..") {
        return Err(ProcessingError::InvalidPath(format!(
            "Path contains directory traversal: {}",
            path_str
        )));
    }

    Ok(())
}

/// Tool paths are either a bare program name resolved via `PATH` or a plain filesystem path.
pub(crate) fn validate_tool_path(tool_path: &str) -> ProcessingResult<()> {
    if tool_path.is_empty() {
        return Err(ProcessingError::InvalidPath(
            "Tool path is empty".to_string(),
        ));
    }

    validate_path(Path::new(tool_path))?;

    if !tool_path
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '/' | '-' | '_' | '.' | '\\'))
    {
        return Err(ProcessingError::InvalidPath(format!(
            "Tool path contains unsafe characters: {}",
            tool_path
        )));
    }

    Ok(())
}
