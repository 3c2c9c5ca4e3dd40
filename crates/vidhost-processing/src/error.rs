use std::path::PathBuf;
use thiserror::Error;
use vidhost_core::AppError;

/// Failures while staging, probing or remuxing an upload.
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("Failed to execute {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} exited with {status}: {stderr}")]
    ToolFailed {
        tool: String,
        status: String,
        stderr: String,
    },

    #[error("Failed to parse ffprobe output: {0}")]
    InvalidProbeOutput(#[from] serde_json::Error),

    #[error("No streams found in input")]
    NoStreams,

    #[error("Remux produced no output at {}: {stderr}", path.display())]
    EmptyOutput { path: PathBuf, stderr: String },

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ProcessingResult<T> = Result<T, ProcessingError>;

impl From<ProcessingError> for AppError {
    fn from(err: ProcessingError) -> Self {
        match err {
            ProcessingError::Io(err) => AppError::Internal(format!("IO error: {}", err)),
            other => AppError::MediaProcessing(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vidhost_core::ErrorMetadata;

    #[test]
    fn test_tool_failure_is_media_processing() {
        let err: AppError = ProcessingError::ToolFailed {
            tool: "ffmpeg".to_string(),
            status: "exit status: 1".to_string(),
            stderr: "moov atom not found".to_string(),
        }
        .into();
        assert_eq!(err.error_code(), "MEDIA_PROCESSING_ERROR");
        assert!(err.to_string().contains("moov atom not found"));
    }

    #[test]
    fn test_io_failure_is_internal() {
        let err: AppError = ProcessingError::Io(std::io::Error::other("disk full")).into();
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
        assert_eq!(err.http_status_code(), 500);
    }
}
