//! Fast-start remux through `ffmpeg`.
//!
//! The remux is a stream copy (`-c copy`) that moves the `moov` atom to the front
//! of the file (`-movflags faststart`) so players can start before the whole
//! object has downloaded. No re-encoding happens.

use crate::error::{ProcessingError, ProcessingResult};
use crate::validation::{validate_path, validate_tool_path};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tempfile::TempPath;
use tokio::process::Command;

#[async_trait]
pub trait Remuxer: Send + Sync {
    /// Remux `input` and return the output path. The file is removed when the
    /// returned guard is dropped.
    async fn remux(&self, input: &Path) -> ProcessingResult<TempPath>;
}

/// Sibling output path: `<dir>/<stem>.processing.mp4`.
pub fn processing_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    input.with_file_name(format!("{}.processing.mp4", stem))
}

pub struct FfmpegRemuxer {
    ffmpeg_path: String,
}

impl FfmpegRemuxer {
    pub fn new(ffmpeg_path: impl Into<String>) -> ProcessingResult<Self> {
        let ffmpeg_path = ffmpeg_path.into();
        validate_tool_path(&ffmpeg_path)?;
        Ok(Self { ffmpeg_path })
    }
}

#[async_trait]
impl Remuxer for FfmpegRemuxer {
    #[tracing::instrument(skip(self), fields(
        process.executable.name = "ffmpeg",
        process.executable.path = %self.ffmpeg_path,
        ffmpeg.operation = "faststart"
    ))]
    async fn remux(&self, input: &Path) -> ProcessingResult<TempPath> {
        let start = std::time::Instant::now();
        validate_path(input)?;

        // Guard first so a partial output is removed on any error below.
        let output_path = TempPath::try_from_path(processing_output_path(input))?;

        let output = Command::new(&self.ffmpeg_path)
            .arg("-i")
            .arg(input)
            .args(["-c", "copy", "-movflags", "faststart", "-f", "mp4"])
            .arg(&*output_path)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| ProcessingError::Spawn {
                tool: self.ffmpeg_path.clone(),
                source,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if !output.status.success() {
            return Err(ProcessingError::ToolFailed {
                tool: self.ffmpeg_path.clone(),
                status: output.status.to_string(),
                stderr,
            });
        }

        let size = match tokio::fs::metadata(&*output_path).await {
            Ok(meta) if meta.len() > 0 => meta.len(),
            _ => {
                return Err(ProcessingError::EmptyOutput {
                    path: output_path.to_path_buf(),
                    stderr,
                })
            }
        };

        tracing::info!(
            duration_ms = start.elapsed().as_millis(),
            output = %output_path.display(),
            size_bytes = size,
            "Fast-start remux completed"
        );

        Ok(output_path)
    }
}
