//! Temp-file staging for incoming upload bodies.

use crate::error::ProcessingResult;
use std::path::Path;
use tempfile::TempPath;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

const STAGING_PREFIX: &str = "vidhost-upload-";

/// A temp file being filled chunk by chunk.
pub struct StagingFile {
    file: File,
    path: TempPath,
    size: u64,
}

impl StagingFile {
    /// Create an empty temp file in `dir`.
    pub fn create(dir: &Path) -> ProcessingResult<Self> {
        let named = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .suffix(".mp4")
            .tempfile_in(dir)?;
        let (file, path) = named.into_parts();

        Ok(Self {
            file: File::from_std(file),
            path,
            size: 0,
        })
    }

    pub async fn write_chunk(&mut self, chunk: &[u8]) -> ProcessingResult<()> {
        self.file.write_all(chunk).await?;
        self.size += chunk.len() as u64;
        Ok(())
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Flush and close the file, keeping the path guard.
    ///
    /// Consumers reopen the file by path.
    pub async fn finish(mut self) -> ProcessingResult<StagedFile> {
        self.file.flush().await?;
        self.file.sync_all().await?;

        tracing::debug!(
            path = %self.path.display(),
            size_bytes = self.size,
            "Upload staged"
        );

        Ok(StagedFile {
            path: self.path,
            size: self.size,
        })
    }
}

/// A fully written upload on disk. Removed on drop.
#[derive(Debug)]
pub struct StagedFile {
    path: TempPath,
    size: u64,
}

impl StagedFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size(&self) -> u64 {
        self.size
    }
}
