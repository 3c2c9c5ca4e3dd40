use crate::keys::validate_key;
use crate::traits::{Storage, StorageError, StorageResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Local filesystem storage implementation
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for stored videos (e.g., "/var/lib/vidhost/media")
    /// * `base_url` - Base URL the directory is served under (e.g., "http://localhost:3000/media")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            base_url,
        })
    }

    fn key_to_path(&self, storage_key: &str) -> StorageResult<PathBuf> {
        validate_key(storage_key)?;
        Ok(self.base_path.join(storage_key))
    }

    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn upload_file(
        &self,
        storage_key: &str,
        path: &Path,
        _content_type: &str,
    ) -> StorageResult<String> {
        let dest = self.key_to_path(storage_key)?;
        self.ensure_parent_dir(&dest).await?;

        let start = std::time::Instant::now();

        let size = fs::copy(path, &dest).await.map_err(|e| {
            StorageError::UploadFailed(format!(
                "Failed to copy {} to {}: {}",
                path.display(),
                dest.display(),
                e
            ))
        })?;

        tracing::info!(
            path = %dest.display(),
            key = %storage_key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(self.public_url(storage_key))
    }

    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        let path = self.key_to_path(storage_key)?;

        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(key = %storage_key, "Local storage delete successful");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(storage_key.to_string()))
            }
            Err(e) => Err(StorageError::DeleteFailed(e.to_string())),
        }
    }

    fn public_url(&self, storage_key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), storage_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn storage_in(dir: &TempDir) -> LocalStorage {
        LocalStorage::new(
            dir.path().join("media"),
            "http://localhost:3000/media/".to_string(),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_upload_file_copies_and_returns_url() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir).await;

        let source = dir.path().join("processed.mp4");
        fs::write(&source, b"fake mp4 bytes").await.unwrap();

        let url = storage
            .upload_file("landscape/abcd.mp4", &source, "video/mp4")
            .await
            .unwrap();

        assert_eq!(url, "http://localhost:3000/media/landscape/abcd.mp4");
        let stored = fs::read(dir.path().join("media/landscape/abcd.mp4"))
            .await
            .unwrap();
        assert_eq!(stored, b"fake mp4 bytes");
    }

    #[tokio::test]
    async fn test_upload_rejects_traversal_key() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir).await;
        let source = dir.path().join("in.mp4");
        fs::write(&source, b"x").await.unwrap();

        let err = storage
            .upload_file("../escape.mp4", &source, "video/mp4")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey(_)));
    }

    #[tokio::test]
    async fn test_upload_missing_source_fails() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir).await;

        let err = storage
            .upload_file("other/1.mp4", &dir.path().join("missing.mp4"), "video/mp4")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::UploadFailed(_)));
    }

    #[tokio::test]
    async fn test_delete() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir).await;
        let source = dir.path().join("in.mp4");
        fs::write(&source, b"x").await.unwrap();
        storage
            .upload_file("portrait/1.mp4", &source, "video/mp4")
            .await
            .unwrap();

        storage.delete("portrait/1.mp4").await.unwrap();
        assert!(matches!(
            storage.delete("portrait/1.mp4").await,
            Err(StorageError::NotFound(_))
        ));
    }
}
