//! In-memory stand-ins for the database, object storage and media tools.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempPath;
use uuid::Uuid;
use vidhost_core::{models::Video, AppError};
use vidhost_db::VideoRepository;
use vidhost_processing::remux::processing_output_path;
use vidhost_processing::{MediaProber, ProcessingError, ProcessingResult, Remuxer, StreamDimensions};
use vidhost_storage::{Storage, StorageError, StorageResult};

pub const TEST_BUCKET: &str = "test-bucket";
pub const TEST_REGION: &str = "us-east-1";

/// Bytes appended by [`FakeRemuxer`] so tests can tell remuxed output from the upload.
pub const REMUX_MARKER: &[u8] = b"[faststart]";

#[derive(Default)]
pub struct FakeVideoRepository {
    pub videos: Mutex<HashMap<Uuid, Video>>,
    pub fail_updates: AtomicBool,
    pub update_calls: AtomicUsize,
}

impl FakeVideoRepository {
    pub fn insert(&self, video: Video) {
        self.videos.lock().unwrap().insert(video.id, video);
    }

    pub fn get(&self, id: Uuid) -> Option<Video> {
        self.videos.lock().unwrap().get(&id).cloned()
    }
}

#[async_trait]
impl VideoRepository for FakeVideoRepository {
    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        Ok(self.get(id))
    }

    async fn update_video(&self, video: &Video) -> Result<Video, AppError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(AppError::from(sqlx::Error::PoolTimedOut));
        }

        let mut videos = self.videos.lock().unwrap();
        let stored = videos
            .get_mut(&video.id)
            .ok_or_else(|| AppError::NotFound(format!("Video {} not found", video.id)))?;
        *stored = Video {
            updated_at: chrono::Utc::now(),
            ..video.clone()
        };
        Ok(stored.clone())
    }
}

pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

#[derive(Default)]
pub struct RecordingStorage {
    pub objects: Mutex<HashMap<String, StoredObject>>,
    pub deleted: Mutex<Vec<String>>,
    pub fail_uploads: AtomicBool,
    pub upload_calls: AtomicUsize,
}

impl RecordingStorage {
    pub fn keys(&self) -> Vec<String> {
        self.objects.lock().unwrap().keys().cloned().collect()
    }
}

#[async_trait]
impl Storage for RecordingStorage {
    async fn upload_file(
        &self,
        storage_key: &str,
        path: &Path,
        content_type: &str,
    ) -> StorageResult<String> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(StorageError::UploadFailed("connection reset".to_string()));
        }

        let bytes = tokio::fs::read(path).await?;
        self.objects.lock().unwrap().insert(
            storage_key.to_string(),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(self.public_url(storage_key))
    }

    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        self.deleted.lock().unwrap().push(storage_key.to_string());
        self.objects
            .lock()
            .unwrap()
            .remove(storage_key)
            .map(|_| ())
            .ok_or_else(|| StorageError::NotFound(storage_key.to_string()))
    }

    fn public_url(&self, storage_key: &str) -> String {
        format!(
            "https://{}.s3.{}.amazonaws.com/{}",
            TEST_BUCKET, TEST_REGION, storage_key
        )
    }
}

pub struct FakeProber {
    pub dimensions: Mutex<StreamDimensions>,
    pub fail: AtomicBool,
    pub calls: AtomicUsize,
}

impl FakeProber {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            dimensions: Mutex::new(StreamDimensions { width, height }),
            fail: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn set_dimensions(&self, width: u32, height: u32) {
        *self.dimensions.lock().unwrap() = StreamDimensions { width, height };
    }
}

#[async_trait]
impl MediaProber for FakeProber {
    async fn probe(&self, path: &Path) -> ProcessingResult<StreamDimensions> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert!(path.exists(), "probe called on a missing file");

        if self.fail.load(Ordering::SeqCst) {
            return Err(ProcessingError::NoStreams);
        }
        Ok(*self.dimensions.lock().unwrap())
    }
}

/// Copies the input next to itself and appends [`REMUX_MARKER`].
#[derive(Default)]
pub struct FakeRemuxer {
    pub calls: AtomicUsize,
}

#[async_trait]
impl Remuxer for FakeRemuxer {
    async fn remux(&self, input: &Path) -> ProcessingResult<TempPath> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let output = TempPath::try_from_path(processing_output_path(input))?;
        let mut bytes = tokio::fs::read(input).await?;
        bytes.extend_from_slice(REMUX_MARKER);
        tokio::fs::write(&*output, bytes).await?;
        Ok(output)
    }
}

/// Handles to every fake so tests can inspect them after a request.
#[derive(Clone)]
pub struct Fakes {
    pub videos: Arc<FakeVideoRepository>,
    pub storage: Arc<RecordingStorage>,
    pub prober: Arc<FakeProber>,
    pub remuxer: Arc<FakeRemuxer>,
}

impl Fakes {
    pub fn new() -> Self {
        Self {
            videos: Arc::new(FakeVideoRepository::default()),
            storage: Arc::new(RecordingStorage::default()),
            prober: Arc::new(FakeProber::new(1920, 1080)),
            remuxer: Arc::new(FakeRemuxer::default()),
        }
    }
}
