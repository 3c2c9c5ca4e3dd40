//! Test helpers: build AppState with in-memory fakes and serve the real router.
//!
//! Run from workspace root: `cargo test -p vidhost-api --test video_upload_test`.
//! No database, object store or ffmpeg installation is needed.

#![allow(dead_code)]

pub mod fakes;
pub mod fixtures;

use axum_test::TestServer;
use chrono::Duration;
use fakes::{Fakes, TEST_BUCKET, TEST_REGION};
use std::sync::Arc;
use tempfile::TempDir;
use uuid::Uuid;
use vidhost_api::auth::{make_jwt, JwtValidator};
use vidhost_api::setup::routes;
use vidhost_api::AppState;
use vidhost_core::config::{StorageConfig, UploadConfig};
use vidhost_core::constants::DEFAULT_JWT_ISSUER;
use vidhost_core::models::Video;
use vidhost_core::{Config, StorageBackend};

pub const TEST_JWT_SECRET: &str = "test-jwt-secret-at-least-32-characters-long";

/// Knobs for a test application.
pub struct TestOptions {
    pub max_upload_bytes: usize,
    pub delete_orphaned_objects: bool,
    /// Run with `ENVIRONMENT=production` semantics. Error details are configured
    /// once per process, so keep production apps in their own test binary.
    pub production: bool,
}

impl Default for TestOptions {
    fn default() -> Self {
        Self {
            max_upload_bytes: vidhost_core::constants::DEFAULT_MAX_UPLOAD_BYTES,
            delete_orphaned_objects: false,
            production: false,
        }
    }
}

/// Test application: server, fakes and one seeded video record.
pub struct TestApp {
    pub server: TestServer,
    pub fakes: Fakes,
    pub upload_dir: TempDir,
    pub owner_id: Uuid,
    pub video_id: Uuid,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Token for the owner of the seeded video.
    pub fn owner_token(&self) -> String {
        token_for(self.owner_id)
    }

    pub fn upload_path(&self) -> String {
        format!("/api/videos/{}/upload", self.video_id)
    }

    /// Number of entries currently in the upload temp dir.
    pub fn temp_file_count(&self) -> usize {
        std::fs::read_dir(self.upload_dir.path())
            .expect("Failed to read upload dir")
            .count()
    }

    pub fn stored_video(&self) -> Video {
        self.fakes
            .videos
            .get(self.video_id)
            .expect("Seeded video missing")
    }
}

pub fn token_for(user_id: Uuid) -> String {
    make_jwt(
        user_id,
        TEST_JWT_SECRET,
        DEFAULT_JWT_ISSUER,
        Duration::hours(1),
    )
    .expect("Failed to sign test token")
}

pub fn test_config(upload_dir: &TempDir, options: &TestOptions) -> Config {
    Config {
        environment: if options.production { "production" } else { "test" }.to_string(),
        server_port: 0,
        cors_origins: if options.production {
            vec!["https://app.vidhost.test".to_string()]
        } else {
            vec!["*".to_string()]
        },
        database_url: "postgresql://localhost/vidhost_test".to_string(),
        db_max_connections: 1,
        db_timeout_seconds: 1,
        jwt_secret: TEST_JWT_SECRET.to_string(),
        jwt_issuer: DEFAULT_JWT_ISSUER.to_string(),
        storage: StorageConfig {
            backend: StorageBackend::S3,
            s3_bucket: Some(TEST_BUCKET.to_string()),
            s3_region: Some(TEST_REGION.to_string()),
            s3_endpoint: None,
            local_storage_path: None,
            local_storage_base_url: None,
        },
        upload: UploadConfig {
            max_upload_bytes: options.max_upload_bytes,
            temp_dir: upload_dir.path().to_path_buf(),
            ffprobe_path: "ffprobe".to_string(),
            ffmpeg_path: "ffmpeg".to_string(),
            delete_orphaned_objects: options.delete_orphaned_objects,
        },
    }
}

pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(TestOptions::default()).await
}

pub async fn setup_test_app_with(options: TestOptions) -> TestApp {
    let upload_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let config = test_config(&upload_dir, &options);
    config.validate().expect("Test config should be valid");

    let fakes = Fakes::new();
    let owner_id = Uuid::new_v4();
    let video = fixtures::video_owned_by(owner_id);
    let video_id = video.id;
    fakes.videos.insert(video);

    let state = Arc::new(AppState {
        videos: fakes.videos.clone(),
        storage: fakes.storage.clone(),
        prober: fakes.prober.clone(),
        remuxer: fakes.remuxer.clone(),
        token_validator: Arc::new(JwtValidator::new(&config.jwt_secret, &config.jwt_issuer)),
        config,
    });

    let app = routes::setup_routes(&state.config, state.clone()).expect("Failed to build routes");
    let server = TestServer::new(app).expect("Failed to create test server");

    TestApp {
        server,
        fakes,
        upload_dir,
        owner_id,
        video_id,
    }
}

/// Seed another record, e.g. one owned by someone else.
pub fn seed_video(app: &TestApp, owner_id: Uuid) -> Uuid {
    let video = fixtures::video_owned_by(owner_id);
    let id = video.id;
    app.fakes.videos.insert(video);
    id
}
