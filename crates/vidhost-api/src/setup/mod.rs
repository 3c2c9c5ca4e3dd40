//! Application setup and initialization

pub mod database;
pub mod routes;
pub mod server;

use crate::auth::JwtValidator;
use crate::state::AppState;
use anyhow::{Context, Result};
use std::sync::Arc;
use vidhost_core::Config;
use vidhost_db::PgVideoRepository;
use vidhost_processing::{FfmpegRemuxer, FfprobeProber};
use vidhost_storage::create_storage;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_telemetry()
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.environment,
        storage_backend = %config.storage.backend,
        "Configuration loaded and validated successfully"
    );

    let pool = database::setup_database(&config).await?;

    let storage = create_storage(&config.storage)
        .await
        .context("Failed to initialize storage backend")?;

    let prober = FfprobeProber::new(config.upload.ffprobe_path.clone())
        .context("Invalid FFPROBE_PATH")?;
    let remuxer =
        FfmpegRemuxer::new(config.upload.ffmpeg_path.clone()).context("Invalid FFMPEG_PATH")?;

    tokio::fs::create_dir_all(&config.upload.temp_dir)
        .await
        .with_context(|| {
            format!(
                "Failed to create upload temp dir {}",
                config.upload.temp_dir.display()
            )
        })?;

    let state = Arc::new(AppState {
        videos: Arc::new(PgVideoRepository::new(pool)),
        storage,
        prober: Arc::new(prober),
        remuxer: Arc::new(remuxer),
        token_validator: Arc::new(JwtValidator::new(&config.jwt_secret, &config.jwt_issuer)),
        config,
    });

    let router = routes::setup_routes(&state.config, state.clone())?;

    Ok((state, router))
}
