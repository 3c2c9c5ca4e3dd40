use async_trait::async_trait;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;
use vidhost_core::{models::Video, AppError};

const VIDEO_COLUMNS: &str =
    "id, user_id, title, description, video_url, created_at, updated_at";

/// Data access for video records
#[async_trait]
pub trait VideoRepository: Send + Sync {
    /// Fetch a video by ID, `None` when no record exists
    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError>;

    /// Persist the mutable fields of `video` and return the stored row
    async fn update_video(&self, video: &Video) -> Result<Video, AppError>;
}

/// Postgres-backed video repository
#[derive(Clone)]
pub struct PgVideoRepository {
    pool: PgPool,
}

impl PgVideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VideoRepository for PgVideoRepository {
    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "select", db.record_id = %id))]
    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        let video = sqlx::query_as::<Postgres, Video>(&format!(
            "SELECT {} FROM videos WHERE id = $1",
            VIDEO_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(video)
    }

    #[tracing::instrument(skip(self, video), fields(db.table = "videos", db.operation = "update", db.record_id = %video.id))]
    async fn update_video(&self, video: &Video) -> Result<Video, AppError> {
        let updated = sqlx::query_as::<Postgres, Video>(&format!(
            r#"
            UPDATE videos
            SET title = $2, description = $3, video_url = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            VIDEO_COLUMNS
        ))
        .bind(video.id)
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.video_url)
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or_else(|| AppError::NotFound(format!("Video {} not found", video.id)))
    }
}
