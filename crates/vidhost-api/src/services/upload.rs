//! Video upload pipeline
//!
//! authorize -> stage -> probe -> remux -> store -> persist. Each stage returns a
//! `Result` and the first failure ends the request. Temp files are dropped (and
//! removed) when the pipeline returns, whichever way it returns.

use crate::auth::UserContext;
use crate::error::{multipart_error, multipart_rejection};
use crate::state::AppState;
use axum::extract::multipart::{Multipart, MultipartRejection};
use uuid::Uuid;
use vidhost_core::constants::{VIDEO_CONTENT_TYPE, VIDEO_FORM_FIELD};
use vidhost_core::{models::Video, AppError};
use vidhost_processing::{StagedFile, StagingFile};
use vidhost_storage::generate_object_key;

/// Strip parameters and normalize case: `Video/MP4; codecs=avc1` -> `video/mp4`.
pub(crate) fn normalize_content_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
        .to_lowercase()
}

pub struct VideoUploadService<'a> {
    state: &'a AppState,
}

impl<'a> VideoUploadService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Load the record and require that `user_id` owns it.
    pub async fn authorize(&self, video_id: Uuid, user_id: Uuid) -> Result<Video, AppError> {
        let video = self
            .state
            .videos
            .get_video(video_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Video {} not found", video_id)))?;

        if !video.is_owned_by(user_id) {
            tracing::debug!(video_id = %video_id, user_id = %user_id, "Caller does not own video");
            return Err(AppError::Unauthorized(
                "Not authorized to upload to this video".to_string(),
            ));
        }

        Ok(video)
    }

    /// Stream the `video` form field into a temp file.
    ///
    /// The declared content type is checked before any file is created.
    async fn stage_upload(
        &self,
        multipart: Result<Multipart, MultipartRejection>,
    ) -> Result<StagedFile, AppError> {
        let mut multipart = multipart.map_err(multipart_rejection)?;

        while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
            if field.name() != Some(VIDEO_FORM_FIELD) {
                continue;
            }

            let media_type = field.content_type().map(normalize_content_type);
            if media_type.as_deref() != Some(VIDEO_CONTENT_TYPE) {
                return Err(AppError::InvalidInput(format!(
                    "Invalid file type {}, only MP4 is allowed",
                    media_type.as_deref().unwrap_or("(none)")
                )));
            }

            let mut staging = StagingFile::create(&self.state.config.upload.temp_dir)?;
            while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
                staging.write_chunk(&chunk).await?;
            }

            return Ok(staging.finish().await?);
        }

        Err(AppError::InvalidInput(format!(
            "Missing form field: {}",
            VIDEO_FORM_FIELD
        )))
    }

    /// Run the whole pipeline and return the updated record.
    #[tracing::instrument(skip(self, user, multipart), fields(video_id = %video_id, user_id = %user.user_id))]
    pub async fn upload(
        &self,
        video_id: Uuid,
        user: UserContext,
        multipart: Result<Multipart, MultipartRejection>,
    ) -> Result<Video, AppError> {
        let start = std::time::Instant::now();

        let mut video = self.authorize(video_id, user.user_id).await?;

        let staged = self.stage_upload(multipart).await?;
        tracing::debug!(size_bytes = staged.size(), "Upload staged");

        let dimensions = self.state.prober.probe(staged.path()).await?;
        let aspect = dimensions.aspect();
        let storage_key = generate_object_key(aspect);

        let remuxed = self.state.remuxer.remux(staged.path()).await?;

        let video_url = self
            .state
            .storage
            .upload_file(&storage_key, &remuxed, VIDEO_CONTENT_TYPE)
            .await?;

        video.video_url = Some(video_url);
        let updated = match self.state.videos.update_video(&video).await {
            Ok(updated) => updated,
            Err(e) => {
                self.handle_orphaned_object(&storage_key).await;
                return Err(e);
            }
        };

        tracing::info!(
            storage_key = %storage_key,
            aspect = %aspect,
            width = dimensions.width,
            height = dimensions.height,
            size_bytes = staged.size(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Video upload completed"
        );

        Ok(updated)
    }

    async fn handle_orphaned_object(&self, storage_key: &str) {
        if !self.state.config.upload.delete_orphaned_objects {
            tracing::warn!(
                storage_key = %storage_key,
                "Record update failed, stored object left in place"
            );
            return;
        }

        if let Err(cleanup_err) = self.state.storage.delete(storage_key).await {
            tracing::warn!(
                error = %cleanup_err,
                storage_key = %storage_key,
                "Failed to cleanup storage object after DB error"
            );
        }
    }
}
