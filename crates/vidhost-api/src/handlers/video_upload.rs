use crate::auth::UserContext;
use crate::error::{ErrorResponse, HttpAppError};
use crate::extractors::VideoId;
use crate::services::upload::VideoUploadService;
use crate::state::AppState;
use axum::{
    extract::{
        multipart::{Multipart, MultipartRejection},
        State,
    },
    Json,
};
use std::sync::Arc;
use vidhost_core::models::VideoResponse;

/// Upload the video file for an existing record.
///
/// Expects `multipart/form-data` with a `video` field of type `video/mp4`.
#[utoipa::path(
    post,
    path = "/api/videos/{video_id}/upload",
    tag = "videos",
    params(
        ("video_id" = String, Path, description = "Video ID")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Video uploaded successfully", body = VideoResponse),
        (status = 400, description = "Invalid video ID, form or file type", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token, or not the owner", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Processing, storage or database failure", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    VideoId(video_id): VideoId,
    user: UserContext,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<VideoResponse>, HttpAppError> {
    let video = VideoUploadService::new(&state)
        .upload(video_id, user, multipart)
        .await?;

    Ok(Json(VideoResponse::from(video)))
}
