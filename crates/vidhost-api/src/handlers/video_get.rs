use crate::auth::UserContext;
use crate::error::{ErrorResponse, HttpAppError};
use crate::extractors::VideoId;
use crate::services::upload::VideoUploadService;
use crate::state::AppState;
use axum::{extract::State, Json};
use std::sync::Arc;
use vidhost_core::models::VideoResponse;

#[utoipa::path(
    get,
    path = "/api/videos/{video_id}",
    tag = "videos",
    params(
        ("video_id" = String, Path, description = "Video ID")
    ),
    responses(
        (status = 200, description = "Video record", body = VideoResponse),
        (status = 400, description = "Invalid video ID", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token, or not the owner", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_video(
    State(state): State<Arc<AppState>>,
    VideoId(video_id): VideoId,
    user: UserContext,
) -> Result<Json<VideoResponse>, HttpAppError> {
    let video = VideoUploadService::new(&state)
        .authorize(video_id, user.user_id)
        .await?;

    Ok(Json(VideoResponse::from(video)))
}
