//! Request extractors shared by the video handlers.

use crate::error::HttpAppError;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use uuid::Uuid;
use vidhost_core::AppError;

/// `{video_id}` path segment parsed as a UUID.
///
/// Handlers list it before [`crate::auth::UserContext`] so a malformed id is a
/// 400 whether or not a token was sent.
#[derive(Debug, Clone, Copy)]
pub struct VideoId(pub Uuid);

impl<S> FromRequestParts<S> for VideoId
where
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::InvalidInput(rejection.body_text()))?;

        let id = Uuid::parse_str(&raw).map_err(AppError::from)?;
        Ok(VideoId(id))
    }
}
