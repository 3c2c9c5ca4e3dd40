use crate::auth::jwt::{get_bearer_token, TokenValidator};
use crate::error::HttpAppError;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use std::sync::Arc;
use uuid::Uuid;

/// Token validation handle, pulled out of the application state by [`UserContext`].
#[derive(Clone)]
pub struct AuthState {
    pub validator: Arc<dyn TokenValidator>,
}

/// Authenticated caller.
///
/// Extracting it validates the bearer token, so it must come after any path
/// extractor whose failure should win over a missing token.
#[derive(Debug, Clone, Copy)]
pub struct UserContext {
    pub user_id: Uuid,
}

impl<S> FromRequestParts<S> for UserContext
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = AuthState::from_ref(state);

        let user_id = get_bearer_token(&parts.headers)
            .and_then(|token| auth.validator.validate(token))
            .map_err(|e| {
                tracing::debug!(
                    method = %parts.method,
                    path = %parts.uri.path(),
                    "Authentication failed"
                );
                HttpAppError(e)
            })?;

        Ok(UserContext { user_id })
    }
}
