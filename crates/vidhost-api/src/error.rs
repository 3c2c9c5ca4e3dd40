//! HTTP error response conversion
//!
//! Handlers return `Result<_, HttpAppError>`. Anything that converts into `AppError`
//! (storage, processing, database and multipart failures) renders through the same
//! `ErrorResponse` body, status and log level.

use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::OnceLock;
use utoipa::ToSchema;
use vidhost_core::{AppError, Config, ErrorMetadata, LogLevel};
use vidhost_processing::ProcessingError;
use vidhost_storage::StorageError;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Whether this error is recoverable (can be retried)
    pub recoverable: bool,
    /// Suggested action for the client
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

/// Wrapper type for AppError to implement IntoResponse
///
/// Needed because of the orphan rule: `IntoResponse` and `AppError` both live in
/// other crates.
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        HttpAppError(AppError::from(err))
    }
}

impl From<ProcessingError> for HttpAppError {
    fn from(err: ProcessingError) -> Self {
        HttpAppError(AppError::from(err))
    }
}

/// Body-limit overflows become 413, everything else about the form is a client error.
pub fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("Upload exceeds the size limit: {}", err.body_text()))
    } else {
        AppError::InvalidInput(format!("Unable to parse form file: {}", err.body_text()))
    }
}

pub fn multipart_rejection(rejection: MultipartRejection) -> AppError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(rejection.body_text())
    } else {
        AppError::InvalidInput(format!("Unable to parse form: {}", rejection.body_text()))
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error.detailed_message(), error_type = error_type, "Error occurred");
        }
    }
}

static PRODUCTION_MODE: OnceLock<bool> = OnceLock::new();

/// Take the error detail policy from `config`. The first call wins.
pub fn configure_error_responses(config: &Config) {
    if PRODUCTION_MODE.set(config.is_production()).is_err() {
        tracing::debug!("Error response mode already configured");
    }
}

/// Details stay hidden until the mode has been configured.
fn is_production() -> bool {
    PRODUCTION_MODE.get().copied().unwrap_or(true)
}

fn error_body(app_error: &AppError, is_production: bool) -> ErrorResponse {
    // Details only for non-sensitive errors outside production.
    let show_details = !is_production && !app_error.is_sensitive();

    ErrorResponse {
        error: app_error.client_message(),
        details: show_details.then(|| app_error.detailed_message()),
        error_type: show_details.then(|| app_error.error_type().to_string()),
        code: app_error.error_code().to_string(),
        recoverable: app_error.is_recoverable(),
        suggested_action: app_error.suggested_action().map(String::from),
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        (status, Json(error_body(app_error, is_production()))).into_response()
    }
}
