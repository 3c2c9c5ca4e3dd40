//! OpenAPI documentation.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::error;
use crate::handlers;
use vidhost_core::models;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Vidhost API",
        version = "0.1.0",
        description = "Video upload API: accepts MP4 uploads for existing video records, classifies them by aspect ratio, remuxes them for fast start and stores them in object storage."
    ),
    paths(
        handlers::health::health_check,
        handlers::video_upload::upload_video,
        handlers::video_get::get_video,
    ),
    components(
        schemas(
            models::VideoResponse,
            models::AspectBucket,
            error::ErrorResponse,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "videos", description = "Video upload and retrieval"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;
