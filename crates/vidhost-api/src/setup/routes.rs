//! Route configuration and setup

use crate::api_doc::ApiDoc;
use crate::error::configure_error_responses;
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use vidhost_core::Config;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router, anyhow::Error> {
    let cors = setup_cors(config)?;
    configure_error_responses(config);

    let public_routes =
        Router::new().route("/health", get(handlers::health::health_check));

    // Handlers authenticate through `UserContext`; the body limit only applies here
    let protected_routes = Router::new()
        .route("/api/videos/{video_id}", get(handlers::video_get::get_video))
        .route(
            "/api/videos/{video_id}/upload",
            post(handlers::video_upload::upload_video),
        )
        .layer(DefaultBodyLimit::max(config.upload.max_upload_bytes));

    let app = public_routes
        .merge(protected_routes)
        .with_state(state)
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/docs"))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let methods = [Method::GET, Method::POST, Method::OPTIONS];

    let cors = if config.cors_origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .map_err(|e| anyhow::anyhow!("Invalid CORS origin {}: {}", o, e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(Any)
    };
    Ok(cors)
}
