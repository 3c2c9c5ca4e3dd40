//! Vidhost API Library
//!
//! HTTP surface of the video upload service: authentication, handlers, the upload
//! pipeline and application setup.

// Module declarations
mod api_doc;
mod extractors;
mod handlers;
mod services;
mod telemetry;

// Public modules
pub mod auth;
pub mod error;
pub mod setup;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
pub use telemetry::init_telemetry;
