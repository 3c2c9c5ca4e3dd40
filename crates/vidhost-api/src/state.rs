//! Application state shared by all handlers.
//!
//! Every collaborator sits behind a trait object so tests can swap in fakes.

use crate::auth::{AuthState, TokenValidator};
use axum::extract::FromRef;
use std::sync::Arc;
use vidhost_core::Config;
use vidhost_db::VideoRepository;
use vidhost_processing::{MediaProber, Remuxer};
use vidhost_storage::Storage;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub videos: Arc<dyn VideoRepository>,
    pub storage: Arc<dyn Storage>,
    pub prober: Arc<dyn MediaProber>,
    pub remuxer: Arc<dyn Remuxer>,
    pub token_validator: Arc<dyn TokenValidator>,
}

impl FromRef<Arc<AppState>> for AuthState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        AuthState {
            validator: state.token_validator.clone(),
        }
    }
}
