// Library exports
pub mod auth;
pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod session;

use std::sync::Arc;

use crate::models::AppConfig;
use crate::session::IdleSessionTracker;

/// Shared application state for axum handlers and middleware
#[derive(Clone)]
pub struct AppState {
    pub tracker: Arc<IdleSessionTracker>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(tracker: IdleSessionTracker, config: Arc<AppConfig>) -> Self {
        Self {
            tracker: Arc::new(tracker),
            config,
        }
    }
}
