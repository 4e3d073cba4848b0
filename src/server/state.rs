//! Application state management

use std::sync::Arc;

use crate::service::InferenceService;

use super::ServerConfig;

/// State shared across handlers. Read-only after startup, so no locking
/// is needed; concurrent requests each run an independent forward pass.
pub struct AppState {
    pub config: ServerConfig,
    pub service: Arc<InferenceService>,
}

impl AppState {
    pub fn new(config: ServerConfig, service: InferenceService) -> Self {
        Self {
            config,
            service: Arc::new(service),
        }
    }
}
