//! Shared state for request handlers.

use std::sync::Arc;

use crate::provider::StoreProvider;
use crate::services::GooglePlayService;

/// State handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Google Play adapter used by all store routes.
    pub service: GooglePlayService,
}

impl AppState {
    /// Creates state backed by the given provider.
    #[must_use]
    pub fn new(provider: Arc<dyn StoreProvider>) -> Self {
        Self {
            service: GooglePlayService::new(provider),
        }
    }

    /// Creates state from an existing service.
    #[must_use]
    pub fn with_service(service: GooglePlayService) -> Self {
        Self { service }
    }
}
