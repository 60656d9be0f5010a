// src/services/google_play.rs

//! Google Play client adapter.
//!
//! Thin pass-through over a [`StoreProvider`]: one method per upstream
//! operation, results returned unchanged. No retries, no caching.

use std::sync::Arc;

use serde_json::Value;

use crate::error::Result;
use crate::models::{
    AppOptions, DataSafetyOptions, DeveloperOptions, ListOptions, PermissionsOptions,
    ReviewsOptions, SearchOptions, SimilarOptions, SuggestOptions, Vocabularies, Vocabulary,
};
use crate::provider::StoreProvider;

/// Service fronting the store provider.
#[derive(Clone)]
pub struct GooglePlayService {
    provider: Arc<dyn StoreProvider>,
    vocabularies: Arc<Vocabularies>,
}

impl GooglePlayService {
    /// Create the service, loading vocabularies from the provider once.
    pub fn new(provider: Arc<dyn StoreProvider>) -> Self {
        let vocabularies = Arc::new(provider.vocabularies());
        Self {
            provider,
            vocabularies,
        }
    }

    pub fn vocabularies(&self) -> &Vocabularies {
        &self.vocabularies
    }

    pub async fn search_apps(&self, options: &SearchOptions) -> Result<Value> {
        tracing::debug!(term = %options.term, "search");
        self.provider.search(options).await
    }

    pub async fn get_app_details(&self, app_id: &str, options: &AppOptions) -> Result<Value> {
        tracing::debug!(app_id, "app detail");
        self.provider.app(app_id, options).await
    }

    pub async fn get_developer_apps(
        &self,
        dev_id: &str,
        options: &DeveloperOptions,
    ) -> Result<Value> {
        tracing::debug!(dev_id, "developer apps");
        self.provider.developer(dev_id, options).await
    }

    pub async fn list_apps(&self, options: &ListOptions) -> Result<Value> {
        tracing::debug!(collection = %options.collection, "list");
        self.provider.list(options).await
    }

    pub async fn get_app_reviews(&self, app_id: &str, options: &ReviewsOptions) -> Result<Value> {
        tracing::debug!(app_id, "reviews");
        self.provider.reviews(app_id, options).await
    }

    pub async fn get_similar_apps(&self, app_id: &str, options: &SimilarOptions) -> Result<Value> {
        tracing::debug!(app_id, "similar apps");
        self.provider.similar(app_id, options).await
    }

    pub async fn get_app_permissions(
        &self,
        app_id: &str,
        options: &PermissionsOptions,
    ) -> Result<Value> {
        tracing::debug!(app_id, "permissions");
        self.provider.permissions(app_id, options).await
    }

    pub async fn get_app_data_safety(
        &self,
        app_id: &str,
        options: &DataSafetyOptions,
    ) -> Result<Value> {
        tracing::debug!(app_id, "data safety");
        self.provider.data_safety(app_id, options).await
    }

    pub async fn suggest_apps(&self, term: &str, options: &SuggestOptions) -> Result<Value> {
        tracing::debug!(term, "suggest");
        self.provider.suggest(term, options).await
    }

    pub fn get_collections(&self) -> &Vocabulary {
        &self.vocabularies.collection
    }

    pub fn get_categories(&self) -> &Vocabulary {
        &self.vocabularies.category
    }

    pub fn get_sort_options(&self) -> &Vocabulary {
        &self.vocabularies.sort
    }
}
