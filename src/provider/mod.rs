//! Store data provider interface.
//!
//! The provider does the actual store scraping. This crate only consumes it:
//! every operation takes validated options and returns the provider's JSON
//! payload unchanged.

#[cfg(test)]
pub mod fake;
pub mod http;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::models::{
    AppOptions, DataSafetyOptions, DeveloperOptions, ListOptions, PermissionsOptions,
    ReviewsOptions, SearchOptions, SimilarOptions, SuggestOptions, Vocabularies,
};

// Re-export for convenience
pub use http::HttpProvider;

/// Trait for store data providers.
#[async_trait]
pub trait StoreProvider: Send + Sync {
    /// Search apps by term.
    async fn search(&self, options: &SearchOptions) -> Result<Value>;

    /// Full detail for a single app.
    async fn app(&self, app_id: &str, options: &AppOptions) -> Result<Value>;

    /// Apps published by a developer.
    async fn developer(&self, dev_id: &str, options: &DeveloperOptions) -> Result<Value>;

    /// Curated collection listing.
    async fn list(&self, options: &ListOptions) -> Result<Value>;

    async fn reviews(&self, app_id: &str, options: &ReviewsOptions) -> Result<Value>;

    async fn similar(&self, app_id: &str, options: &SimilarOptions) -> Result<Value>;

    async fn permissions(&self, app_id: &str, options: &PermissionsOptions) -> Result<Value>;

    async fn data_safety(&self, app_id: &str, options: &DataSafetyOptions) -> Result<Value>;

    /// Autocomplete suggestions for a partial term.
    async fn suggest(&self, term: &str, options: &SuggestOptions) -> Result<Value>;

    /// Collection, category and sort constants understood by the provider.
    fn vocabularies(&self) -> Vocabularies {
        Vocabularies::google_play()
    }
}
