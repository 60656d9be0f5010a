// src/provider/http.rs

//! HTTP-backed store provider.
//!
//! Forwards each operation to `GET {base_url}/{operation}` with the options
//! encoded as camelCase query parameters, and returns the JSON body as-is.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{
    AppOptions, DataSafetyOptions, DeveloperOptions, ListOptions, PermissionsOptions,
    ProviderConfig, ReviewsOptions, SearchOptions, SimilarOptions, SuggestOptions,
};
use crate::provider::StoreProvider;
use crate::utils::http::create_async_client;

/// Longest upstream error body echoed into an error message.
const MAX_ERROR_BODY: usize = 512;

/// Store provider reached over HTTP.
#[derive(Clone)]
pub struct HttpProvider {
    client: Client,
    base_url: Url,
}

impl HttpProvider {
    /// Create a provider from configuration.
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let client = create_async_client(config)?;
        let base_url = Url::parse(&config.base_url)?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a provider around an existing client.
    pub fn with_client(client: Client, mut base_url: Url) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Issue one upstream request. Attempted exactly once.
    async fn fetch<Q: Serialize + ?Sized>(
        &self,
        operation: &str,
        id: Option<(&str, &str)>,
        options: &Q,
    ) -> Result<Value> {
        let url = self.base_url.join(operation)?;
        tracing::debug!(operation, %url, "Calling store provider");

        let mut request = self.client.get(url);
        if let Some(id) = id {
            request = request.query(&[id]);
        }
        let response = request.query(options).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AppError::provider(
                operation,
                format!("{status}: {}", truncate(&body, MAX_ERROR_BODY)),
            ));
        }

        serde_json::from_str(&body)
            .map_err(|e| AppError::provider(operation, format!("invalid JSON body: {e}")))
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[async_trait]
impl StoreProvider for HttpProvider {
    async fn search(&self, options: &SearchOptions) -> Result<Value> {
        self.fetch("search", None, options).await
    }

    async fn app(&self, app_id: &str, options: &AppOptions) -> Result<Value> {
        self.fetch("app", Some(("appId", app_id)), options).await
    }

    async fn developer(&self, dev_id: &str, options: &DeveloperOptions) -> Result<Value> {
        self.fetch("developer", Some(("devId", dev_id)), options).await
    }

    async fn list(&self, options: &ListOptions) -> Result<Value> {
        self.fetch("list", None, options).await
    }

    async fn reviews(&self, app_id: &str, options: &ReviewsOptions) -> Result<Value> {
        self.fetch("reviews", Some(("appId", app_id)), options).await
    }

    async fn similar(&self, app_id: &str, options: &SimilarOptions) -> Result<Value> {
        self.fetch("similar", Some(("appId", app_id)), options).await
    }

    async fn permissions(&self, app_id: &str, options: &PermissionsOptions) -> Result<Value> {
        self.fetch("permissions", Some(("appId", app_id)), options).await
    }

    async fn data_safety(&self, app_id: &str, options: &DataSafetyOptions) -> Result<Value> {
        self.fetch("datasafety", Some(("appId", app_id)), options).await
    }

    async fn suggest(&self, term: &str, options: &SuggestOptions) -> Result<Value> {
        self.fetch("suggest", Some(("term", term)), options).await
    }
}
