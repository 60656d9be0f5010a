//! Persisted crawl snapshot records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A stored snapshot row written by the crawl job.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppRecord {
    /// Autoincrement primary key
    pub id: i64,

    /// Store-assigned application id
    pub app_id: String,

    pub title: String,

    pub developer: String,

    /// Average rating as reported by the provider
    pub score: Option<f64>,

    /// Set by the store at insert time
    pub crawled_at: DateTime<Utc>,
}

/// A snapshot row not yet persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAppRecord {
    pub app_id: String,
    pub title: String,
    pub developer: String,
    pub score: Option<f64>,
}

impl NewAppRecord {
    /// Build a record from a provider search result item.
    ///
    /// Returns `None` when `appId`, `title` or `developer` is missing.
    pub fn from_search_item(item: &Value) -> Option<Self> {
        let text = |key: &str| item.get(key).and_then(Value::as_str).map(str::to_string);

        Some(Self {
            app_id: text("appId")?,
            title: text("title")?,
            developer: text("developer")?,
            score: item.get("score").and_then(Value::as_f64),
        })
    }
}
