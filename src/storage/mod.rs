//! Storage abstractions for crawl snapshot persistence.
//!
//! Snapshots are append-only: every crawl run inserts fresh rows and nothing
//! is ever updated or deleted.
//!
//! ## Table Layout
//!
//! ```text
//! apps
//! ├── id          INTEGER PRIMARY KEY AUTOINCREMENT
//! ├── app_id      TEXT
//! ├── title       TEXT
//! ├── developer   TEXT
//! ├── score       REAL (nullable)
//! └── crawled_at  TEXT (RFC 3339, set at insert)
//! ```

pub mod sqlite;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{AppRecord, NewAppRecord};

// Re-export for convenience
pub use sqlite::SqliteStorage;

/// Trait for snapshot storage backends.
#[async_trait]
pub trait AppStorage: Send + Sync {
    /// Insert a batch of records, stamping each with the insert time.
    ///
    /// Returns the number of rows written.
    async fn save_apps(&self, apps: &[NewAppRecord]) -> Result<usize>;

    /// Total number of stored rows.
    async fn count(&self) -> Result<usize>;

    /// Most recently inserted rows, newest first.
    async fn recent(&self, limit: usize) -> Result<Vec<AppRecord>>;
}
