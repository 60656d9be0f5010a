//! SQLite storage implementation.
//!
//! A single connection guarded by a mutex. Every call runs on the blocking
//! pool so the async executor never waits on disk I/O.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, params};

use crate::error::{AppError, Result};
use crate::models::{AppRecord, NewAppRecord};
use crate::storage::AppStorage;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS apps (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    app_id      TEXT NOT NULL,
    title       TEXT NOT NULL,
    developer   TEXT NOT NULL,
    score       REAL,
    crawled_at  TEXT NOT NULL
);
";

/// SQLite-backed snapshot storage.
#[derive(Clone)]
pub struct SqliteStorage {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStorage {
    /// Open (or create) the database file, creating parent directories.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        tracing::info!("Opening snapshot database at {}", path.display());
        Self::init(Connection::open(path)?)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `f` against the connection on the blocking pool.
    async fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn
                .lock()
                .map_err(|_| AppError::storage("connection mutex poisoned"))?;
            f(&mut guard)
        })
        .await
        .map_err(AppError::storage)?
    }
}

fn parse_timestamp(idx: usize, raw: String) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

#[async_trait]
impl AppStorage for SqliteStorage {
    async fn save_apps(&self, apps: &[NewAppRecord]) -> Result<usize> {
        if apps.is_empty() {
            return Ok(0);
        }

        let apps = apps.to_vec();
        self.with_conn(move |conn| {
            let crawled_at = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
            let tx = conn.transaction()?;
            {
                let mut stmt = tx.prepare(
                    "INSERT INTO apps (app_id, title, developer, score, crawled_at)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                )?;
                for app in &apps {
                    stmt.execute(params![
                        app.app_id,
                        app.title,
                        app.developer,
                        app.score,
                        crawled_at
                    ])?;
                }
            }
            tx.commit()?;
            Ok(apps.len())
        })
        .await
    }

    async fn count(&self) -> Result<usize> {
        self.with_conn(|conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM apps", [], |row| row.get(0))?;
            Ok(usize::try_from(count).unwrap_or_default())
        })
        .await
    }

    async fn recent(&self, limit: usize) -> Result<Vec<AppRecord>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, app_id, title, developer, score, crawled_at
                 FROM apps ORDER BY id DESC LIMIT ?1",
            )?;
            let rows = stmt.query_map([limit], |row| {
                Ok(AppRecord {
                    id: row.get(0)?,
                    app_id: row.get(1)?,
                    title: row.get(2)?,
                    developer: row.get(3)?,
                    score: row.get(4)?,
                    crawled_at: parse_timestamp(5, row.get(5)?)?,
                })
            })?;
            Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
        })
        .await
    }
}
