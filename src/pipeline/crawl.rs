// src/pipeline/crawl.rs

//! Scheduled crawl job.
//!
//! Every tick issues one fixed search through the Google Play service and
//! either logs the result or stores one snapshot row per returned app.
//! A failed run is logged and never stops the schedule.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::Utc;
use serde_json::Value;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::error::{AppError, Result};
use crate::models::{CrawlConfig, CrawlMode, NewAppRecord, OverlapPolicy, SearchOptions};
use crate::services::GooglePlayService;
use crate::storage::AppStorage;

/// Summary of a single crawl run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CrawlOutcome {
    /// Items returned by the provider
    pub fetched: usize,
    /// Rows written to storage (always 0 in log mode)
    pub saved: usize,
    /// Items lacking an id, title or developer
    pub skipped: usize,
}

/// What happened on a tick.
#[derive(Debug)]
pub enum TickResult {
    Completed(CrawlOutcome),
    Failed(AppError),
    /// A previous run was still in flight
    Skipped,
}

/// The recurring crawl job.
pub struct CrawlJob {
    config: CrawlConfig,
    service: GooglePlayService,
    storage: Option<Arc<dyn AppStorage>>,
    running: AtomicBool,
}

impl CrawlJob {
    /// Create a job. Persist mode requires `storage`.
    pub fn new(
        config: CrawlConfig,
        service: GooglePlayService,
        storage: Option<Arc<dyn AppStorage>>,
    ) -> Result<Self> {
        if config.mode == CrawlMode::Persist && storage.is_none() {
            return Err(AppError::config(
                "crawl.mode = \"persist\" requires a storage backend",
            ));
        }
        Ok(Self {
            config,
            service,
            storage,
            running: AtomicBool::new(false),
        })
    }

    /// Whether a run is currently in flight.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    fn search_options(&self) -> SearchOptions {
        SearchOptions {
            term: self.config.term.clone(),
            num: Some(self.config.num.into()),
            country: Some(self.config.country.clone()),
            lang: Some(self.config.lang.clone()),
            ..SearchOptions::default()
        }
    }

    /// Execute one crawl run, propagating failures.
    pub async fn run_once(&self) -> Result<CrawlOutcome> {
        let started = Utc::now();
        tracing::info!(term = %self.config.term, mode = ?self.config.mode, "Starting Google Play crawl");

        let result = self.service.search_apps(&self.search_options()).await?;
        let items = result
            .as_array()
            .ok_or_else(|| AppError::provider("search", "expected an array of apps"))?;

        let mut outcome = CrawlOutcome {
            fetched: items.len(),
            ..CrawlOutcome::default()
        };

        match self.config.mode {
            CrawlMode::Log => {
                tracing::info!(count = items.len(), "Crawl fetched apps");
                tracing::debug!(payload = %result, "Crawl payload");
            }
            CrawlMode::Persist => {
                let records = to_records(items, &mut outcome);
                if let Some(storage) = &self.storage {
                    outcome.saved = storage.save_apps(&records).await?;
                }
                tracing::info!(
                    saved = outcome.saved,
                    skipped = outcome.skipped,
                    "Saved crawled apps to database"
                );
            }
        }

        let elapsed = Utc::now() - started;
        tracing::debug!(elapsed_ms = elapsed.num_milliseconds(), "Crawl finished");
        Ok(outcome)
    }

    /// Handle one timer tick. Never returns an error.
    pub async fn tick(&self) -> TickResult {
        let guard = RunningGuard::claim(&self.running);

        if guard.is_none() && self.config.overlap == OverlapPolicy::Skip {
            tracing::warn!("Previous crawl still running, skipping this tick");
            return TickResult::Skipped;
        }

        let result = self.run_once().await;
        drop(guard);

        match result {
            Ok(outcome) => TickResult::Completed(outcome),
            Err(e) => {
                tracing::error!(error = %e, "Crawl failed");
                TickResult::Failed(e)
            }
        }
    }

    /// Spawn the timer loop. Each tick runs on its own task.
    pub fn spawn(self: Arc<Self>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let period = Duration::from_secs(self.config.interval_secs);
            let mut timer = tokio::time::interval(period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

            // The first tick completes immediately.
            if !self.config.run_on_startup {
                timer.tick().await;
            }

            tracing::info!(interval_secs = self.config.interval_secs, "Crawl scheduler started");

            loop {
                timer.tick().await;
                let job = Arc::clone(&self);
                tokio::spawn(async move {
                    job.tick().await;
                });
            }
        })
    }
}

/// Holds the in-flight flag; releases it on drop, including on unwind.
struct RunningGuard<'a>(&'a AtomicBool);

impl<'a> RunningGuard<'a> {
    fn claim(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Map provider search items to storable records, counting rejects.
fn to_records(items: &[Value], outcome: &mut CrawlOutcome) -> Vec<NewAppRecord> {
    items
        .iter()
        .filter_map(|item| {
            let record = NewAppRecord::from_search_item(item);
            if record.is_none() {
                outcome.skipped += 1;
                tracing::warn!(item = %item, "Skipping crawl item without appId/title/developer");
            }
            record
        })
        .collect()
}
