//! In-process provider for unit tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Value, json};

use crate::error::{AppError, Result};
use crate::models::{
    AppOptions, DataSafetyOptions, DeveloperOptions, ListOptions, PermissionsOptions,
    ReviewsOptions, SearchOptions, SimilarOptions, SuggestOptions,
};
use crate::provider::StoreProvider;

/// One recorded upstream call.
#[derive(Debug, Clone)]
pub struct Call {
    pub operation: &'static str,
    pub id: Option<String>,
    pub options: Value,
}

/// Records every call and answers with a canned payload or an error.
#[derive(Default)]
pub struct FakeProvider {
    calls: Mutex<Vec<Call>>,
    response: Option<Value>,
    failing: AtomicBool,
    panic_next: AtomicBool,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every call with `response`.
    pub fn with_response(response: Value) -> Self {
        Self {
            response: Some(response),
            ..Self::default()
        }
    }

    /// Fail every call with a provider error.
    pub fn failing() -> Self {
        let provider = Self::default();
        provider.set_failing(true);
        provider
    }

    /// Panic inside the next call only.
    pub fn panic_once(&self) {
        self.panic_next.store(true, Ordering::SeqCst);
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record<O: Serialize>(&self, operation: &'static str, id: Option<&str>, options: &O) -> Result<Value> {
        let options = serde_json::to_value(options)?;
        self.calls.lock().unwrap().push(Call {
            operation,
            id: id.map(str::to_string),
            options: options.clone(),
        });

        if self.panic_next.swap(false, Ordering::SeqCst) {
            panic!("{operation} blew up");
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::provider(operation, "provider unavailable"));
        }

        Ok(self
            .response
            .clone()
            .unwrap_or_else(|| json!({ "operation": operation, "id": id, "options": options })))
    }
}

#[async_trait]
impl StoreProvider for FakeProvider {
    async fn search(&self, options: &SearchOptions) -> Result<Value> {
        self.record("search", None, options)
    }

    async fn app(&self, app_id: &str, options: &AppOptions) -> Result<Value> {
        self.record("app", Some(app_id), options)
    }

    async fn developer(&self, dev_id: &str, options: &DeveloperOptions) -> Result<Value> {
        self.record("developer", Some(dev_id), options)
    }

    async fn list(&self, options: &ListOptions) -> Result<Value> {
        self.record("list", None, options)
    }

    async fn reviews(&self, app_id: &str, options: &ReviewsOptions) -> Result<Value> {
        self.record("reviews", Some(app_id), options)
    }

    async fn similar(&self, app_id: &str, options: &SimilarOptions) -> Result<Value> {
        self.record("similar", Some(app_id), options)
    }

    async fn permissions(&self, app_id: &str, options: &PermissionsOptions) -> Result<Value> {
        self.record("permissions", Some(app_id), options)
    }

    async fn data_safety(&self, app_id: &str, options: &DataSafetyOptions) -> Result<Value> {
        self.record("datasafety", Some(app_id), options)
    }

    async fn suggest(&self, term: &str, options: &SuggestOptions) -> Result<Value> {
        self.record("suggest", Some(term), options)
    }
}
