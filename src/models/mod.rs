// src/models/mod.rs

//! Domain models for the crawler service.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod app;
mod config;
mod options;
mod vocabulary;

// Re-export all public types
pub use app::{AppRecord, NewAppRecord};
pub use config::{
    Config, CrawlConfig, CrawlMode, LoggingConfig, OverlapPolicy, ProviderConfig, ServerConfig,
    StorageConfig,
};
pub use options::{
    AppOptions, DataSafetyOptions, DeveloperOptions, ListOptions, PermissionsOptions,
    ReviewsOptions, SearchOptions, SimilarOptions, SuggestOptions,
};
pub use vocabulary::{DEFAULT_COLLECTION, VocabValue, Vocabularies, Vocabulary};
