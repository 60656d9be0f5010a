//! Background pipelines.
//!
//! - `CrawlJob`: recurring Google Play search with optional snapshot persistence

pub mod crawl;

pub use crawl::{CrawlJob, CrawlOutcome, TickResult};
