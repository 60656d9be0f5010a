// src/lib.rs

//! Game Crawler Library
//!
//! REST facade over a Google Play data provider plus a scheduled crawl job
//! that snapshots search results into SQLite.

pub mod error;
pub mod models;
pub mod openapi;
pub mod pipeline;
pub mod provider;
pub mod router;
pub mod routes;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;
