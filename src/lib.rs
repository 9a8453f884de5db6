//! # Soccer Stats
//!
//! Descriptive statistics for international soccer teams from a
//! match-results table.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (match records, team statistics, continents)
//! - **calculate**: Filtering, tallying, derived metrics and top-N selection
//! - **config**: Configuration loading and validation
//! - **storage**: Match table loaders, continent mappings, JSONL export
//! - **report**: Text, JSON and CSV rendering of statistics tables

pub mod calculate;
pub mod config;
pub mod models;
pub mod report;
pub mod storage;

pub use models::*;
