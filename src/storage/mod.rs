//! Filesystem loaders and writers.
//!
//! Everything here sits outside the statistics core:
//! - Match tables from CSV or JSONL files
//! - Continent mappings from TOML
//! - JSONL export of result rows

mod continents;
mod csv_table;
mod jsonl;

pub use continents::*;
pub use csv_table::*;
pub use jsonl::*;

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::models::MatchTable;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid JSON on line {line}: {source}")]
    JsonLine {
        line: usize,
        source: serde_json::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Unknown table format for {0}; expected .csv or .jsonl")]
    UnknownFormat(PathBuf),
}

/// On-disk formats a match table can be read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Jsonl,
}

impl TableFormat {
    /// Pick the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self, StorageError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("csv") => Ok(TableFormat::Csv),
            Some("jsonl") | Some("ndjson") => Ok(TableFormat::Jsonl),
            _ => Err(StorageError::UnknownFormat(path.to_path_buf())),
        }
    }
}

/// Load a match table, choosing the reader by file extension.
pub fn load_match_table(path: &Path) -> Result<MatchTable, StorageError> {
    if !path.exists() {
        return Err(StorageError::PathNotFound(path.to_path_buf()));
    }

    let table = match TableFormat::from_path(path)? {
        TableFormat::Csv => read_csv_table(path)?,
        TableFormat::Jsonl => read_jsonl_table(path)?,
    };

    info!(
        "Loaded {} rows ({} columns) from {:?}",
        table.len(),
        table.headers.len(),
        path
    );
    Ok(table)
}
