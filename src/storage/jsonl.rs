//! JSONL (JSON Lines) storage.
//!
//! Each line is a JSON object. Match tables are read as generic objects so
//! column names stay whatever the source used; result rows are written typed.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

use super::StorageError;
use crate::models::{MatchTable, StatsRow};

/// JSONL file writer.
pub struct JsonlWriter<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Serialize> JsonlWriter<T> {
    /// Create a new JSONL writer for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Ensure the parent directory exists.
    fn ensure_dir(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Write entities, replacing the entire file.
    pub fn write_all(&self, entities: &[T]) -> Result<usize, StorageError> {
        self.ensure_dir()?;

        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        let mut count = 0;

        for entity in entities {
            let json = serde_json::to_string(entity)?;
            writeln!(writer, "{}", json)?;
            count += 1;
        }

        writer.flush()?;
        info!("Wrote {} entities to {:?}", count, self.path);

        Ok(count)
    }
}

/// Write result rows as JSONL.
pub fn write_rows_jsonl(path: &Path, rows: &[StatsRow]) -> Result<usize, StorageError> {
    JsonlWriter::new(path.to_path_buf()).write_all(rows)
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Read a JSONL file of flat objects into a raw table.
pub fn read_jsonl_table(path: &Path) -> Result<MatchTable, StorageError> {
    let file = File::open(path)?;
    read_jsonl_from(BufReader::new(file))
}

/// Read JSONL from any buffered reader.
///
/// Headers are the union of keys in first-seen order; objects missing a key
/// get an empty cell. Any malformed line fails the whole read.
pub fn read_jsonl_from<R: BufRead>(reader: R) -> Result<MatchTable, StorageError> {
    let mut objects: Vec<Map<String, Value>> = Vec::new();
    let mut headers: Vec<String> = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let object: Map<String, Value> =
            serde_json::from_str(&line).map_err(|source| StorageError::JsonLine {
                line: i + 1,
                source,
            })?;

        for key in object.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
        objects.push(object);
    }

    let mut table = MatchTable::new(headers);
    for object in &objects {
        let row = table
            .headers
            .iter()
            .map(|h| object.get(h).map(cell_text).unwrap_or_default())
            .collect();
        table.push_row(row);
    }

    debug!("Parsed {} JSONL rows", table.len());
    Ok(table)
}
