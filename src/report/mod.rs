//! Rendering of statistics tables for the terminal and for export.

use std::fmt::Write as _;

use thiserror::Error;

use crate::models::{SelectionPolicy, StatsRow, StatsTable};

/// Errors raised while rendering.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV output is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Failed to flush CSV output: {0}")]
    Flush(String),
}

/// Output format for a rendered table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use table, json, or csv.", s)),
        }
    }
}

/// Render a table in the requested format.
pub fn render(table: &StatsTable, format: OutputFormat) -> Result<String, ReportError> {
    match format {
        OutputFormat::Table => Ok(render_text(table)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(table)?),
        OutputFormat::Csv => render_csv(table),
    }
}

fn key_headers(table: &StatsTable) -> Vec<String> {
    let mut headers = Vec::new();
    if table.selection == SelectionPolicy::ContinentTop5 {
        headers.push("continent".to_string());
    }
    headers.push("team".to_string());
    headers.extend(table.columns.iter().cloned());
    headers
}

fn row_cells(row: &StatsRow, with_continent: bool) -> Vec<String> {
    let s = &row.stats;
    let mut cells = Vec::with_capacity(9);
    if with_continent {
        cells.push(row.continent.map(|c| c.to_string()).unwrap_or_default());
    }
    cells.extend([
        s.team.clone(),
        s.matches.to_string(),
        s.victories.to_string(),
        s.home_victories.to_string(),
        s.away_victories.to_string(),
        s.total_goals.to_string(),
        format!("{:.2}", s.avg_goals_per_match),
        s.win_rate.to_string(),
    ]);
    cells
}

/// Fixed-width text table. Text columns are left-aligned, numbers right-aligned.
pub fn render_text(table: &StatsTable) -> String {
    let with_continent = table.selection == SelectionPolicy::ContinentTop5;
    let headers = key_headers(table);
    let rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|r| row_cells(r, with_continent))
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let text_columns = if with_continent { 2 } else { 1 };
    let format_line = |cells: &[String]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (cell, &w))| {
                if i < text_columns {
                    format!("{:<w$}", cell, w = w)
                } else {
                    format!("{:>w$}", cell, w = w)
                }
            })
            .collect();
        padded.join("  ").trim_end().to_string()
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", format_line(&headers));
    let rule: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    let _ = writeln!(out, "{}", "-".repeat(rule));
    for row in &rows {
        let _ = writeln!(out, "{}", format_line(row));
    }
    if rows.is_empty() {
        let _ = writeln!(out, "(no teams)");
    }
    out
}

/// CSV with a header row, also for empty tables.
pub fn render_csv(table: &StatsTable) -> Result<String, ReportError> {
    let with_continent = table.selection == SelectionPolicy::ContinentTop5;
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(key_headers(table))?;
    for row in &table.rows {
        writer.write_record(row_cells(row, with_continent))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ReportError::Flush(e.to_string()))?;
    Ok(String::from_utf8(bytes)?)
}
