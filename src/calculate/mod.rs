//! Statistics calculation engine.
//!
//! Turns a match-results table into ranked per-team statistics:
//! - Row filtering by tournament category (scope and victory filters)
//! - Victory, appearance and goal tallies, each row crediting two teams
//! - Derived metrics (win rate, goals per match)
//! - Global or per-continent top-N selection

mod filter;
mod schema;
mod select;
mod tally;

pub use filter::*;
pub use schema::*;
pub use select::*;
pub use tally::*;

use thiserror::Error;
use tracing::{debug, info};

use crate::models::{
    ContinentMap, MatchRecord, MatchTable, SelectionPolicy, StatsTable, TeamStats, WinRateFormat,
};

/// Errors raised while computing statistics.
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("Missing required column: {column}")]
    Schema { column: String },

    #[error("Invalid value '{value}' in column '{column}' at row {row}")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Data integrity error at row {row}: {reason}")]
    DataIntegrity { row: usize, reason: String },

    #[error("Team '{team}' has victories but no matches in scope")]
    ZeroMatches { team: String },
}

/// Parameters for one aggregation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateOptions {
    pub policy: FilterPolicy,
    pub selection: SelectionPolicy,
    pub win_rate_format: WinRateFormat,
    pub top_n: usize,
    pub per_continent: usize,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self::preset(FilterVariant::Total)
    }
}

impl AggregateOptions {
    /// Options for a filter preset with the default selection.
    pub fn preset(variant: FilterVariant) -> Self {
        Self {
            policy: variant.policy(),
            selection: SelectionPolicy::GlobalTop20,
            win_rate_format: WinRateFormat::Ratio,
            top_n: GLOBAL_TOP_N,
            per_continent: CONTINENT_TOP_N,
        }
    }

    pub fn with_selection(mut self, selection: SelectionPolicy) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_win_rate_format(mut self, format: WinRateFormat) -> Self {
        self.win_rate_format = format;
        self
    }
}

/// Round to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Calculate win rate from victories and matches played.
pub fn calculate_win_rate(victories: u32, matches: u32) -> Option<f64> {
    if matches == 0 {
        None
    } else {
        Some(victories as f64 / matches as f64)
    }
}

/// Calculate average goals per match.
pub fn calculate_goals_per_match(total_goals: u64, matches: u32) -> Option<f64> {
    if matches == 0 {
        None
    } else {
        Some(total_goals as f64 / matches as f64)
    }
}

/// Unranked statistics for every team appearing in scope.
pub fn team_stats(
    records: &[MatchRecord],
    policy: &FilterPolicy,
    format: WinRateFormat,
) -> Result<Vec<TeamStats>, StatsError> {
    validate_records(records)?;

    let tally = Tally::from_records(records, policy);
    debug!(
        "{} of {} rows in scope, {} victories, {} teams",
        tally.scoped_rows(),
        records.len(),
        tally.victory_rows(),
        tally.team_count()
    );

    tally
        .iter()
        .map(|(team, counts)| {
            TeamStats::from_counts(team.to_string(), counts, format).ok_or_else(|| {
                StatsError::ZeroMatches {
                    team: team.to_string(),
                }
            })
        })
        .collect()
}

/// Compute the ranked statistics table from typed records.
pub fn compute_stats(
    records: &[MatchRecord],
    options: &AggregateOptions,
    continents: &ContinentMap,
) -> Result<StatsTable, StatsError> {
    let stats = team_stats(records, &options.policy, options.win_rate_format)?;

    let rows = match options.selection {
        SelectionPolicy::GlobalTop20 => global_top_n(stats, options.top_n),
        SelectionPolicy::ContinentTop5 => continent_top_n(stats, continents, options.per_continent),
    };

    info!(
        "Computed {} rows ({}, scope {}, victories {})",
        rows.len(),
        options.selection,
        options.policy.scope,
        options.policy.victory
    );

    Ok(StatsTable::new(options.selection, rows))
}

/// Bind a raw table and compute the ranked statistics table.
pub fn aggregate(
    table: &MatchTable,
    bindings: &ColumnBindings,
    options: &AggregateOptions,
    continents: &ContinentMap,
) -> Result<StatsTable, StatsError> {
    let records = bind_records(table, bindings, &options.policy)?;
    compute_stats(&records, options, continents)
}
