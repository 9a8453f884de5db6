//! Derived statistics models.

use serde::{Deserialize, Serialize};

use super::Continent;
use crate::calculate::{calculate_goals_per_match, calculate_win_rate, round2};

/// Output columns, in display order. The team (and continent) key precedes them.
pub const STATS_COLUMNS: [&str; 7] = [
    "matches",
    "victories",
    "home_victories",
    "away_victories",
    "total_goals",
    "avg_goals_per_match",
    "win_rate",
];

/// How the win rate column is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WinRateFormat {
    /// Ratio rounded to 2 decimal places, e.g. 0.5
    #[default]
    Ratio,
    /// Percentage string with 2 decimal places, e.g. "50.00%"
    Percent,
}

impl WinRateFormat {
    /// Present a raw victories/matches ratio.
    pub fn apply(&self, ratio: f64) -> WinRate {
        match self {
            WinRateFormat::Ratio => WinRate::Ratio(round2(ratio)),
            WinRateFormat::Percent => WinRate::Percent(format!("{:.2}%", ratio * 100.0)),
        }
    }
}

impl std::fmt::Display for WinRateFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WinRateFormat::Ratio => write!(f, "ratio"),
            WinRateFormat::Percent => write!(f, "percent"),
        }
    }
}

impl std::str::FromStr for WinRateFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ratio" => Ok(WinRateFormat::Ratio),
            "percent" | "percentage" => Ok(WinRateFormat::Percent),
            _ => Err(format!("Unknown win rate format: {}. Use ratio or percent.", s)),
        }
    }
}

/// Presented win rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WinRate {
    Ratio(f64),
    Percent(String),
}

impl std::fmt::Display for WinRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WinRate::Ratio(r) => write!(f, "{:.2}", r),
            WinRate::Percent(p) => write!(f, "{}", p),
        }
    }
}

/// Which rows survive into the final table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Teams ranked by victories, first N overall
    #[default]
    GlobalTop20,
    /// Teams ranked by victories within each continent, first N per continent
    ContinentTop5,
}

impl std::fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionPolicy::GlobalTop20 => write!(f, "global_top20"),
            SelectionPolicy::ContinentTop5 => write!(f, "continent_top5"),
        }
    }
}

impl std::str::FromStr for SelectionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "global_top20" | "global" => Ok(SelectionPolicy::GlobalTop20),
            "continent_top5" | "continent" => Ok(SelectionPolicy::ContinentTop5),
            _ => Err(format!(
                "Unknown selection: {}. Use global_top20 or continent_top5.",
                s
            )),
        }
    }
}

/// Raw per-team tallies before derived metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamCounts {
    pub matches: u32,
    pub victories: u32,
    pub home_victories: u32,
    pub away_victories: u32,
    pub total_goals: u64,
}

/// Per-team statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStats {
    /// Team name
    pub team: String,

    /// Matches played under the scope filter
    pub matches: u32,

    /// Wins under the victory filter
    pub victories: u32,

    /// Wins as the home side
    pub home_victories: u32,

    /// Wins as the away side
    pub away_victories: u32,

    /// Goals scored across home and away appearances
    pub total_goals: u64,

    /// total_goals / matches, rounded to 2 decimals
    pub avg_goals_per_match: f64,

    /// victories / matches
    pub win_rate: WinRate,
}

impl TeamStats {
    /// Derive metrics from raw tallies.
    ///
    /// Returns None when the team has no matches, since neither ratio is
    /// defined then.
    pub fn from_counts(team: String, counts: &TeamCounts, format: WinRateFormat) -> Option<Self> {
        let win_rate = format.apply(calculate_win_rate(counts.victories, counts.matches)?);
        let avg_goals_per_match =
            round2(calculate_goals_per_match(counts.total_goals, counts.matches)?);

        Some(Self {
            team,
            matches: counts.matches,
            victories: counts.victories,
            home_victories: counts.home_victories,
            away_victories: counts.away_victories,
            total_goals: counts.total_goals,
            avg_goals_per_match,
            win_rate,
        })
    }
}

/// One output row, keyed by team and, in grouped views, continent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continent: Option<Continent>,

    #[serde(flatten)]
    pub stats: TeamStats,
}

/// Ranked statistics table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsTable {
    /// Selection policy that produced the rows
    pub selection: SelectionPolicy,

    /// Metric columns in display order
    pub columns: Vec<String>,

    /// Rows in ranked order
    pub rows: Vec<StatsRow>,
}

impl StatsTable {
    pub fn new(selection: SelectionPolicy, rows: Vec<StatsRow>) -> Self {
        Self {
            selection,
            columns: STATS_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get a team's row by exact name. Tallies key teams by exact name, so
    /// lookups do too.
    pub fn get_team(&self, name: &str) -> Option<&StatsRow> {
        self.rows.iter().find(|r| r.stats.team == name)
    }

    /// Rows belonging to one continent.
    pub fn in_continent(&self, continent: Continent) -> Vec<&StatsRow> {
        self.rows
            .iter()
            .filter(|r| r.continent == Some(continent))
            .collect()
    }
}
