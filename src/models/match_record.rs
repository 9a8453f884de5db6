//! Match record model, one row of the results table.

use serde::{Deserialize, Serialize};

/// Winner sentinel for drawn matches.
pub const DRAW: &str = "Draw";

/// Tournament label for friendly matches.
pub const FRIENDLY: &str = "Friendly";

/// Tournament label for World Cup finals matches.
pub const WORLD_CUP: &str = "FIFA World Cup";

/// Which side of a match a team played on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

/// A single international match result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Home team name
    pub home_team: String,

    /// Away team name
    pub away_team: String,

    /// Goals scored by the home team
    pub home_score: u32,

    /// Goals scored by the away team
    pub away_score: u32,

    /// Winning team name, or "Draw"
    pub winner: String,

    /// Tournament category label
    #[serde(default)]
    pub tournament: String,
}

impl MatchRecord {
    /// Create a new match record.
    pub fn new(
        home_team: impl Into<String>,
        away_team: impl Into<String>,
        home_score: u32,
        away_score: u32,
        winner: impl Into<String>,
        tournament: impl Into<String>,
    ) -> Self {
        Self {
            home_team: home_team.into(),
            away_team: away_team.into(),
            home_score,
            away_score,
            winner: winner.into(),
            tournament: tournament.into(),
        }
    }

    /// Returns true if the match ended in a draw.
    pub fn is_draw(&self) -> bool {
        self.winner == DRAW
    }

    /// Side the winner played on, or None for a draw.
    pub fn winning_side(&self) -> Option<Side> {
        if self.winner == self.home_team {
            Some(Side::Home)
        } else if self.winner == self.away_team {
            Some(Side::Away)
        } else {
            None
        }
    }

    /// Check the row invariants, returning the first violation.
    pub fn integrity_issue(&self) -> Option<String> {
        if self.home_team.is_empty() || self.away_team.is_empty() {
            return Some("team name is empty".to_string());
        }
        if self.home_team == self.away_team {
            return Some(format!("'{}' is listed as both home and away", self.home_team));
        }
        if !self.is_draw() && self.winning_side().is_none() {
            return Some(format!(
                "winner '{}' is neither '{}', '{}' nor '{}'",
                self.winner, self.home_team, self.away_team, DRAW
            ));
        }
        None
    }
}
