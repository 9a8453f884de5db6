//! Per-team counting passes over the match list.

use std::collections::BTreeMap;

use super::FilterPolicy;
use crate::models::{MatchRecord, Side, TeamCounts};

/// Running tallies keyed by team name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    teams: BTreeMap<String, TeamCounts>,
    scoped_rows: usize,
    victory_rows: usize,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run all three passes over `records` under `policy`.
    pub fn from_records(records: &[MatchRecord], policy: &FilterPolicy) -> Self {
        let mut tally = Self::new();
        for record in records {
            if policy.counts_victory(record) {
                tally.add_victory(record);
            }
            if policy.in_scope(record) {
                tally.add_appearances(record);
                tally.add_goals(record);
                tally.scoped_rows += 1;
            }
        }
        tally
    }

    fn entry(&mut self, team: &str) -> &mut TeamCounts {
        self.teams.entry(team.to_string()).or_default()
    }

    /// Credit the winner of a decided match.
    pub fn add_victory(&mut self, record: &MatchRecord) {
        let Some(side) = record.winning_side() else {
            return;
        };

        let counts = self.entry(&record.winner);
        counts.victories += 1;
        match side {
            Side::Home => counts.home_victories += 1,
            Side::Away => counts.away_victories += 1,
        }
        self.victory_rows += 1;
    }

    /// One match played for each side.
    pub fn add_appearances(&mut self, record: &MatchRecord) {
        self.entry(&record.home_team).matches += 1;
        self.entry(&record.away_team).matches += 1;
    }

    /// Goals scored by each side.
    pub fn add_goals(&mut self, record: &MatchRecord) {
        self.entry(&record.home_team).total_goals += record.home_score as u64;
        self.entry(&record.away_team).total_goals += record.away_score as u64;
    }

    pub fn get(&self, team: &str) -> Option<&TeamCounts> {
        self.teams.get(team)
    }

    /// Teams in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TeamCounts)> {
        self.teams.iter().map(|(t, c)| (t.as_str(), c))
    }

    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    /// Rows that passed the scope filter.
    pub fn scoped_rows(&self) -> usize {
        self.scoped_rows
    }

    /// Rows credited as a victory.
    pub fn victory_rows(&self) -> usize {
        self.victory_rows
    }

    /// Sum of matches across all teams.
    pub fn total_appearances(&self) -> u64 {
        self.teams.values().map(|c| c.matches as u64).sum()
    }
}
