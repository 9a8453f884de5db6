//! Ranking and top-N selection over computed team statistics.

use std::collections::BTreeMap;

use tracing::debug;

use crate::models::{Continent, ContinentMap, StatsRow, TeamStats};

/// Default size of the global ranking.
pub const GLOBAL_TOP_N: usize = 20;

/// Default number of teams kept per continent.
pub const CONTINENT_TOP_N: usize = 5;

/// Sort by victories descending, then team name ascending.
pub fn rank_by_victories(stats: &mut [TeamStats]) {
    stats.sort_by(|a, b| {
        b.victories
            .cmp(&a.victories)
            .then_with(|| a.team.cmp(&b.team))
    });
}

/// First `n` teams by victories.
pub fn global_top_n(mut stats: Vec<TeamStats>, n: usize) -> Vec<StatsRow> {
    rank_by_victories(&mut stats);
    stats.truncate(n);
    stats
        .into_iter()
        .map(|stats| StatsRow {
            continent: None,
            stats,
        })
        .collect()
}

/// First `n` teams by victories within each continent, continents in
/// alphabetical order. Teams without a continent are left out.
pub fn continent_top_n(stats: Vec<TeamStats>, continents: &ContinentMap, n: usize) -> Vec<StatsRow> {
    let mut groups: BTreeMap<Continent, Vec<TeamStats>> = BTreeMap::new();
    let mut unmapped = 0usize;

    for team in stats {
        match continents.continent_of(&team.team) {
            Some(continent) => groups.entry(continent).or_default().push(team),
            None => unmapped += 1,
        }
    }

    if unmapped > 0 {
        debug!("{} teams have no continent and are left out", unmapped);
    }

    let mut rows = Vec::new();
    for (continent, mut teams) in groups {
        rank_by_victories(&mut teams);
        rows.extend(teams.into_iter().take(n).map(|stats| StatsRow {
            continent: Some(continent),
            stats,
        }));
    }
    rows
}
