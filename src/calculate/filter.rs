//! Row filters deciding which matches count toward which tallies.

use serde::{Deserialize, Serialize};

use crate::models::{MatchRecord, FRIENDLY, WORLD_CUP};

/// Predicate over a match's tournament label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TournamentFilter {
    /// Every row passes
    #[default]
    All,
    /// Only rows with this tournament label
    Only(String),
    /// Every row except those with this tournament label
    Except(String),
}

impl TournamentFilter {
    pub fn matches(&self, record: &MatchRecord) -> bool {
        match self {
            TournamentFilter::All => true,
            TournamentFilter::Only(label) => record.tournament == *label,
            TournamentFilter::Except(label) => record.tournament != *label,
        }
    }

    /// Returns true if the filter looks at the tournament column at all.
    pub fn reads_tournament(&self) -> bool {
        !matches!(self, TournamentFilter::All)
    }
}

impl std::fmt::Display for TournamentFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentFilter::All => write!(f, "all"),
            TournamentFilter::Only(label) => write!(f, "only '{}'", label),
            TournamentFilter::Except(label) => write!(f, "except '{}'", label),
        }
    }
}

/// Pair of filters: `scope` selects rows counted toward matches played and
/// goals, `victory` further restricts the rows counted toward victories.
///
/// A victory is only ever counted for a row that is in scope and not a draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FilterPolicy {
    #[serde(default)]
    pub scope: TournamentFilter,

    #[serde(default)]
    pub victory: TournamentFilter,
}

impl FilterPolicy {
    pub fn new(scope: TournamentFilter, victory: TournamentFilter) -> Self {
        Self { scope, victory }
    }

    pub fn in_scope(&self, record: &MatchRecord) -> bool {
        self.scope.matches(record)
    }

    pub fn counts_victory(&self, record: &MatchRecord) -> bool {
        !record.is_draw() && self.scope.matches(record) && self.victory.matches(record)
    }

    /// Returns true if the tournament column must be present.
    pub fn reads_tournament(&self) -> bool {
        self.scope.reads_tournament() || self.victory.reads_tournament()
    }
}

/// Named filter presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FilterVariant {
    /// All matches
    #[default]
    Total,
    /// Everything but friendlies
    Official,
    /// World Cup finals matches only
    WorldCup,
}

impl FilterVariant {
    pub fn policy(&self) -> FilterPolicy {
        match self {
            FilterVariant::Total => FilterPolicy::new(TournamentFilter::All, TournamentFilter::All),
            FilterVariant::Official => FilterPolicy::new(
                TournamentFilter::Except(FRIENDLY.to_string()),
                TournamentFilter::Except(FRIENDLY.to_string()),
            ),
            FilterVariant::WorldCup => FilterPolicy::new(
                TournamentFilter::Only(WORLD_CUP.to_string()),
                TournamentFilter::Only(WORLD_CUP.to_string()),
            ),
        }
    }
}

impl std::fmt::Display for FilterVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterVariant::Total => write!(f, "total"),
            FilterVariant::Official => write!(f, "official"),
            FilterVariant::WorldCup => write!(f, "world_cup"),
        }
    }
}

impl std::str::FromStr for FilterVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "total" => Ok(FilterVariant::Total),
            "official" => Ok(FilterVariant::Official),
            "world_cup" | "worldcup" => Ok(FilterVariant::WorldCup),
            _ => Err(format!(
                "Unknown filter variant: {}. Use total, official, or world_cup.",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DRAW;

    fn row(winner: &str, tournament: &str) -> MatchRecord {
        MatchRecord::new("Mexico", "Canada", 1, 0, winner, tournament)
    }

    #[test]
    fn test_total_counts_everything_but_draws() {
        let policy = FilterVariant::Total.policy();

        assert!(policy.in_scope(&row("Mexico", FRIENDLY)));
        assert!(policy.in_scope(&row(DRAW, WORLD_CUP)));
        assert!(policy.counts_victory(&row("Mexico", FRIENDLY)));
        assert!(!policy.counts_victory(&row(DRAW, FRIENDLY)));
        assert!(!policy.reads_tournament());
    }

    #[test]
    fn test_official_excludes_friendlies_and_draws() {
        let policy = FilterVariant::Official.policy();

        assert!(!policy.in_scope(&row("Mexico", FRIENDLY)));
        assert!(policy.in_scope(&row("Mexico", "Gold Cup")));
        assert!(!policy.counts_victory(&row("Mexico", FRIENDLY)));
        assert!(!policy.counts_victory(&row(DRAW, "Gold Cup")));
        assert!(policy.counts_victory(&row("Mexico", "Gold Cup")));
        assert!(policy.reads_tournament());
    }

    #[test]
    fn test_world_cup_requires_label() {
        let policy = FilterVariant::WorldCup.policy();

        assert!(policy.in_scope(&row("Mexico", WORLD_CUP)));
        assert!(!policy.in_scope(&row("Mexico", "FIFA World Cup qualification")));
        assert!(policy.counts_victory(&row("Canada", WORLD_CUP)));
        assert!(!policy.counts_victory(&row(DRAW, WORLD_CUP)));
    }

    #[test]
    fn test_victory_never_counts_outside_scope() {
        let policy = FilterPolicy::new(
            TournamentFilter::Except(FRIENDLY.to_string()),
            TournamentFilter::All,
        );
        assert!(!policy.counts_victory(&row("Mexico", FRIENDLY)));
    }

    #[test]
    fn test_filter_variant_from_str() {
        assert_eq!("total".parse::<FilterVariant>(), Ok(FilterVariant::Total));
        assert_eq!("Official".parse::<FilterVariant>(), Ok(FilterVariant::Official));
        assert_eq!("world-cup".parse::<FilterVariant>(), Ok(FilterVariant::WorldCup));
        assert!("friendly".parse::<FilterVariant>().is_err());
    }

    #[test]
    fn test_tournament_filter_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            policy: FilterPolicy,
        }

        let parsed: Wrapper = toml::from_str(
            r#"
            [policy]
            scope = "all"
            victory = { only = "Copa América" }
            "#,
        )
        .unwrap();

        assert_eq!(parsed.policy.scope, TournamentFilter::All);
        assert_eq!(
            parsed.policy.victory,
            TournamentFilter::Only("Copa América".to_string())
        );
    }
}
