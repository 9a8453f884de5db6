//! Continent reference data for grouped views.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Continental grouping of national teams.
///
/// Variant order is alphabetical, so the derived `Ord` is the order grouped
/// output is emitted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Continent {
    Africa,
    America,
    Asia,
    Europe,
    Oceania,
}

impl Continent {
    pub const ALL: [Continent; 5] = [
        Continent::Africa,
        Continent::America,
        Continent::Asia,
        Continent::Europe,
        Continent::Oceania,
    ];
}

impl std::fmt::Display for Continent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Continent::Africa => write!(f, "Africa"),
            Continent::America => write!(f, "America"),
            Continent::Asia => write!(f, "Asia"),
            Continent::Europe => write!(f, "Europe"),
            Continent::Oceania => write!(f, "Oceania"),
        }
    }
}

/// Lookup from team name to continent.
///
/// The mapping is incomplete by nature; teams it does not know are simply
/// absent and drop out of continent-grouped views.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContinentMap {
    #[serde(default)]
    teams: BTreeMap<String, Continent>,
}

impl ContinentMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mapping from (team, continent) pairs. Later pairs win.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, Continent)>,
        S: Into<String>,
    {
        Self {
            teams: pairs.into_iter().map(|(t, c)| (t.into(), c)).collect(),
        }
    }

    /// Merge another mapping on top of this one.
    pub fn extend(&mut self, other: ContinentMap) {
        self.teams.extend(other.teams);
    }

    pub fn continent_of(&self, team: &str) -> Option<Continent> {
        self.teams.get(team).copied()
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Iterate teams in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Continent)> {
        self.teams.iter().map(|(t, c)| (t.as_str(), *c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_continent_order_is_alphabetical() {
        let mut names: Vec<String> = Continent::ALL.iter().map(|c| c.to_string()).collect();
        let rendered = names.clone();
        names.sort();
        assert_eq!(names, rendered);

        let mut sorted = vec![Continent::Oceania, Continent::Africa, Continent::Europe];
        sorted.sort();
        assert_eq!(
            sorted,
            vec![Continent::Africa, Continent::Europe, Continent::Oceania]
        );
    }

    #[test]
    fn test_continent_map_lookup() {
        let map = ContinentMap::from_pairs([
            ("Brazil", Continent::America),
            ("Japan", Continent::Asia),
        ]);

        assert_eq!(map.continent_of("Brazil"), Some(Continent::America));
        assert_eq!(map.continent_of("Japan"), Some(Continent::Asia));
        assert_eq!(map.continent_of("Atlantis"), None);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_continent_map_extend_overrides() {
        let mut map = ContinentMap::from_pairs([("Australia", Continent::Oceania)]);
        map.extend(ContinentMap::from_pairs([("Australia", Continent::Asia)]));
        assert_eq!(map.continent_of("Australia"), Some(Continent::Asia));
    }

    #[test]
    fn test_continent_serialization() {
        let json = serde_json::to_string(&Continent::Europe).unwrap();
        assert_eq!(json, "\"Europe\"");

        let deserialized: Continent = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, Continent::Europe);
    }
}
