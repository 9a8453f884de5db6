//! Column bindings and conversion of raw tables into typed match records.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{FilterPolicy, StatsError};
use crate::models::{MatchRecord, MatchTable};

/// Names of the source columns holding each match field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnBindings {
    #[serde(default = "default_winner")]
    pub winner: String,

    #[serde(default = "default_home_team")]
    pub home_team: String,

    #[serde(default = "default_away_team")]
    pub away_team: String,

    #[serde(default = "default_home_score")]
    pub home_score: String,

    #[serde(default = "default_away_score")]
    pub away_score: String,

    #[serde(default = "default_tournament")]
    pub tournament: String,
}

fn default_winner() -> String {
    "winner".to_string()
}

fn default_home_team() -> String {
    "home_team".to_string()
}

fn default_away_team() -> String {
    "away_team".to_string()
}

fn default_home_score() -> String {
    "home_score".to_string()
}

fn default_away_score() -> String {
    "away_score".to_string()
}

fn default_tournament() -> String {
    "tournament".to_string()
}

impl Default for ColumnBindings {
    fn default() -> Self {
        Self {
            winner: default_winner(),
            home_team: default_home_team(),
            away_team: default_away_team(),
            home_score: default_home_score(),
            away_score: default_away_score(),
            tournament: default_tournament(),
        }
    }
}

impl ColumnBindings {
    /// All bound column names, tournament last.
    pub fn names(&self) -> [&str; 6] {
        [
            self.winner.as_str(),
            self.home_team.as_str(),
            self.away_team.as_str(),
            self.home_score.as_str(),
            self.away_score.as_str(),
            self.tournament.as_str(),
        ]
    }
}

struct ColumnIndices {
    winner: usize,
    home_team: usize,
    away_team: usize,
    home_score: usize,
    away_score: usize,
    tournament: Option<usize>,
}

fn require(table: &MatchTable, column: &str) -> Result<usize, StatsError> {
    table
        .column_index(column)
        .ok_or_else(|| StatsError::Schema {
            column: column.to_string(),
        })
}

fn resolve(
    table: &MatchTable,
    bindings: &ColumnBindings,
    policy: &FilterPolicy,
) -> Result<ColumnIndices, StatsError> {
    let tournament = if policy.reads_tournament() {
        Some(require(table, &bindings.tournament)?)
    } else {
        table.column_index(&bindings.tournament)
    };

    Ok(ColumnIndices {
        winner: require(table, &bindings.winner)?,
        home_team: require(table, &bindings.home_team)?,
        away_team: require(table, &bindings.away_team)?,
        home_score: require(table, &bindings.home_score)?,
        away_score: require(table, &bindings.away_score)?,
        tournament,
    })
}

/// Parse a goal count. Integral floats ("2.0") are accepted since exported
/// tables often carry scores as floats.
fn parse_score(raw: &str, row: usize, column: &str) -> Result<u32, StatsError> {
    let raw = raw.trim();
    let invalid = || StatsError::InvalidValue {
        row,
        column: column.to_string(),
        value: raw.to_string(),
    };

    let value = match raw.parse::<i64>() {
        Ok(v) => v,
        Err(_) => {
            let f = raw.parse::<f64>().map_err(|_| invalid())?;
            if !f.is_finite() || f.fract() != 0.0 {
                return Err(invalid());
            }
            f as i64
        }
    };

    if value < 0 {
        return Err(StatsError::DataIntegrity {
            row,
            reason: format!("negative score {} in '{}'", value, column),
        });
    }

    u32::try_from(value).map_err(|_| invalid())
}

/// Convert a raw table into typed match records.
///
/// Row numbers in errors are 1-based data rows, not counting the header.
/// A table with neither headers nor rows is empty input, not a schema error.
/// A header-only table must still carry the bound columns: headers without
/// them fail with `Schema` even though there are no rows to read.
/// Row invariants are left to `validate_records`.
pub fn bind_records(
    table: &MatchTable,
    bindings: &ColumnBindings,
    policy: &FilterPolicy,
) -> Result<Vec<MatchRecord>, StatsError> {
    if table.headers.is_empty() && table.rows.is_empty() {
        return Ok(Vec::new());
    }

    let idx = resolve(table, bindings, policy)?;
    let mut records = Vec::with_capacity(table.rows.len());

    for (i, cells) in table.rows.iter().enumerate() {
        let row = i + 1;
        let cell = |col: usize| cells.get(col).map(|c| c.trim()).unwrap_or("");

        let record = MatchRecord {
            home_team: cell(idx.home_team).to_string(),
            away_team: cell(idx.away_team).to_string(),
            home_score: parse_score(cell(idx.home_score), row, &bindings.home_score)?,
            away_score: parse_score(cell(idx.away_score), row, &bindings.away_score)?,
            winner: cell(idx.winner).to_string(),
            tournament: idx.tournament.map(cell).unwrap_or("").to_string(),
        };
        records.push(record);
    }

    debug!("Bound {} match records", records.len());
    Ok(records)
}

/// Reject rows that break the match invariants.
pub fn validate_records(records: &[MatchRecord]) -> Result<(), StatsError> {
    for (i, record) in records.iter().enumerate() {
        if let Some(reason) = record.integrity_issue() {
            return Err(StatsError::DataIntegrity { row: i + 1, reason });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate::FilterVariant;

    fn header(cols: &[&str]) -> Vec<String> {
        cols.iter().map(|c| c.to_string()).collect()
    }

    fn standard_table() -> MatchTable {
        let mut table = MatchTable::new(header(&[
            "home_team",
            "away_team",
            "home_score",
            "away_score",
            "tournament",
            "winner",
        ]));
        table.push_row(header(&["Scotland", "England", "0", "0", "Friendly", "Draw"]));
        table.push_row(header(&["England", "Scotland", "4", "2", "Friendly", "England"]));
        table
    }

    #[test]
    fn test_bind_standard_table() {
        let records = bind_records(
            &standard_table(),
            &ColumnBindings::default(),
            &FilterVariant::Official.policy(),
        )
        .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].home_team, "England");
        assert_eq!(records[1].home_score, 4);
        assert_eq!(records[1].tournament, "Friendly");
    }

    #[test]
    fn test_bind_custom_column_names() {
        let mut table = MatchTable::new(header(&["h", "a", "hs", "as", "w"]));
        table.push_row(header(&["Wales", "Ireland", "2.0", "1", "Wales"]));

        let bindings = ColumnBindings {
            winner: "w".into(),
            home_team: "h".into(),
            away_team: "a".into(),
            home_score: "hs".into(),
            away_score: "as".into(),
            ..Default::default()
        };

        let records = bind_records(&table, &bindings, &FilterVariant::Total.policy()).unwrap();
        assert_eq!(records[0].home_score, 2);
        assert_eq!(records[0].tournament, "");
    }

    #[test]
    fn test_missing_column_names_it() {
        let mut table = MatchTable::new(header(&["home_team", "away_team", "home_score", "away_score"]));
        table.push_row(header(&["Wales", "Ireland", "2", "1"]));

        let err = bind_records(&table, &ColumnBindings::default(), &FilterVariant::Total.policy())
            .unwrap_err();
        assert!(matches!(err, StatsError::Schema { ref column } if column == "winner"));
    }

    #[test]
    fn test_tournament_required_only_when_read() {
        let mut table =
            MatchTable::new(header(&["home_team", "away_team", "home_score", "away_score", "winner"]));
        table.push_row(header(&["Wales", "Ireland", "2", "1", "Wales"]));

        let bindings = ColumnBindings::default();
        assert!(bind_records(&table, &bindings, &FilterVariant::Total.policy()).is_ok());

        let err = bind_records(&table, &bindings, &FilterVariant::WorldCup.policy()).unwrap_err();
        assert!(matches!(err, StatsError::Schema { ref column } if column == "tournament"));
    }

    #[test]
    fn test_non_integer_score() {
        let mut table = standard_table();
        table.push_row(header(&["Wales", "Ireland", "two", "1", "Friendly", "Wales"]));

        let err = bind_records(&table, &ColumnBindings::default(), &FilterVariant::Total.policy())
            .unwrap_err();
        assert!(matches!(err, StatsError::InvalidValue { row: 3, .. }));
    }

    #[test]
    fn test_fractional_score_rejected() {
        let mut table = standard_table();
        table.push_row(header(&["Wales", "Ireland", "1.5", "1", "Friendly", "Wales"]));

        let err = bind_records(&table, &ColumnBindings::default(), &FilterVariant::Total.policy())
            .unwrap_err();
        assert!(matches!(err, StatsError::InvalidValue { .. }));
    }

    #[test]
    fn test_negative_score() {
        let mut table = standard_table();
        table.push_row(header(&["Wales", "Ireland", "1", "-1", "Friendly", "Wales"]));

        let err = bind_records(&table, &ColumnBindings::default(), &FilterVariant::Total.policy())
            .unwrap_err();
        assert!(matches!(err, StatsError::DataIntegrity { row: 3, .. }));
    }

    #[test]
    fn test_unknown_winner_rejected() {
        let mut table = standard_table();
        table.push_row(header(&["Wales", "Ireland", "1", "0", "Friendly", "Scotland"]));

        let records =
            bind_records(&table, &ColumnBindings::default(), &FilterVariant::Total.policy())
                .unwrap();
        assert_eq!(records.len(), 3);

        let err = validate_records(&records).unwrap_err();
        assert!(matches!(err, StatsError::DataIntegrity { row: 3, .. }));
    }

    #[test]
    fn test_empty_table_is_not_an_error() {
        let records = bind_records(
            &MatchTable::default(),
            &ColumnBindings::default(),
            &FilterVariant::Official.policy(),
        )
        .unwrap();
        assert!(records.is_empty());

        let headers_only = MatchTable::new(standard_table().headers);
        let records = bind_records(
            &headers_only,
            &ColumnBindings::default(),
            &FilterVariant::Official.policy(),
        )
        .unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_header_only_table_without_bound_columns() {
        let table = MatchTable::new(header(&["date", "home_team"]));
        let err = bind_records(&table, &ColumnBindings::default(), &FilterVariant::Total.policy())
            .unwrap_err();
        assert!(matches!(err, StatsError::Schema { ref column } if column == "winner"));
    }

    #[test]
    fn test_binding_names() {
        let bindings = ColumnBindings::default();
        let names = bindings.names();
        assert_eq!(names[0], "winner");
        assert_eq!(names[5], "tournament");
    }
}
