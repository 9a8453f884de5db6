//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::calculate::{
    AggregateOptions, ColumnBindings, FilterPolicy, FilterVariant, TournamentFilter,
    CONTINENT_TOP_N, GLOBAL_TOP_N,
};
use crate::models::{SelectionPolicy, WinRateFormat};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Aggregation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Filter preset: "total", "official" or "world_cup"
    #[serde(default)]
    pub variant: FilterVariant,

    /// Overrides the preset's scope filter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<TournamentFilter>,

    /// Overrides the preset's victory filter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub victory: Option<TournamentFilter>,

    /// "global_top20" or "continent_top5"
    #[serde(default)]
    pub selection: SelectionPolicy,

    /// Rows kept by the global ranking
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Rows kept per continent
    #[serde(default = "default_per_continent")]
    pub per_continent: usize,

    /// "ratio" or "percent"
    #[serde(default)]
    pub win_rate_format: WinRateFormat,
}

fn default_top_n() -> usize {
    GLOBAL_TOP_N
}

fn default_per_continent() -> usize {
    CONTINENT_TOP_N
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            variant: FilterVariant::default(),
            scope: None,
            victory: None,
            selection: SelectionPolicy::default(),
            top_n: default_top_n(),
            per_continent: default_per_continent(),
            win_rate_format: WinRateFormat::default(),
        }
    }
}

impl StatsConfig {
    /// Preset filters with any explicit overrides applied.
    pub fn policy(&self) -> FilterPolicy {
        let preset = self.variant.policy();
        FilterPolicy {
            scope: self.scope.clone().unwrap_or(preset.scope),
            victory: self.victory.clone().unwrap_or(preset.victory),
        }
    }

    pub fn aggregate_options(&self) -> AggregateOptions {
        AggregateOptions {
            policy: self.policy(),
            selection: self.selection,
            win_rate_format: self.win_rate_format,
            top_n: self.top_n,
            per_continent: self.per_continent,
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Continent mapping file; the bundled mapping is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continents: Option<PathBuf>,

    #[serde(default)]
    pub columns: ColumnBindings,

    #[serde(default)]
    pub stats: StatsConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            continents: None,
            columns: ColumnBindings::default(),
            stats: StatsConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stats.top_n == 0 {
            return Err(ConfigError::ValidationError(
                "top_n must be greater than 0".to_string(),
            ));
        }

        if self.stats.per_continent == 0 {
            return Err(ConfigError::ValidationError(
                "per_continent must be greater than 0".to_string(),
            ));
        }

        let names = self.columns.names();
        if names.iter().any(|n| n.trim().is_empty()) {
            return Err(ConfigError::ValidationError(
                "Column bindings must not be empty".to_string(),
            ));
        }

        let unique: HashSet<_> = names.iter().collect();
        if unique.len() != names.len() {
            return Err(ConfigError::ValidationError(
                "Column bindings must name distinct columns".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FRIENDLY;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.log_level, "info");
        assert_eq!(config.continents, None);
        assert_eq!(config.columns.winner, "winner");
        assert_eq!(config.stats.variant, FilterVariant::Total);
        assert_eq!(config.stats.top_n, 20);
        assert_eq!(config.stats.per_continent, 5);
    }

    #[test]
    fn test_config_validation_ok() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_zero_top_n() {
        let mut config = AppConfig::default();
        config.stats.top_n = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_duplicate_columns() {
        let mut config = AppConfig::default();
        config.columns.away_team = "home_team".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_empty_column() {
        let mut config = AppConfig::default();
        config.columns.tournament = " ".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_policy_overrides() {
        let stats = StatsConfig {
            variant: FilterVariant::Official,
            victory: Some(TournamentFilter::All),
            ..Default::default()
        };

        let policy = stats.policy();
        assert_eq!(policy.scope, TournamentFilter::Except(FRIENDLY.to_string()));
        assert_eq!(policy.victory, TournamentFilter::All);
    }

    #[test]
    fn test_parse_partial_file() {
        let config: AppConfig = toml::from_str(
            r#"
            [columns]
            winner = "result"

            [stats]
            variant = "world_cup"
            selection = "continent_top5"
            win_rate_format = "percent"
            "#,
        )
        .unwrap();

        assert_eq!(config.columns.winner, "result");
        assert_eq!(config.columns.home_team, "home_team");
        assert_eq!(config.stats.variant, FilterVariant::WorldCup);
        assert_eq!(config.stats.selection, SelectionPolicy::ContinentTop5);
        assert_eq!(config.stats.win_rate_format, WinRateFormat::Percent);
        assert_eq!(config.stats.top_n, 20);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();

        // Should be parseable
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "log_level = \"debug\"\n[stats]\ntop_n = 10\n").unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.stats.top_n, 10);
    }

    #[test]
    fn test_from_file_invalid() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[stats]\nper_continent = 0\n").unwrap();

        assert!(matches!(
            AppConfig::from_file(&path),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
