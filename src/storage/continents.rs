//! Continent mapping files.
//!
//! ```toml
//! [teams]
//! "Brazil" = "America"
//! "Japan" = "Asia"
//! ```

use std::path::Path;

use tracing::debug;

use super::StorageError;
use crate::models::ContinentMap;

/// Reference mapping compiled into the binary.
const BUNDLED_CONTINENTS: &str = include_str!("../../data/continents.toml");

/// Parse a mapping from TOML text.
pub fn parse_continent_map(contents: &str) -> Result<ContinentMap, StorageError> {
    let map: ContinentMap = toml::from_str(contents)?;
    Ok(map)
}

/// Load a mapping from a TOML file.
pub fn load_continent_map(path: &Path) -> Result<ContinentMap, StorageError> {
    let contents = std::fs::read_to_string(path)?;
    let map = parse_continent_map(&contents)?;
    debug!("Loaded {} continent entries from {:?}", map.len(), path);
    Ok(map)
}

/// The bundled reference mapping of national teams.
pub fn bundled_continent_map() -> Result<ContinentMap, StorageError> {
    parse_continent_map(BUNDLED_CONTINENTS)
}
