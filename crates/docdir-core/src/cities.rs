//! City → listing-URL input map.
//!
//! Loaded once before any crawl begins. A missing or malformed file is a
//! fatal startup condition — the process exits without attempting a
//! partial crawl.

use std::collections::BTreeMap;
use std::path::Path;

use crate::ConfigError;

/// City name → listing search URL. Ordered so runs process cities in a
/// stable order regardless of file layout.
pub type CityMap = BTreeMap<String, String>;

/// One crawl input: a city and its listing search URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTarget {
    pub city: String,
    pub listing_url: String,
}

/// Parse the cities map from JSON content.
///
/// # Errors
///
/// Returns `ConfigError` if the content is not a JSON object of strings or
/// the map is empty.
pub fn parse_cities(content: &str) -> Result<CityMap, ConfigError> {
    let map: CityMap = serde_json::from_str(content)?;
    if map.is_empty() {
        return Err(ConfigError::EmptyCities);
    }
    Ok(map)
}

/// Load the cities map from a JSON file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read or parsed.
pub fn load_cities(path: &Path) -> Result<CityMap, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CitiesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_cities(&content)
}

/// Resolve the targets for a run.
///
/// With `city_filter = Some(name)` the run is restricted to that city;
/// a name absent from the map is a fatal error. With `None`, every
/// configured city is targeted.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownCity`] if the filter names an
/// unconfigured city.
pub fn targets_for(map: &CityMap, city_filter: Option<&str>) -> Result<Vec<SearchTarget>, ConfigError> {
    match city_filter {
        Some(city) => {
            let url = map
                .get(city)
                .ok_or_else(|| ConfigError::UnknownCity(city.to_string()))?;
            Ok(vec![SearchTarget {
                city: city.to_string(),
                listing_url: url.clone(),
            }])
        }
        None => Ok(map
            .iter()
            .map(|(city, url)| SearchTarget {
                city: city.clone(),
                listing_url: url.clone(),
            })
            .collect()),
    }
}
