use std::collections::HashMap;
use std::path::Path;

use mercado_core::Coordinate;
use serde::Deserialize;

use crate::{GeoError, Geocoder};

#[derive(Debug, Deserialize)]
struct CityEntry {
    name: String,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct CitiesFile {
    /// Name of the entry used when a caller wants "somewhere sensible"
    /// after a failed device-location or geocode attempt.
    fallback: String,
    cities: Vec<CityEntry>,
}

/// Static city-to-coordinate table loaded from `config/cities.yaml`.
///
/// Lookup is case-insensitive on the configured display name. The table is
/// data, not code, so a deployment can extend its coverage without touching
/// the engine, and swap in a real geocoding service behind the same trait.
#[derive(Debug, Clone)]
pub struct CityTable {
    entries: HashMap<String, Coordinate>,
    fallback: Coordinate,
}

impl CityTable {
    /// Load and validate the city table from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `GeoError` if the file cannot be read or parsed, if any
    /// coordinate is out of range, if names collide case-insensitively, or
    /// if the declared fallback names no entry.
    pub fn load(path: &Path) -> Result<Self, GeoError> {
        let content = std::fs::read_to_string(path).map_err(|e| GeoError::CitiesFileIo {
            path: path.display().to_string(),
            source: e,
        })?;
        let file: CitiesFile = serde_yaml::from_str(&content)?;
        Self::from_file(file)
    }

    fn from_file(file: CitiesFile) -> Result<Self, GeoError> {
        if file.cities.is_empty() {
            return Err(GeoError::Validation(
                "cities file must declare at least one city".to_string(),
            ));
        }

        let mut entries = HashMap::with_capacity(file.cities.len());
        for city in &file.cities {
            if city.name.trim().is_empty() {
                return Err(GeoError::Validation(
                    "city name must be non-empty".to_string(),
                ));
            }
            if !(-90.0..=90.0).contains(&city.latitude)
                || !(-180.0..=180.0).contains(&city.longitude)
            {
                return Err(GeoError::Validation(format!(
                    "city '{}' has out-of-range coordinates ({}, {})",
                    city.name, city.latitude, city.longitude
                )));
            }
            let key = city.name.to_lowercase();
            if entries
                .insert(key, Coordinate::new(city.latitude, city.longitude))
                .is_some()
            {
                return Err(GeoError::Validation(format!(
                    "duplicate city name: '{}'",
                    city.name
                )));
            }
        }

        let fallback = entries
            .get(&file.fallback.to_lowercase())
            .copied()
            .ok_or_else(|| {
                GeoError::Validation(format!(
                    "fallback '{}' does not match any configured city",
                    file.fallback
                ))
            })?;

        Ok(Self { entries, fallback })
    }

    /// Case-insensitive lookup of a configured city name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Coordinate> {
        self.entries.get(&name.trim().to_lowercase()).copied()
    }

    /// The configured default position, used when device location or a
    /// geocode lookup fails and discovery should still proceed.
    #[must_use]
    pub fn fallback(&self) -> Coordinate {
        self.fallback
    }

    /// Number of configured cities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Geocoder for CityTable {
    async fn geocode(&self, query: &str) -> Result<Option<Coordinate>, GeoError> {
        Ok(self.lookup(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
fallback: "São Paulo, SP"
cities:
  - name: "São Paulo, SP"
    latitude: -23.5505
    longitude: -46.6333
  - name: "Rio de Janeiro, RJ"
    latitude: -22.9068
    longitude: -43.1729
"#;

    fn sample_table() -> CityTable {
        let file: CitiesFile = serde_yaml::from_str(SAMPLE).expect("parse sample");
        CityTable::from_file(file).expect("valid sample")
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let table = sample_table();
        let hit = table.lookup("são paulo, sp").expect("found");
        assert!((hit.latitude + 23.5505).abs() < 1e-9);
    }

    #[test]
    fn lookup_trims_whitespace() {
        let table = sample_table();
        assert!(table.lookup("  Rio de Janeiro, RJ ").is_some());
    }

    #[test]
    fn unknown_city_returns_none() {
        let table = sample_table();
        assert!(table.lookup("Curitiba, PR").is_none());
    }

    #[test]
    fn fallback_resolves_to_configured_entry() {
        let table = sample_table();
        let fallback = table.fallback();
        assert!((fallback.longitude + 46.6333).abs() < 1e-9);
    }

    #[test]
    fn rejects_unknown_fallback() {
        let file: CitiesFile = serde_yaml::from_str(
            "fallback: \"Nowhere\"\ncities:\n  - name: \"A\"\n    latitude: 0.0\n    longitude: 0.0\n",
        )
        .expect("parse");
        let err = CityTable::from_file(file).unwrap_err();
        assert!(err.to_string().contains("fallback"));
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        let file: CitiesFile = serde_yaml::from_str(
            "fallback: \"A\"\ncities:\n  - name: \"A\"\n    latitude: 91.0\n    longitude: 0.0\n",
        )
        .expect("parse");
        let err = CityTable::from_file(file).unwrap_err();
        assert!(err.to_string().contains("out-of-range"));
    }

    #[test]
    fn rejects_duplicate_names() {
        let file: CitiesFile = serde_yaml::from_str(
            "fallback: \"A\"\ncities:\n  - name: \"A\"\n    latitude: 0.0\n    longitude: 0.0\n  - name: \"a\"\n    latitude: 1.0\n    longitude: 1.0\n",
        )
        .expect("parse");
        let err = CityTable::from_file(file).unwrap_err();
        assert!(err.to_string().contains("duplicate city name"));
    }

    #[test]
    fn load_cities_from_shipped_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("config")
            .join("cities.yaml");
        assert!(
            path.exists(),
            "cities.yaml missing at {path:?} — required for this test"
        );
        let table = CityTable::load(&path).expect("shipped cities.yaml should load");
        assert!(!table.is_empty());
    }
}
