//! Geolocation providers for the marketplace.
//!
//! Two implementations of the [`Geocoder`] trait are provided: [`CityTable`],
//! a static name-to-coordinate lookup shipped as YAML config, and
//! [`NominatimClient`], an HTTP client for a Nominatim-compatible geocoding
//! service. Discovery itself only ever consumes a resolved [`Coordinate`];
//! callers that fail to geocode fall back to the table's default position or
//! run discovery without a location.

mod client;
mod table;

use mercado_core::Coordinate;
use thiserror::Error;

pub use client::NominatimClient;
pub use table::CityTable;

#[derive(Debug, Error)]
pub enum GeoError {
    #[error("failed to read cities file at {path}: {source}")]
    CitiesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse cities file: {0}")]
    CitiesFileParse(#[from] serde_yaml::Error),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("invalid geocoder base URL '{0}'")]
    InvalidBaseUrl(String),
    #[error("geocoding request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("failed to deserialize geocoder response ({context}): {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Resolves free text (a city name, an address) to a coordinate.
///
/// `Ok(None)` means the provider answered but knows no such place; callers
/// decide whether to fall back or surface the miss. Transport and parse
/// failures are errors.
pub trait Geocoder {
    fn geocode(
        &self,
        query: &str,
    ) -> impl std::future::Future<Output = Result<Option<Coordinate>, GeoError>> + Send;
}

/// Resolves a place name through the static table first, then the remote
/// geocoder when one is configured.
///
/// The table answers the common Brazilian-city queries without a network
/// round-trip; anything it misses goes to the remote service. A remote
/// failure is logged and treated as a miss, so callers see `None` rather
/// than an error they cannot act on.
pub async fn resolve_place(
    table: &CityTable,
    remote: Option<&NominatimClient>,
    query: &str,
) -> Option<Coordinate> {
    if let Some(coordinate) = table.lookup(query) {
        return Some(coordinate);
    }

    let remote = remote?;
    match remote.search(query).await {
        Ok(result) => result,
        Err(e) => {
            tracing::warn!(query, error = %e, "remote geocode failed, treating as miss");
            None
        }
    }
}
