//! HTTP client for a Nominatim-compatible geocoding service.
//!
//! Wraps `reqwest` with typed deserialization and the error taxonomy in
//! [`GeoError`]. Nominatim returns latitude and longitude as JSON strings;
//! the client parses them and rejects out-of-range values rather than handing
//! the engine a garbage coordinate.

use std::time::Duration;

use mercado_core::Coordinate;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::{GeoError, Geocoder};

/// One result row from the Nominatim `search` endpoint.
#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

/// Client for a Nominatim-compatible geocoding API.
///
/// Use [`NominatimClient::new`] with the configured base URL; tests point it
/// at a wiremock server.
pub struct NominatimClient {
    client: Client,
    base_url: Url,
}

impl NominatimClient {
    /// Creates a new client against the given base URL.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`GeoError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, GeoError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // joining "search" appends a path segment instead of replacing one.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|_| GeoError::InvalidBaseUrl(base_url.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// Free-text forward geocode, returning the best match if any.
    ///
    /// # Errors
    ///
    /// - [`GeoError::Http`] on network failure or non-2xx HTTP status.
    /// - [`GeoError::Deserialize`] if the response body does not match the
    ///   expected shape or carries unparseable coordinates.
    pub async fn search(&self, query: &str) -> Result<Option<Coordinate>, GeoError> {
        let mut url = self
            .base_url
            .join("search")
            .map_err(|_| GeoError::InvalidBaseUrl(self.base_url.to_string()))?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("format", "json")
            .append_pair("limit", "1");

        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let places: Vec<Place> =
            serde_json::from_str(&body).map_err(|e| GeoError::Deserialize {
                context: format!("search(q={query})"),
                source: e,
            })?;

        let Some(place) = places.into_iter().next() else {
            return Ok(None);
        };

        let coordinate = parse_place(&place).map_err(|reason| GeoError::Deserialize {
            context: format!("search(q={query})"),
            source: serde_json::Error::io(std::io::Error::other(reason)),
        })?;
        Ok(Some(coordinate))
    }
}

fn parse_place(place: &Place) -> Result<Coordinate, String> {
    let latitude: f64 = place
        .lat
        .parse()
        .map_err(|_| format!("latitude '{}' is not a number", place.lat))?;
    let longitude: f64 = place
        .lon
        .parse()
        .map_err(|_| format!("longitude '{}' is not a number", place.lon))?;

    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(format!("coordinates ({latitude}, {longitude}) out of range"));
    }

    Ok(Coordinate::new(latitude, longitude))
}

impl Geocoder for NominatimClient {
    async fn geocode(&self, query: &str) -> Result<Option<Coordinate>, GeoError> {
        self.search(query).await
    }
}
