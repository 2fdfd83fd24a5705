//! Google Geocoding API client.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

use fuelgeo_model::Coordinate;

use crate::error::{GeocodeError, Result};
use crate::{GeocodeHit, Geocoder};

/// Environment variable holding the API key.
pub const API_KEY_ENV_VAR: &str = "GOOGLE_MAPS_API_KEY";

/// Default endpoint of the Google Geocoding API.
const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking client for the Google Geocoding API.
pub struct GoogleGeocoder {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Deserialize)]
struct Geometry {
    location: Location,
    location_type: String,
}

#[derive(Deserialize)]
struct Location {
    lat: f64,
    lng: f64,
}

impl GoogleGeocoder {
    /// Create a client with an explicit API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Create a client from the `GOOGLE_MAPS_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let key = std::env::var(API_KEY_ENV_VAR).map_err(|_| GeocodeError::MissingApiKey)?;
        Self::new(key)
    }

    /// Override the endpoint URL (used by tests and proxies).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Geocoder for GoogleGeocoder {
    fn geocode(&self, query: &str, region: &str) -> Result<Vec<GeocodeHit>> {
        debug!(query, region, "geocode request");
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("address", query),
                ("region", region),
                ("key", &self.api_key),
            ])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Status(status.as_u16()));
        }

        let body: GeocodeResponse = serde_json::from_str(&response.text()?)?;
        match body.status.as_str() {
            // ZERO_RESULTS is a miss, not an error; callers record it
            // with the FAILED sentinel.
            "OK" | "ZERO_RESULTS" => Ok(body
                .results
                .into_iter()
                .map(|result| GeocodeHit {
                    coordinate: Coordinate::new(
                        result.geometry.location.lat,
                        result.geometry.location.lng,
                    ),
                    location_type: result.geometry.location_type,
                })
                .collect()),
            other => Err(GeocodeError::Rejected(
                body.error_message.unwrap_or_else(|| other.to_string()),
            )),
        }
    }
}
