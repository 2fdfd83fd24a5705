//! Geocoding outcomes and coordinates.

use serde::{Deserialize, Serialize};

/// Sentinel accuracy tags recorded when the geocoder produced nothing.
pub mod accuracy {
    /// The geocoder returned an empty result list.
    pub const FAILED: &str = "FAILED";
    /// The geocoder call itself raised an error.
    pub const ERROR: &str = "ERROR";
}

/// A WGS84 coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Result of geocoding one normalized address for one record.
///
/// `distance_m` is present only when both the geocoder coordinate and
/// the record's ground truth exist. An absent distance means
/// "incomparable", never zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodeOutcome {
    /// The normalized address that was queried.
    pub address: String,
    /// Coordinate of the first geocoder hit, absent on miss or error.
    pub coordinate: Option<Coordinate>,
    /// Free-form precision tag from the geocoder, or a sentinel from
    /// [`accuracy`].
    pub accuracy: String,
    /// Great-circle distance to ground truth in meters.
    pub distance_m: Option<f64>,
}

impl GeocodeOutcome {
    /// Outcome for an empty geocoder result list.
    pub fn failed(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            coordinate: None,
            accuracy: accuracy::FAILED.to_string(),
            distance_m: None,
        }
    }

    /// Outcome for a geocoder call that raised an error.
    pub fn errored(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            coordinate: None,
            accuracy: accuracy::ERROR.to_string(),
            distance_m: None,
        }
    }
}
