//! Geocoder abstraction for the evaluation pipeline.
//!
//! The pipeline only needs "free-text query in, candidate coordinates
//! out", so the external service is hidden behind the [`Geocoder`]
//! trait. The production implementation is [`GoogleGeocoder`]; tests
//! substitute their own.

mod error;
mod google;

pub use error::{GeocodeError, Result};
pub use google::GoogleGeocoder;

use fuelgeo_model::Coordinate;

/// One candidate result from the external geocoder.
#[derive(Debug, Clone)]
pub struct GeocodeHit {
    pub coordinate: Coordinate,
    /// Free-form precision tag, e.g. "ROOFTOP" or "APPROXIMATE".
    pub location_type: String,
}

/// A free-text geocoding service.
///
/// Implementations may return zero hits (a miss, not an error) or fail
/// with a [`GeocodeError`] on transport/auth problems. Callers treat
/// the two cases differently.
pub trait Geocoder {
    fn geocode(&self, query: &str, region: &str) -> Result<Vec<GeocodeHit>>;
}
