//! Great-circle distance between coordinates.

use fuelgeo_model::Coordinate;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance between two coordinates, in meters.
pub fn haversine_m(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

/// Distance when both coordinates are present; `None` otherwise.
///
/// An absent distance means "incomparable" and must be excluded from
/// aggregation, never treated as zero.
pub fn scored_distance(a: Option<Coordinate>, b: Option<Coordinate>) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(haversine_m(a, b)),
        _ => None,
    }
}
