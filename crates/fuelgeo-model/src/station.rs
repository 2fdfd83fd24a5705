//! Input entities for one evaluation pass.

use serde::{Deserialize, Serialize};

use crate::outcome::Coordinate;

/// One fuel station as read from the input table.
///
/// Records are immutable once created; the pipeline never writes back
/// into them. A missing ground-truth coordinate is legal and simply
/// leaves every distance for the record undefined.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationRecord {
    /// Stable station identifier from the source table.
    pub id: String,
    /// Raw highway-kilometer address, as entered.
    pub address: String,
    /// Independently verified coordinate, when known.
    pub ground_truth: Option<Coordinate>,
    /// Administrative region (county) label, appended to geocode queries.
    pub county: String,
    /// Municipality label, carried through to the marker export.
    pub municipality: Option<String>,
    /// Geocoder location type recorded for the ground-truth fix, if any.
    pub location_type: Option<String>,
}

impl StationRecord {
    pub fn new(
        id: impl Into<String>,
        address: impl Into<String>,
        ground_truth: Option<Coordinate>,
        county: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            address: address.into(),
            ground_truth,
            county: county.into(),
            municipality: None,
            location_type: None,
        }
    }
}
