//! Station input table.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::warn;

use fuelgeo_model::{Coordinate, StationRecord};

use crate::error::{IngestError, Result};
use crate::{get_optional, read_csv_rows};

const REQUIRED_COLUMNS: [&str; 3] = ["station_id", "address", "county"];

/// Read station records from a CSV file.
///
/// Required headers: `station_id`, `address`, `county`. Optional:
/// `ground_truth_lat`, `ground_truth_lng`, `municipality`,
/// `location_type`. A blank or unparsable coordinate leaves the ground
/// truth absent; the record is kept and its distances stay undefined.
pub fn read_stations(path: &Path) -> Result<Vec<StationRecord>> {
    let (headers, rows) = read_csv_rows(path)?;

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|header| header == column) {
            return Err(IngestError::MissingColumn(column.to_string()));
        }
    }

    let mut records = Vec::with_capacity(rows.len());
    for row in &rows {
        let id = get_optional(row, "station_id").unwrap_or_default();
        let ground_truth = parse_ground_truth(row, &id);
        records.push(StationRecord {
            id,
            address: get_optional(row, "address").unwrap_or_default(),
            ground_truth,
            county: get_optional(row, "county").unwrap_or_default(),
            municipality: get_optional(row, "municipality"),
            location_type: get_optional(row, "location_type"),
        });
    }
    Ok(records)
}

fn parse_ground_truth(row: &BTreeMap<String, String>, id: &str) -> Option<Coordinate> {
    let lat = get_optional(row, "ground_truth_lat")?;
    let lng = get_optional(row, "ground_truth_lng")?;
    match (lat.parse::<f64>(), lng.parse::<f64>()) {
        (Ok(lat), Ok(lng)) => Some(Coordinate::new(lat, lng)),
        _ => {
            warn!(station = id, lat, lng, "unparsable ground-truth coordinate");
            None
        }
    }
}
