//! Map-marker bundle for the Leaflet viewer.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use fuelgeo_model::StationRecord;

#[derive(Serialize)]
struct Marker<'a> {
    id: &'a str,
    lat: f64,
    lon: f64,
    loc_type: Option<&'a str>,
    address: &'a str,
    municipality: Option<&'a str>,
    county: &'a str,
}

#[derive(Serialize)]
struct MissingRow<'a> {
    id: &'a str,
    address: &'a str,
    reason: &'static str,
}

/// Write `markers.js` declaring three constants: `STATIONS` with every
/// record that has a coordinate, `NON_ROOFTOP` with the subset whose
/// location type is not `ROOFTOP`, and `MISSING_ROWS` with the records
/// that have no coordinate.
pub fn write_markers_js(path: &Path, records: &[StationRecord]) -> Result<()> {
    let mut stations = Vec::new();
    let mut missing = Vec::new();

    for record in records {
        match record.ground_truth {
            Some(coordinate) => stations.push(Marker {
                id: &record.id,
                lat: coordinate.lat,
                lon: coordinate.lon,
                loc_type: record.location_type.as_deref(),
                address: &record.address,
                municipality: record.municipality.as_deref(),
                county: &record.county,
            }),
            None => missing.push(MissingRow {
                id: &record.id,
                address: &record.address,
                reason: "missing_coords",
            }),
        }
    }

    let non_rooftop: Vec<&Marker<'_>> = stations
        .iter()
        .filter(|marker| {
            marker
                .loc_type
                .is_some_and(|t| !t.trim().eq_ignore_ascii_case("ROOFTOP"))
        })
        .collect();

    let mut out = String::from("// Auto-generated markers\n");
    out.push_str("const STATIONS = ");
    out.push_str(&serde_json::to_string_pretty(&stations).context("serializing stations")?);
    out.push_str(";\n\nconst NON_ROOFTOP = ");
    out.push_str(&serde_json::to_string_pretty(&non_rooftop).context("serializing non-rooftop")?);
    out.push_str(";\n\nconst MISSING_ROWS = ");
    out.push_str(&serde_json::to_string_pretty(&missing).context("serializing missing rows")?);
    out.push_str(";\n");

    std::fs::write(path, out)
        .with_context(|| format!("writing marker file {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fuelgeo_model::Coordinate;

    fn records() -> Vec<StationRecord> {
        let mut with_coords = StationRecord::new(
            "ST-1",
            "68ο ΧΛΜ Αθηνών Λαμίας",
            Some(Coordinate::new(38.45, 23.11)),
            "Φθιώτιδας",
        );
        with_coords.location_type = Some("GEOMETRIC_CENTER".to_string());
        with_coords.municipality = Some("Καμένα Βούρλα".to_string());

        let mut rooftop = StationRecord::new(
            "ST-2",
            "5ο χλμ Λάρισας Βόλου",
            Some(Coordinate::new(39.61, 22.46)),
            "Λάρισας",
        );
        rooftop.location_type = Some("ROOFTOP".to_string());

        let without_coords =
            StationRecord::new("ST-3", "ΦΑΡΣΑΛΑ - ΛΑΜΙΑ ?", None, "Λάρισας");
        vec![with_coords, rooftop, without_coords]
    }

    #[test]
    fn splits_records_into_three_constants() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("markers.js");
        write_markers_js(&path, &records()).expect("write markers");

        let content = std::fs::read_to_string(&path).expect("read file");
        assert!(content.starts_with("// Auto-generated markers\n"));

        let section = |name: &str| -> serde_json::Value {
            let start = content
                .find(&format!("const {name} = "))
                .expect("section start")
                + format!("const {name} = ").len();
            let end = content[start..].find(";\n").expect("section end") + start;
            serde_json::from_str(&content[start..end]).expect("section json")
        };

        let stations = section("STATIONS");
        assert_eq!(stations.as_array().map(Vec::len), Some(2));
        assert_eq!(stations[0]["id"], "ST-1");
        assert_eq!(stations[0]["municipality"], "Καμένα Βούρλα");

        let non_rooftop = section("NON_ROOFTOP");
        assert_eq!(non_rooftop.as_array().map(Vec::len), Some(1));
        assert_eq!(non_rooftop[0]["loc_type"], "GEOMETRIC_CENTER");

        let missing = section("MISSING_ROWS");
        assert_eq!(missing.as_array().map(Vec::len), Some(1));
        assert_eq!(missing[0]["reason"], "missing_coords");
    }
}
