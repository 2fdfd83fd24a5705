//! Wide result tables written by a previous evaluation run.

use std::collections::BTreeMap;
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::Result;

/// One row of a wide results table.
#[derive(Debug, Clone)]
pub struct ResultsRow {
    pub station_id: String,
    pub address: String,
    /// Distance per variant; absent when the cell was blank.
    pub distances: BTreeMap<String, Option<f64>>,
}

impl ResultsRow {
    /// Distance for one variant, absent when unknown or not recorded.
    pub fn distance(&self, variant: &str) -> Option<f64> {
        self.distances.get(variant).copied().flatten()
    }
}

/// A wide results table plus the variant names discovered in it.
#[derive(Debug, Clone)]
pub struct ResultsTable {
    /// Variants in header order; ties elsewhere keep this order.
    pub variants: Vec<String>,
    pub rows: Vec<ResultsRow>,
}

/// Read a wide results CSV.
///
/// Variant names are discovered from `<variant>_distance` headers,
/// skipping the appended `best_*` and raw `original_*` columns, in
/// header order.
pub fn read_results(path: &Path) -> Result<ResultsTable> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_matches('\u{feff}').trim().to_string())
        .collect();

    let variants: Vec<String> = headers
        .iter()
        .filter_map(|header| header.strip_suffix("_distance"))
        .filter(|name| !name.starts_with("best") && !name.starts_with("original"))
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let field = |name: &str| -> String {
            headers
                .iter()
                .position(|h| h == name)
                .and_then(|idx| record.get(idx))
                .unwrap_or("")
                .trim()
                .to_string()
        };

        let mut distances = BTreeMap::new();
        for variant in &variants {
            let cell = field(&format!("{variant}_distance"));
            distances.insert(variant.clone(), cell.parse::<f64>().ok());
        }
        rows.push(ResultsRow {
            station_id: field("station_id"),
            address: field("address"),
            distances,
        });
    }

    Ok(ResultsTable { variants, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn discovers_variants_and_parses_blank_distances() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(
            "station_id,address,v1_original_distance,v20_km_city1_city2_distance,best_distance\n\
             ST-1,68ο ΧΛΜ Αθηνών Λαμίας,1500.0,120.5,120.5\n\
             ST-2,ΦΑΡΣΑΛΑ - ΛΑΜΙΑ ?,800.0,,800.0\n"
                .as_bytes(),
        )
        .expect("write csv");

        let table = read_results(file.path()).expect("read results");
        assert_eq!(table.variants, vec!["v1_original", "v20_km_city1_city2"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].distance("v20_km_city1_city2"), Some(120.5));
        assert_eq!(table.rows[1].distance("v20_km_city1_city2"), None);
        assert_eq!(table.rows[1].distance("v1_original"), Some(800.0));
    }
}
