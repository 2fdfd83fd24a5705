//! CSV ingestion for the evaluation pipeline.
//!
//! Two readers live here: [`read_stations`] for the raw input table
//! and [`read_results`] for wide result tables written by an earlier
//! evaluation run. Both are BOM-tolerant and trim cell whitespace.

mod error;
mod results;
mod stations;

pub use error::{IngestError, Result};
pub use results::{ResultsRow, ResultsTable, read_results};
pub use stations::read_stations;

use std::collections::BTreeMap;
use std::path::Path;

use csv::ReaderBuilder;

/// Read a CSV file into its header list and one map per row, keyed by
/// header.
///
/// Values are whitespace-trimmed; a UTF-8 BOM on the first header is
/// stripped so exported spreadsheets load unchanged. The headers are
/// returned separately so callers can validate them even when the file
/// has no data rows.
pub(crate) fn read_csv_rows(path: &Path) -> Result<(Vec<String>, Vec<BTreeMap<String, String>>)> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_matches('\u{feff}').trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut row = BTreeMap::new();
        for (idx, value) in record.iter().enumerate() {
            let key = headers.get(idx).cloned().unwrap_or_default();
            row.insert(key, value.trim().to_string());
        }
        rows.push(row);
    }
    Ok((headers, rows))
}

/// Non-empty field lookup.
pub(crate) fn get_optional(row: &BTreeMap<String, String>, key: &str) -> Option<String> {
    row.get(key).filter(|v| !v.is_empty()).cloned()
}
