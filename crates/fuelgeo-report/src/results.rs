//! The wide per-record results table.

use std::path::Path;

use anyhow::{Context, Result};

use fuelgeo_eval::EvaluationRun;
use fuelgeo_model::BestPerRecord;

/// Write one row per record: every input column first, then five
/// columns per variant (`_address`, `_lat`, `_lng`, `_distance`,
/// `_accuracy`), then the per-record winner columns.
///
/// Blank cells stand for absent values, so the file reads back with
/// the same absences it was written with.
pub fn write_results_csv(
    path: &Path,
    run: &EvaluationRun,
    bests: &[BestPerRecord],
) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating results table {}", path.display()))?;

    let mut header = vec![
        "station_id".to_string(),
        "address".to_string(),
        "ground_truth_lat".to_string(),
        "ground_truth_lng".to_string(),
        "county".to_string(),
        "municipality".to_string(),
        "location_type".to_string(),
    ];
    for variant in &run.variants {
        header.push(format!("{variant}_address"));
        header.push(format!("{variant}_lat"));
        header.push(format!("{variant}_lng"));
        header.push(format!("{variant}_distance"));
        header.push(format!("{variant}_accuracy"));
    }
    header.push("best_variant".to_string());
    header.push("best_distance".to_string());
    header.push("improvement_over_baseline".to_string());
    writer.write_record(&header)?;

    for (evaluation, best) in run.records.iter().zip(bests) {
        let record = &evaluation.record;
        let mut row = vec![
            record.id.clone(),
            record.address.clone(),
            record
                .ground_truth
                .map(|c| c.lat.to_string())
                .unwrap_or_default(),
            record
                .ground_truth
                .map(|c| c.lon.to_string())
                .unwrap_or_default(),
            record.county.clone(),
            record.municipality.clone().unwrap_or_default(),
            record.location_type.clone().unwrap_or_default(),
        ];
        for outcome in &evaluation.outcomes {
            row.push(outcome.address.clone());
            row.push(
                outcome
                    .coordinate
                    .map(|c| c.lat.to_string())
                    .unwrap_or_default(),
            );
            row.push(
                outcome
                    .coordinate
                    .map(|c| c.lon.to_string())
                    .unwrap_or_default(),
            );
            row.push(
                outcome
                    .distance_m
                    .map(|d| format!("{d:.1}"))
                    .unwrap_or_default(),
            );
            row.push(outcome.accuracy.clone());
        }
        row.push(best.variant.clone().unwrap_or_default());
        row.push(
            best.distance_m
                .map(|d| format!("{d:.1}"))
                .unwrap_or_default(),
        );
        row.push(format!("{:.1}", best.improvement_m));
        writer.write_record(&row)?;
    }

    writer
        .flush()
        .with_context(|| format!("writing results table {}", path.display()))?;
    Ok(())
}
