//! The per-variant summary table.

use std::path::Path;

use anyhow::{Context, Result};

use fuelgeo_model::VariantSummary;

/// Write one row per variant, in the ranking order given.
///
/// Rates are written as percentages with one decimal, distances in
/// meters with one decimal.
pub fn write_summary_csv(path: &Path, summaries: &[VariantSummary]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating summary table {}", path.display()))?;

    writer.write_record([
        "variant",
        "evaluated",
        "geocoded",
        "mean_distance_m",
        "median_distance_m",
        "success_rate_pct",
        "within_100m_pct",
        "within_500m_pct",
        "times_best",
    ])?;

    for summary in summaries {
        writer.write_record([
            summary.variant.clone(),
            summary.evaluated.to_string(),
            summary.geocoded.to_string(),
            format!("{:.1}", summary.mean_distance_m),
            format!("{:.1}", summary.median_distance_m),
            format!("{:.1}", summary.success_rate * 100.0),
            format!("{:.1}", summary.within_100m * 100.0),
            format!("{:.1}", summary.within_500m * 100.0),
            summary.times_best.to_string(),
        ])?;
    }

    writer
        .flush()
        .with_context(|| format!("writing summary table {}", path.display()))?;
    Ok(())
}
