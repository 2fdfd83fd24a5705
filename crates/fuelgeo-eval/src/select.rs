//! Best-variant selection and per-variant aggregation.

use std::cmp::Ordering;

use fuelgeo_ingest::ResultsTable;
use fuelgeo_model::{BestPerRecord, VariantSummary};

/// Distance statistics over a set of optional distances.
#[derive(Debug, Clone)]
pub struct DistanceStats {
    pub total: usize,
    pub geocoded: usize,
    pub mean_m: f64,
    pub median_m: f64,
    pub success_rate: f64,
    pub within_100m: f64,
    pub within_500m: f64,
}

/// Compute statistics over present distances.
///
/// Returns `None` when no distance is present at all; absent values
/// only lower the success rate, they never enter the averages.
pub fn distance_stats(distances: &[Option<f64>]) -> Option<DistanceStats> {
    let total = distances.len();
    let mut present: Vec<f64> = distances.iter().copied().flatten().collect();
    if present.is_empty() {
        return None;
    }
    present.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let geocoded = present.len();
    let mean = present.iter().sum::<f64>() / geocoded as f64;
    let median = if geocoded % 2 == 1 {
        present[geocoded / 2]
    } else {
        (present[geocoded / 2 - 1] + present[geocoded / 2]) / 2.0
    };
    let within = |threshold: f64| {
        present.iter().filter(|d| **d <= threshold).count() as f64 / geocoded as f64
    };

    Some(DistanceStats {
        total,
        geocoded,
        mean_m: mean,
        median_m: median,
        success_rate: geocoded as f64 / total.max(1) as f64,
        within_100m: within(100.0),
        within_500m: within(500.0),
    })
}

/// Pick the winning variant for every record.
///
/// The scan follows the table's variant order; only a strictly smaller
/// distance replaces the current winner, so ties keep the variant
/// encountered first. Records where no variant has a distance get a
/// `None` winner with improvement `0.0`.
pub fn best_per_record(table: &ResultsTable, baseline: &str) -> Vec<BestPerRecord> {
    table
        .rows
        .iter()
        .map(|row| {
            let mut best: Option<(&str, f64)> = None;
            for variant in &table.variants {
                let Some(distance) = row.distance(variant) else {
                    continue;
                };
                match best {
                    Some((_, current)) if distance >= current => {}
                    _ => best = Some((variant, distance)),
                }
            }
            match best {
                Some((variant, distance)) => {
                    let improvement = row
                        .distance(baseline)
                        .map(|baseline_distance| baseline_distance - distance)
                        .unwrap_or(0.0);
                    BestPerRecord {
                        station_id: row.station_id.clone(),
                        variant: Some(variant.to_string()),
                        distance_m: Some(distance),
                        improvement_m: improvement,
                    }
                }
                None => BestPerRecord::none(row.station_id.clone()),
            }
        })
        .collect()
}

/// Aggregate every variant into a summary, ranked by ascending mean.
///
/// Variants with no present distance produce no row. The sort is
/// stable, so equal means keep the table's variant order.
pub fn variant_summaries(table: &ResultsTable, bests: &[BestPerRecord]) -> Vec<VariantSummary> {
    let mut summaries: Vec<VariantSummary> = table
        .variants
        .iter()
        .filter_map(|variant| {
            let distances: Vec<Option<f64>> =
                table.rows.iter().map(|row| row.distance(variant)).collect();
            let stats = distance_stats(&distances)?;
            let times_best = bests
                .iter()
                .filter(|best| best.variant.as_deref() == Some(variant.as_str()))
                .count();
            Some(VariantSummary {
                variant: variant.clone(),
                evaluated: stats.total,
                geocoded: stats.geocoded,
                mean_distance_m: stats.mean_m,
                median_distance_m: stats.median_m,
                success_rate: stats.success_rate,
                within_100m: stats.within_100m,
                within_500m: stats.within_500m,
                times_best,
            })
        })
        .collect();
    summaries.sort_by(|a, b| {
        a.mean_distance_m
            .partial_cmp(&b.mean_distance_m)
            .unwrap_or(Ordering::Equal)
    });
    summaries
}
