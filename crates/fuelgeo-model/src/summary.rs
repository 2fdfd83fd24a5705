//! Aggregate results: per-variant statistics and per-record winners.

use serde::{Deserialize, Serialize};

/// Aggregate over all records for one normalizer variant.
///
/// Mean, median and the threshold fractions are computed only over
/// present distances; records without a distance count against the
/// success rate but never enter the averages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantSummary {
    /// Variant name, the unique aggregation key.
    pub variant: String,
    /// Total records the variant was evaluated on.
    pub evaluated: usize,
    /// Records that produced a present distance.
    pub geocoded: usize,
    pub mean_distance_m: f64,
    pub median_distance_m: f64,
    /// `geocoded / evaluated`, in `[0, 1]`.
    pub success_rate: f64,
    /// Fraction of present distances at or below 100 m.
    pub within_100m: f64,
    /// Fraction of present distances at or below 500 m.
    pub within_500m: f64,
    /// How often this variant was the per-record minimum.
    pub times_best: usize,
}

/// The winning variant for one record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestPerRecord {
    pub station_id: String,
    /// Winning variant name; `None` when no variant produced a distance.
    pub variant: Option<String>,
    /// The winning distance, absent together with `variant`.
    pub distance_m: Option<f64>,
    /// Baseline distance minus best distance; `0.0` when undefined.
    pub improvement_m: f64,
}

impl BestPerRecord {
    /// The "no variant produced a distance" case.
    pub fn none(station_id: impl Into<String>) -> Self {
        Self {
            station_id: station_id.into(),
            variant: None,
            distance_m: None,
            improvement_m: 0.0,
        }
    }
}
