//! Evaluation core: score geocoder output against ground truth, pick
//! the best cleaning variant per record, and aggregate per-variant
//! statistics across the dataset.

pub mod analyze;
pub mod distance;
pub mod evaluate;
pub mod select;

pub use analyze::{ApproachStats, PatternInsight, approach_comparison, pattern_analysis};
pub use distance::{EARTH_RADIUS_M, haversine_m, scored_distance};
pub use evaluate::{EvalOptions, EvaluationRun, RecordEvaluation, evaluate, evaluate_record};
pub use select::{DistanceStats, best_per_record, distance_stats, variant_summaries};
