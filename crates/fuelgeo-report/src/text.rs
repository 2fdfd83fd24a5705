//! The final plain-text report.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;

use fuelgeo_eval::{ApproachStats, PatternInsight};
use fuelgeo_model::VariantSummary;
use fuelgeo_normalize::{BASELINE_VARIANT, rule_table};

const RULER: &str =
    "================================================================================";

/// Render the whole report as one string.
///
/// Summaries are expected in ranking order, best first; the baseline
/// comparison looks the baseline up by name and is skipped when the
/// baseline produced no distances.
pub fn render_text_report(
    station_count: usize,
    summaries: &[VariantSummary],
    comparison: &[ApproachStats],
    insights: &[PatternInsight],
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RULER}");
    let _ = writeln!(out, " GEOCODING EVALUATION - FINAL REPORT");
    let _ = writeln!(out, "{RULER}");
    let _ = writeln!(out, "Date: {}", Local::now().format("%Y-%m-%d %H:%M"));
    let _ = writeln!(out, "Dataset: {station_count} fuel stations");
    let _ = writeln!(out);

    if let Some(best) = summaries.first() {
        let _ = writeln!(out, "BEST VARIANT");
        let _ = writeln!(
            out,
            "  {} (mean {:.1} m, median {:.1} m, success {:.1}%)",
            best.variant,
            best.mean_distance_m,
            best.median_distance_m,
            best.success_rate * 100.0
        );
        if let Some(baseline) = summaries.iter().find(|s| s.variant == BASELINE_VARIANT)
            && baseline.mean_distance_m > 0.0
        {
            let gain =
                (baseline.mean_distance_m - best.mean_distance_m) / baseline.mean_distance_m;
            let _ = writeln!(
                out,
                "  Baseline {} mean {:.1} m; improvement {:.1}%",
                baseline.variant,
                baseline.mean_distance_m,
                gain * 100.0
            );
        }
        let _ = writeln!(
            out,
            "  Within 100 m: {:.1}%  Within 500 m: {:.1}%",
            best.within_100m * 100.0,
            best.within_500m * 100.0
        );
        let _ = writeln!(out);
    }

    if !summaries.is_empty() {
        let _ = writeln!(out, "VARIANT RANKING (ascending mean distance)");
        for (rank, summary) in summaries.iter().enumerate() {
            let _ = writeln!(
                out,
                "  {:>2}. {:<32} mean {:>9.1} m  median {:>9.1} m  best {:>3}x",
                rank + 1,
                summary.variant,
                summary.mean_distance_m,
                summary.median_distance_m,
                summary.times_best
            );
        }
        let _ = writeln!(out);
    }

    if !comparison.is_empty() {
        let _ = writeln!(out, "APPROACH COMPARISON");
        for approach in comparison {
            let _ = writeln!(
                out,
                "  {:<28} mean {:>9.1} m  median {:>9.1} m  success {:>5.1}%",
                approach.approach,
                approach.mean_m,
                approach.median_m,
                approach.success_rate * 100.0
            );
        }
        let _ = writeln!(out);
    }

    if !insights.is_empty() {
        let _ = writeln!(out, "PATTERN ANALYSIS");
        for insight in insights {
            let improvement = insight
                .improvement_m
                .map(|m| format!("{m:.1} m better than baseline"))
                .unwrap_or_else(|| "baseline not comparable".to_string());
            let _ = writeln!(
                out,
                "  {:<20} {:>4} records ({:>5.1}%)  best {} ({})",
                insight.pattern,
                insight.count,
                insight.share * 100.0,
                insight.best_variant,
                improvement
            );
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "RULE-BASED SELECTION");
    for (idx, rule) in rule_table().iter().enumerate() {
        let _ = writeln!(
            out,
            "  Rule {}: {} -> {}",
            idx + 1,
            rule.description,
            rule.variant
        );
    }
    let _ = writeln!(out, "{RULER}");
    out
}

/// Render and write the report to `path`.
pub fn write_text_report(
    path: &Path,
    station_count: usize,
    summaries: &[VariantSummary],
    comparison: &[ApproachStats],
    insights: &[PatternInsight],
) -> Result<()> {
    let report = render_text_report(station_count, summaries, comparison, insights);
    std::fs::write(path, report)
        .with_context(|| format!("writing report {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(variant: &str, mean: f64) -> VariantSummary {
        VariantSummary {
            variant: variant.to_string(),
            evaluated: 10,
            geocoded: 9,
            mean_distance_m: mean,
            median_distance_m: mean,
            success_rate: 0.9,
            within_100m: 0.4,
            within_500m: 0.8,
            times_best: 3,
        }
    }

    #[test]
    fn report_names_best_variant_and_improvement() {
        let summaries = vec![
            summary("v20_km_city1_city2", 250.0),
            summary("v1_original", 1000.0),
        ];
        let report = render_text_report(10, &summaries, &[], &[]);
        assert!(report.contains("Dataset: 10 fuel stations"));
        assert!(report.contains("v20_km_city1_city2 (mean 250.0 m"));
        assert!(report.contains("improvement 75.0%"));
        assert!(report.contains("Rule 1: road-prefix abbreviation and kilometer unit present"));
    }

    #[test]
    fn empty_summaries_still_render_rules() {
        let report = render_text_report(0, &[], &[], &[]);
        assert!(!report.contains("BEST VARIANT"));
        assert!(report.contains("RULE-BASED SELECTION"));
        assert!(report.contains("-> v3_normalize_km"));
    }
}
