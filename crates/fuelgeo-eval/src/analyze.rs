//! Post-run analysis over a wide results table: which address
//! patterns exist in the dataset, which variant serves each pattern
//! best, and how the rule classifier stacks up against fixed choices
//! and the per-record oracle.

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use fuelgeo_ingest::ResultsTable;
use fuelgeo_normalize::classify;
use fuelgeo_normalize::tokens::place_tokens;

use crate::select::{DistanceStats, distance_stats};

static HAS_PEO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Π\.?Ε\.?Ο\.?|ΠΕΟ").expect("peo regex"));
static HAS_EO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Ε\.?Ο\.?|ΕΟ").expect("eo regex"));
static HAS_NEO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Ν\.?Ε\.?Ο\.?|ΝΕΟ").expect("neo regex"));
static HAS_KM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\d+.*(?:ΧΛΜ|χλμ|Km|km|ΚΜ)").expect("km regex"));

/// The fixed pattern set the analysis reports on.
fn patterns() -> Vec<(&'static str, fn(&str) -> bool)> {
    vec![
        ("has_peo", |a| HAS_PEO.is_match(a)),
        ("has_eo", |a| HAS_EO.is_match(a)),
        ("has_neo", |a| HAS_NEO.is_match(a)),
        ("has_km", |a| HAS_KM.is_match(a)),
        ("has_two_cities", |a| place_tokens(a).len() >= 2),
        ("has_dash", |a| a.contains('-')),
        ("has_comma", |a| a.contains(',')),
        ("has_question", |a| a.contains('?')),
        ("long_address", |a| a.chars().count() > 50),
        ("starts_with_number", |a| {
            a.trim().chars().next().is_some_and(|c| c.is_ascii_digit())
        }),
    ]
}

/// How one address pattern behaves across the dataset.
#[derive(Debug, Clone, Serialize)]
pub struct PatternInsight {
    pub pattern: &'static str,
    /// Records matching the pattern.
    pub count: usize,
    /// Share of the whole dataset, in `[0, 1]`.
    pub share: f64,
    /// Variant with the lowest mean distance on the matching subset.
    pub best_variant: String,
    pub best_mean_m: f64,
    /// Subset baseline mean minus the best mean, when defined.
    pub improvement_m: Option<f64>,
}

/// Distance statistics for one selection strategy.
#[derive(Debug, Clone, Serialize)]
pub struct ApproachStats {
    pub approach: String,
    pub mean_m: f64,
    pub median_m: f64,
    pub success_rate: f64,
    pub within_100m: f64,
    pub within_500m: f64,
}

impl ApproachStats {
    fn from_stats(approach: impl Into<String>, stats: &DistanceStats) -> Self {
        Self {
            approach: approach.into(),
            mean_m: stats.mean_m,
            median_m: stats.median_m,
            success_rate: stats.success_rate,
            within_100m: stats.within_100m,
            within_500m: stats.within_500m,
        }
    }
}

/// For each known address pattern, find the variant that performs best
/// on the records exhibiting it.
pub fn pattern_analysis(table: &ResultsTable, baseline: &str) -> Vec<PatternInsight> {
    let total = table.rows.len();
    let mut insights = Vec::new();

    for (pattern, matches) in patterns() {
        let subset: Vec<_> = table
            .rows
            .iter()
            .filter(|row| matches(&row.address))
            .collect();
        if subset.is_empty() {
            continue;
        }

        // Mean distance per variant on the subset; variants with no
        // present distance are not candidates.
        let mut candidates: Vec<(&str, f64)> = Vec::new();
        for variant in &table.variants {
            let distances: Vec<Option<f64>> =
                subset.iter().map(|row| row.distance(variant)).collect();
            if let Some(stats) = distance_stats(&distances) {
                candidates.push((variant, stats.mean_m));
            }
        }
        let Some((best_variant, best_mean)) = candidates
            .into_iter()
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))
        else {
            continue;
        };

        let baseline_distances: Vec<Option<f64>> =
            subset.iter().map(|row| row.distance(baseline)).collect();
        let improvement =
            distance_stats(&baseline_distances).map(|stats| stats.mean_m - best_mean);

        insights.push(PatternInsight {
            pattern,
            count: subset.len(),
            share: subset.len() as f64 / total.max(1) as f64,
            best_variant: best_variant.to_string(),
            best_mean_m: best_mean,
            improvement_m: improvement,
        });
    }
    insights
}

/// Compare selection strategies: the baseline variant, one fixed
/// variant, the rule classifier's per-record recommendation, and the
/// per-record oracle minimum.
pub fn approach_comparison(
    table: &ResultsTable,
    baseline: &str,
    fixed_variant: &str,
) -> Vec<ApproachStats> {
    let mut comparison = Vec::new();

    let column = |variant: &str| -> Vec<Option<f64>> {
        table.rows.iter().map(|row| row.distance(variant)).collect()
    };

    if let Some(stats) = distance_stats(&column(baseline)) {
        comparison.push(ApproachStats::from_stats(
            format!("Baseline ({baseline})"),
            &stats,
        ));
    }

    if table.variants.iter().any(|v| v == fixed_variant)
        && let Some(stats) = distance_stats(&column(fixed_variant))
    {
        comparison.push(ApproachStats::from_stats(
            format!("Fixed ({fixed_variant})"),
            &stats,
        ));
    }

    let rule_based: Vec<Option<f64>> = table
        .rows
        .iter()
        .map(|row| row.distance(classify(&row.address)))
        .collect();
    if let Some(stats) = distance_stats(&rule_based) {
        comparison.push(ApproachStats::from_stats("Rule-based", &stats));
    }

    let oracle: Vec<Option<f64>> = table
        .rows
        .iter()
        .map(|row| {
            table
                .variants
                .iter()
                .filter_map(|variant| row.distance(variant))
                .min_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
        })
        .collect();
    if let Some(stats) = distance_stats(&oracle) {
        comparison.push(ApproachStats::from_stats("Oracle (best possible)", &stats));
    }

    comparison
}

#[cfg(test)]
mod tests {
    use super::*;
    use fuelgeo_ingest::ResultsRow;
    use std::collections::BTreeMap;

    fn row(id: &str, address: &str, distances: &[(&str, Option<f64>)]) -> ResultsRow {
        ResultsRow {
            station_id: id.to_string(),
            address: address.to_string(),
            distances: distances
                .iter()
                .map(|(v, d)| ((*v).to_string(), *d))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    fn sample_table() -> ResultsTable {
        let variants = vec![
            "v1_original".to_string(),
            "v8_combined_basic".to_string(),
            "v9_combined_aggressive".to_string(),
        ];
        let rows = vec![
            row(
                "ST-1",
                "Π.Ε.Ο. ΑΘΗΝΩΝ - ΛΑΜΙΑΣ, 68ο ΧΛΜ",
                &[
                    ("v1_original", Some(1500.0)),
                    ("v8_combined_basic", Some(120.0)),
                    ("v9_combined_aggressive", Some(300.0)),
                ],
            ),
            row(
                "ST-2",
                "ΦΑΡΣΑΛΑ - ΛΑΜΙΑ ?",
                &[
                    ("v1_original", Some(900.0)),
                    ("v8_combined_basic", None),
                    ("v9_combined_aggressive", Some(450.0)),
                ],
            ),
        ];
        ResultsTable { variants, rows }
    }

    #[test]
    fn pattern_analysis_finds_best_variant_per_pattern() {
        let insights = pattern_analysis(&sample_table(), "v1_original");
        let peo = insights
            .iter()
            .find(|i| i.pattern == "has_peo")
            .expect("has_peo insight");
        assert_eq!(peo.count, 1);
        assert_eq!(peo.best_variant, "v8_combined_basic");
        assert_eq!(peo.improvement_m, Some(1380.0));

        let question = insights
            .iter()
            .find(|i| i.pattern == "has_question")
            .expect("has_question insight");
        assert_eq!(question.best_variant, "v9_combined_aggressive");
    }

    #[test]
    fn approach_comparison_includes_rule_based_and_oracle() {
        let comparison = approach_comparison(&sample_table(), "v1_original", "v8_combined_basic");
        let names: Vec<&str> = comparison.iter().map(|a| a.approach.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Baseline (v1_original)",
                "Fixed (v8_combined_basic)",
                "Rule-based",
                "Oracle (best possible)",
            ]
        );

        let oracle = comparison.last().expect("oracle row");
        // Oracle takes 120 for ST-1 and 450 for ST-2.
        assert_eq!(oracle.mean_m, 285.0);

        // The classifier sends ST-1 to v8 (120) and ST-2 to v9 (450).
        let rule_based = &comparison[2];
        assert_eq!(rule_based.mean_m, 285.0);
    }
}
