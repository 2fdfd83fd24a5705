//! The geocode evaluator: one external call per (record, variant).

use std::collections::BTreeMap;
use std::time::Duration;

use tracing::{debug, warn};

use fuelgeo_geocode::Geocoder;
use fuelgeo_ingest::{ResultsRow, ResultsTable};
use fuelgeo_model::{GeocodeOutcome, StationRecord};
use fuelgeo_normalize::{NormalizerFn, registry};

use crate::distance::scored_distance;

/// Evaluation knobs, CLI-controlled.
#[derive(Debug, Clone)]
pub struct EvalOptions {
    /// Country qualifier appended to every query.
    pub country: String,
    /// Region hint passed to the geocoder.
    pub region: String,
    /// Fixed pause after every geocoder call, successful or not.
    pub delay: Duration,
    /// Optional subset of variant names; `None` evaluates the full registry.
    pub variants: Option<Vec<String>>,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self {
            country: "Greece".to_string(),
            region: "gr".to_string(),
            delay: Duration::from_millis(100),
            variants: None,
        }
    }
}

impl EvalOptions {
    /// The variant subset to run, in registry order.
    pub fn selected_variants(&self) -> Vec<(&'static str, NormalizerFn)> {
        registry()
            .iter()
            .filter(|(name, _)| match &self.variants {
                Some(subset) => subset.iter().any(|wanted| wanted == name),
                None => true,
            })
            .copied()
            .collect()
    }
}

/// All outcomes for one record, aligned with the variant order.
#[derive(Debug, Clone)]
pub struct RecordEvaluation {
    pub record: StationRecord,
    pub outcomes: Vec<GeocodeOutcome>,
}

/// A full evaluation pass over the dataset.
#[derive(Debug, Clone)]
pub struct EvaluationRun {
    /// Variant names, in the fixed iteration order used everywhere.
    pub variants: Vec<String>,
    pub records: Vec<RecordEvaluation>,
}

impl EvaluationRun {
    /// Project the run down to its distance matrix for aggregation.
    pub fn to_table(&self) -> ResultsTable {
        let rows = self
            .records
            .iter()
            .map(|evaluation| {
                let mut distances = BTreeMap::new();
                for (variant, outcome) in self.variants.iter().zip(&evaluation.outcomes) {
                    distances.insert(variant.clone(), outcome.distance_m);
                }
                ResultsRow {
                    station_id: evaluation.record.id.clone(),
                    address: evaluation.record.address.clone(),
                    distances,
                }
            })
            .collect();
        ResultsTable {
            variants: self.variants.clone(),
            rows,
        }
    }
}

/// Evaluate every variant for one record.
///
/// Exactly one geocoder call is made per variant, followed by the
/// fixed delay regardless of outcome. Misses and transport errors are
/// recorded with their sentinel tags and never abort the loop.
pub fn evaluate_record(
    record: &StationRecord,
    geocoder: &dyn Geocoder,
    options: &EvalOptions,
) -> RecordEvaluation {
    let mut outcomes = Vec::new();
    for (variant, clean) in options.selected_variants() {
        let cleaned = clean(&record.address);
        let query = build_query(&cleaned, &record.county, &options.country);
        debug!(station = %record.id, variant, %query, "geocoding");

        let outcome = match geocoder.geocode(&query, &options.region) {
            Ok(hits) => match hits.first() {
                Some(hit) => GeocodeOutcome {
                    address: cleaned,
                    coordinate: Some(hit.coordinate),
                    accuracy: hit.location_type.clone(),
                    distance_m: scored_distance(record.ground_truth, Some(hit.coordinate)),
                },
                None => GeocodeOutcome::failed(cleaned),
            },
            Err(error) => {
                warn!(station = %record.id, variant, %error, "geocoder call failed");
                GeocodeOutcome::errored(cleaned)
            }
        };
        outcomes.push(outcome);

        if !options.delay.is_zero() {
            std::thread::sleep(options.delay);
        }
    }
    RecordEvaluation {
        record: record.clone(),
        outcomes,
    }
}

/// Evaluate the whole dataset, records outer, variants inner.
pub fn evaluate(
    records: &[StationRecord],
    geocoder: &dyn Geocoder,
    options: &EvalOptions,
) -> EvaluationRun {
    let variants = options
        .selected_variants()
        .iter()
        .map(|(name, _)| (*name).to_string())
        .collect();
    let records = records
        .iter()
        .map(|record| evaluate_record(record, geocoder, options))
        .collect();
    EvaluationRun { variants, records }
}

/// Query layout used by the study: cleaned address, county, country.
fn build_query(cleaned: &str, county: &str, country: &str) -> String {
    let mut parts = vec![cleaned];
    if !county.is_empty() {
        parts.push(county);
    }
    if !country.is_empty() {
        parts.push(country);
    }
    parts.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use fuelgeo_geocode::{GeocodeError, GeocodeHit, Geocoder};
    use fuelgeo_model::{Coordinate, accuracy};
    use std::cell::RefCell;

    /// Scripted geocoder: one canned answer per call, in order.
    struct Scripted {
        answers: RefCell<Vec<Result<Vec<GeocodeHit>, GeocodeError>>>,
        queries: RefCell<Vec<String>>,
    }

    impl Scripted {
        fn new(answers: Vec<Result<Vec<GeocodeHit>, GeocodeError>>) -> Self {
            Self {
                answers: RefCell::new(answers),
                queries: RefCell::new(Vec::new()),
            }
        }
    }

    impl Geocoder for Scripted {
        fn geocode(&self, query: &str, _region: &str) -> Result<Vec<GeocodeHit>, GeocodeError> {
            self.queries.borrow_mut().push(query.to_string());
            self.answers.borrow_mut().remove(0)
        }
    }

    fn hit(lat: f64, lon: f64) -> GeocodeHit {
        GeocodeHit {
            coordinate: Coordinate::new(lat, lon),
            location_type: "ROOFTOP".to_string(),
        }
    }

    fn station() -> StationRecord {
        StationRecord::new(
            "ST-1",
            "68ο ΧΛΜ Αθηνών Λαμίας",
            Some(Coordinate::new(38.45, 23.11)),
            "Φθιώτιδας",
        )
    }

    fn options(variants: &[&str]) -> EvalOptions {
        EvalOptions {
            delay: Duration::ZERO,
            variants: Some(variants.iter().map(|v| (*v).to_string()).collect()),
            ..EvalOptions::default()
        }
    }

    #[test]
    fn hit_miss_and_error_are_all_recorded() {
        let geocoder = Scripted::new(vec![
            Ok(vec![hit(38.4501, 23.1101)]),
            Ok(vec![]),
            Err(GeocodeError::Status(500)),
        ]);
        let opts = options(&["v1_original", "v3_normalize_km", "v20_km_city1_city2"]);
        let evaluation = evaluate_record(&station(), &geocoder, &opts);

        assert_eq!(evaluation.outcomes.len(), 3);
        assert!(evaluation.outcomes[0].distance_m.is_some());
        assert_eq!(evaluation.outcomes[1].accuracy, accuracy::FAILED);
        assert!(evaluation.outcomes[1].distance_m.is_none());
        assert_eq!(evaluation.outcomes[2].accuracy, accuracy::ERROR);
        assert!(evaluation.outcomes[2].distance_m.is_none());
    }

    #[test]
    fn query_appends_county_and_country() {
        let geocoder = Scripted::new(vec![Ok(vec![])]);
        let opts = options(&["v1_original"]);
        evaluate_record(&station(), &geocoder, &opts);
        let queries = geocoder.queries.borrow();
        assert_eq!(queries[0], "68ο ΧΛΜ Αθηνών Λαμίας, Φθιώτιδας, Greece");
    }

    #[test]
    fn missing_ground_truth_leaves_distance_absent_on_hit() {
        let geocoder = Scripted::new(vec![Ok(vec![hit(38.45, 23.11)])]);
        let opts = options(&["v1_original"]);
        let mut record = station();
        record.ground_truth = None;
        let evaluation = evaluate_record(&record, &geocoder, &opts);
        assert_eq!(evaluation.outcomes[0].accuracy, "ROOFTOP");
        assert!(evaluation.outcomes[0].distance_m.is_none());
    }

    #[test]
    fn run_projects_to_distance_table() {
        let geocoder = Scripted::new(vec![Ok(vec![hit(38.4501, 23.1101)]), Ok(vec![])]);
        let opts = options(&["v1_original", "v20_km_city1_city2"]);
        let run = evaluate(std::slice::from_ref(&station()), &geocoder, &opts);
        let table = run.to_table();
        assert_eq!(table.variants, vec!["v1_original", "v20_km_city1_city2"]);
        assert!(table.rows[0].distance("v1_original").is_some());
        assert!(table.rows[0].distance("v20_km_city1_city2").is_none());
    }
}
