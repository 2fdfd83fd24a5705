//! End-to-end pass: evaluate against a scripted geocoder, write the
//! wide results table, read it back and aggregate it the way the
//! `analyze` path does.

use std::cell::RefCell;
use std::time::Duration;

use fuelgeo_eval::{
    EvalOptions, approach_comparison, best_per_record, evaluate, variant_summaries,
};
use fuelgeo_geocode::{GeocodeError, GeocodeHit, Geocoder, Result as GeocodeResult};
use fuelgeo_ingest::read_results;
use fuelgeo_model::{Coordinate, StationRecord};
use fuelgeo_normalize::BASELINE_VARIANT;
use fuelgeo_report::{write_results_csv, write_summary_csv, write_text_report};

/// One canned answer per call, in evaluation order.
struct Scripted {
    answers: RefCell<Vec<GeocodeResult<Vec<GeocodeHit>>>>,
}

impl Scripted {
    fn new(answers: Vec<GeocodeResult<Vec<GeocodeHit>>>) -> Self {
        Self {
            answers: RefCell::new(answers),
        }
    }
}

impl Geocoder for Scripted {
    fn geocode(&self, _query: &str, _region: &str) -> GeocodeResult<Vec<GeocodeHit>> {
        self.answers.borrow_mut().remove(0)
    }
}

fn hit(lat: f64, lon: f64) -> GeocodeResult<Vec<GeocodeHit>> {
    Ok(vec![GeocodeHit {
        coordinate: Coordinate::new(lat, lon),
        location_type: "ROOFTOP".to_string(),
    }])
}

#[test]
fn evaluate_write_read_analyze_round_trip() {
    let records = vec![
        StationRecord::new(
            "ST-1",
            "68ο ΧΛΜ Αθηνών Λαμίας",
            Some(Coordinate::new(38.45, 23.11)),
            "Φθιώτιδας",
        ),
        StationRecord::new(
            "ST-2",
            "ΦΑΡΣΑΛΑ - ΛΑΜΙΑ ?",
            Some(Coordinate::new(39.28, 22.38)),
            "Λάρισας",
        ),
    ];

    // Records outer, variants inner, in registry order.
    let geocoder = Scripted::new(vec![
        hit(38.46, 23.11),   // ST-1 v1_original, about 1.1 km off
        hit(38.4508, 23.11), // ST-1 v8_combined_basic, about 89 m off
        hit(38.45, 23.11),   // ST-1 v20_km_city1_city2, exact
        Ok(vec![]),          // ST-2 v1_original, miss
        Err(GeocodeError::Status(500)), // ST-2 v8_combined_basic
        hit(39.281, 22.38),  // ST-2 v20_km_city1_city2, about 111 m off
    ]);
    let options = EvalOptions {
        delay: Duration::ZERO,
        variants: Some(vec![
            "v1_original".to_string(),
            "v8_combined_basic".to_string(),
            "v20_km_city1_city2".to_string(),
        ]),
        ..EvalOptions::default()
    };

    let run = evaluate(&records, &geocoder, &options);
    let bests = best_per_record(&run.to_table(), BASELINE_VARIANT);

    let dir = tempfile::tempdir().expect("temp dir");
    let results_path = dir.path().join("results.csv");
    write_results_csv(&results_path, &run, &bests).expect("write results");

    // Read back and aggregate exactly as a later analysis pass would.
    let table = read_results(&results_path).expect("read results");
    assert_eq!(
        table.variants,
        vec!["v1_original", "v8_combined_basic", "v20_km_city1_city2"]
    );
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[1].distance("v1_original"), None);
    assert_eq!(table.rows[1].distance("v8_combined_basic"), None);

    let bests = best_per_record(&table, BASELINE_VARIANT);
    assert_eq!(bests[0].variant.as_deref(), Some("v20_km_city1_city2"));
    assert_eq!(bests[0].distance_m, Some(0.0));
    assert!(bests[0].improvement_m > 1000.0);
    assert_eq!(bests[1].variant.as_deref(), Some("v20_km_city1_city2"));
    let st2_distance = bests[1].distance_m.expect("ST-2 best distance");
    assert!((100.0..125.0).contains(&st2_distance), "got {st2_distance}");

    let summaries = variant_summaries(&table, &bests);
    assert_eq!(summaries[0].variant, "v20_km_city1_city2");
    assert_eq!(summaries[0].times_best, 2);
    assert_eq!(summaries[0].geocoded, 2);
    // Baseline geocoded only ST-1.
    let baseline = summaries
        .iter()
        .find(|s| s.variant == BASELINE_VARIANT)
        .expect("baseline summary");
    assert_eq!(baseline.geocoded, 1);
    assert_eq!(baseline.success_rate, 0.5);

    let comparison = approach_comparison(&table, BASELINE_VARIANT, "v8_combined_basic");
    let last = comparison.last().expect("oracle entry");
    assert_eq!(last.approach, "Oracle (best possible)");
    assert!(last.mean_m < baseline.mean_distance_m);

    let summary_path = dir.path().join("summary.csv");
    write_summary_csv(&summary_path, &summaries).expect("write summary");
    let summary_csv = std::fs::read_to_string(&summary_path).expect("read summary");
    assert!(summary_csv.lines().nth(1).is_some_and(|row| {
        row.starts_with("v20_km_city1_city2")
    }));

    let report_path = dir.path().join("report.txt");
    write_text_report(&report_path, records.len(), &summaries, &comparison, &[])
        .expect("write report");
    let report = std::fs::read_to_string(&report_path).expect("read report");
    assert!(report.contains("Dataset: 2 fuel stations"));
    assert!(report.contains("BEST VARIANT"));
    assert!(report.contains("v20_km_city1_city2"));
}
