//! Subcommand implementations.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use comfy_table::Table;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use fuelgeo_eval::{
    EvalOptions, EvaluationRun, approach_comparison, best_per_record, evaluate_record,
    pattern_analysis, variant_summaries,
};
use fuelgeo_geocode::GoogleGeocoder;
use fuelgeo_ingest::{ResultsTable, read_results, read_stations};
use fuelgeo_model::StationRecord;
use fuelgeo_normalize::{BASELINE_VARIANT, classify, normalize, registry, variant_names};
use fuelgeo_report::{
    write_markers_js, write_results_csv, write_rules_json, write_summary_csv, write_text_report,
};

use crate::cli::{AnalyzeArgs, ClassifyArgs, EvaluateArgs, MarkersArgs};
use crate::summary::{
    apply_table_style, print_approach_comparison, print_pattern_insights, print_variant_summaries,
};

/// Fixed single-variant strategy in the approach comparison.
const FIXED_VARIANT: &str = "v8_combined_basic";

/// Sample address rendered in the `variants` listing.
const SAMPLE_ADDRESS: &str = "Π.Ε.Ο. ΑΘΗΝΩΝ - ΛΑΜΙΑΣ, 68ο ΧΛΜ";

pub fn run_evaluate(args: &EvaluateArgs) -> Result<()> {
    let records = read_stations(&args.stations)
        .with_context(|| format!("reading stations from {}", args.stations.display()))?;
    info!(records = records.len(), "loaded station table");

    let variants = if args.variant.is_empty() {
        None
    } else {
        let known = variant_names();
        for name in &args.variant {
            if !known.contains(&name.as_str()) {
                bail!("unknown variant '{name}'; run `fuelgeo variants` for the list");
            }
        }
        Some(args.variant.clone())
    };
    let options = EvalOptions {
        country: args.country.clone(),
        region: args.region.clone(),
        delay: Duration::from_millis(args.delay_ms),
        variants,
    };

    if args.dry_run {
        print_dry_run(&records, &options);
        return Ok(());
    }

    let mut geocoder = GoogleGeocoder::from_env().context("creating geocoder client")?;
    if let Some(base_url) = &args.base_url {
        geocoder = geocoder.with_base_url(base_url);
    }
    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("creating output dir {}", args.output_dir.display()))?;

    let variant_count = options.selected_variants().len();
    info!(
        records = records.len(),
        variants = variant_count,
        delay_ms = args.delay_ms,
        "starting evaluation"
    );
    let progress = ProgressBar::new(records.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    let mut evaluated = Vec::with_capacity(records.len());
    for record in &records {
        progress.set_message(record.id.clone());
        evaluated.push(evaluate_record(record, &geocoder, &options));
        progress.inc(1);
    }
    progress.finish_and_clear();

    let run = EvaluationRun {
        variants: options
            .selected_variants()
            .iter()
            .map(|(name, _)| (*name).to_string())
            .collect(),
        records: evaluated,
    };
    let table = run.to_table();
    let bests = best_per_record(&table, BASELINE_VARIANT);

    write_results_csv(&args.output_dir.join("results.csv"), &run, &bests)?;
    write_reports(&args.output_dir, records.len(), &table)?;
    println!("Output: {}", args.output_dir.display());
    Ok(())
}

pub fn run_analyze(args: &AnalyzeArgs) -> Result<()> {
    let table = read_results(&args.results)
        .with_context(|| format!("reading results from {}", args.results.display()))?;
    if table.variants.is_empty() {
        bail!(
            "no variant distance columns found in {}",
            args.results.display()
        );
    }
    info!(
        rows = table.rows.len(),
        variants = table.variants.len(),
        "loaded results table"
    );
    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("creating output dir {}", args.output_dir.display()))?;
    write_reports(&args.output_dir, table.rows.len(), &table)?;
    Ok(())
}

pub fn run_classify(args: &ClassifyArgs) -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Address", "Variant", "Cleaned"]);
    apply_table_style(&mut table);
    for address in &args.addresses {
        let variant = classify(address);
        let cleaned = normalize(variant, address).unwrap_or_else(|| address.clone());
        table.add_row(vec![address.clone(), variant.to_string(), cleaned]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_variants() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Variant", "Sample rendering"]);
    apply_table_style(&mut table);
    for (name, clean) in registry() {
        table.add_row(vec![(*name).to_string(), clean(SAMPLE_ADDRESS)]);
    }
    println!("Sample input: {SAMPLE_ADDRESS}");
    println!("{table}");
    Ok(())
}

pub fn run_markers(args: &MarkersArgs) -> Result<()> {
    let records = read_stations(&args.stations)
        .with_context(|| format!("reading stations from {}", args.stations.display()))?;
    write_markers_js(&args.output, &records)?;
    let located = records
        .iter()
        .filter(|record| record.ground_truth.is_some())
        .count();
    println!(
        "Markers: {} ({} located, {} missing coordinates)",
        args.output.display(),
        located,
        records.len() - located
    );
    Ok(())
}

/// Aggregate a distance table and write the shared report set.
fn write_reports(output_dir: &Path, station_count: usize, table: &ResultsTable) -> Result<()> {
    let bests = best_per_record(table, BASELINE_VARIANT);
    let summaries = variant_summaries(table, &bests);
    let insights = pattern_analysis(table, BASELINE_VARIANT);
    let comparison = approach_comparison(table, BASELINE_VARIANT, FIXED_VARIANT);

    write_summary_csv(&output_dir.join("summary.csv"), &summaries)?;
    write_rules_json(&output_dir.join("rules.json"))?;
    write_text_report(
        &output_dir.join("report.txt"),
        station_count,
        &summaries,
        &comparison,
        &insights,
    )?;

    print_variant_summaries(&summaries);
    print_pattern_insights(&insights);
    print_approach_comparison(&comparison);
    Ok(())
}

fn print_dry_run(records: &[StationRecord], options: &EvalOptions) {
    let selected = options.selected_variants();
    let mut table = Table::new();
    table.set_header(vec!["Station", "Address", "Rule variant", "Cleaned"]);
    apply_table_style(&mut table);
    for record in records {
        let variant = classify(&record.address);
        let cleaned = normalize(variant, &record.address)
            .unwrap_or_else(|| record.address.clone());
        table.add_row(vec![
            record.id.clone(),
            record.address.clone(),
            variant.to_string(),
            cleaned,
        ]);
    }
    println!("{table}");
    println!(
        "Dry run: {} records x {} variants, no requests sent.",
        records.len(),
        selected.len()
    );
}
