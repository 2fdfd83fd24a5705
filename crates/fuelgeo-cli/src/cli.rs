//! CLI argument definitions for the evaluation pipeline.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "fuelgeo",
    version,
    about = "Fuel-station geocoding evaluation for Greek highway-kilometer addresses",
    long_about = "Evaluate address-cleaning variants against a geocoding service.\n\n\
                  Reads a station table with ground-truth coordinates, geocodes every\n\
                  cleaning variant of every address, scores results by great-circle\n\
                  distance and reports which variant works best where."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the full evaluation: geocode every variant of every record.
    Evaluate(EvaluateArgs),

    /// Re-analyze a results table from an earlier evaluation run.
    Analyze(AnalyzeArgs),

    /// Print the recommended variant and cleaned form for addresses.
    Classify(ClassifyArgs),

    /// List registered cleaning variants with a sample rendering.
    Variants,

    /// Export a map-marker JS bundle from a station table.
    Markers(MarkersArgs),
}

#[derive(Parser)]
pub struct EvaluateArgs {
    /// Path to the station CSV (station_id, address, ground truth, county).
    #[arg(value_name = "STATIONS_CSV")]
    pub stations: PathBuf,

    /// Directory for generated files.
    #[arg(long = "output-dir", value_name = "DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// Pause after every geocoder call, in milliseconds.
    #[arg(long = "delay-ms", value_name = "MS", default_value_t = 100)]
    pub delay_ms: u64,

    /// Country qualifier appended to every query.
    #[arg(long = "country", default_value = "Greece")]
    pub country: String,

    /// Region bias hint passed to the geocoder.
    #[arg(long = "region", default_value = "gr")]
    pub region: String,

    /// Override the geocoder endpoint (testing and proxies).
    #[arg(long = "base-url", value_name = "URL")]
    pub base_url: Option<String>,

    /// Evaluate only the named variants (repeatable).
    #[arg(long = "variant", value_name = "NAME")]
    pub variant: Vec<String>,

    /// Normalize and classify without any network calls.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Path to a wide results CSV written by `evaluate`.
    #[arg(value_name = "RESULTS_CSV")]
    pub results: PathBuf,

    /// Directory for generated files.
    #[arg(long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,
}

#[derive(Parser)]
pub struct ClassifyArgs {
    /// Raw addresses to classify.
    #[arg(value_name = "ADDRESS", required = true)]
    pub addresses: Vec<String>,
}

#[derive(Parser)]
pub struct MarkersArgs {
    /// Path to the station CSV.
    #[arg(value_name = "STATIONS_CSV")]
    pub stations: PathBuf,

    /// Output path for the marker bundle.
    #[arg(long = "output", value_name = "PATH", default_value = "markers.js")]
    pub output: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn evaluate_flags_parse_with_defaults() {
        let cli = Cli::try_parse_from(["fuelgeo", "evaluate", "stations.csv"])
            .expect("parse evaluate");
        let Command::Evaluate(args) = cli.command else {
            panic!("expected evaluate subcommand");
        };
        assert_eq!(args.stations.to_str(), Some("stations.csv"));
        assert_eq!(args.output_dir.to_str(), Some("output"));
        assert_eq!(args.delay_ms, 100);
        assert_eq!(args.country, "Greece");
        assert_eq!(args.region, "gr");
        assert!(args.variant.is_empty());
        assert!(!args.dry_run);
    }

    #[test]
    fn variant_flag_is_repeatable() {
        let cli = Cli::try_parse_from([
            "fuelgeo",
            "evaluate",
            "stations.csv",
            "--variant",
            "v1_original",
            "--variant",
            "v20_km_city1_city2",
            "--dry-run",
        ])
        .expect("parse evaluate");
        let Command::Evaluate(args) = cli.command else {
            panic!("expected evaluate subcommand");
        };
        assert_eq!(args.variant, vec!["v1_original", "v20_km_city1_city2"]);
        assert!(args.dry_run);
    }

    #[test]
    fn classify_requires_at_least_one_address() {
        assert!(Cli::try_parse_from(["fuelgeo", "classify"]).is_err());
        let cli = Cli::try_parse_from(["fuelgeo", "classify", "ΦΑΡΣΑΛΑ - ΛΑΜΙΑ ?"])
            .expect("parse classify");
        assert!(matches!(cli.command, Command::Classify(args) if args.addresses.len() == 1));
    }
}
