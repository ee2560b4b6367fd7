//! prodsynth - Synthetic Oil-Well Production Data
//!
//! Simulates a synthetic field and writes the daily production table.
//!
//! # Usage
//!
//! ```bash
//! # Defaults: 10 wells, 3 fields, 730 days, CSV to stdout
//! prodsynth --seed 42 > production.csv
//!
//! # JSON lines to a file, plus a statistics report next to it
//! prodsynth --seed 7 --wells 25 --format json --output prod.jsonl --report
//!
//! # Dump the effective configuration
//! prodsynth --print-config > prodsynth.toml
//! ```
//!
//! # Environment Variables
//!
//! - `PRODSYNTH_CONFIG`: path to a TOML config (when `--config` is absent)
//! - `RUST_LOG`: logging level (default: info). Logs go to stderr.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use tracing::info;

use prodsynth::analysis;
use prodsynth::config::defaults::MAX_SEED;
use prodsynth::output::{self, OutputDest, OutputFormat};
use prodsynth::{FieldSimulator, SimulationConfig};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "prodsynth")]
#[command(about = "Synthetic oil-well production data generator")]
#[command(version)]
struct CliArgs {
    /// Path to a TOML config file (overrides PRODSYNTH_CONFIG and ./prodsynth.toml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Number of days to simulate
    #[arg(short, long)]
    days: Option<usize>,

    /// Number of wells to sample (ignored when the config lists wells)
    #[arg(short, long)]
    wells: Option<usize>,

    /// Number of fields sampled wells are spread over
    #[arg(long)]
    fields: Option<usize>,

    /// RNG seed for a reproducible run (0 to 9223372036854775807)
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(0..=MAX_SEED))]
    seed: Option<u64>,

    /// First production date (YYYY-MM-DD)
    #[arg(long, value_name = "YYYY-MM-DD")]
    start_date: Option<NaiveDate>,

    /// Table format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Write the table to this file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Z-score multiplier for outlier flagging in the report
    #[arg(long, value_name = "K")]
    outlier_threshold: Option<f64>,

    /// Also write a JSON statistics report (<output>.report.json, or stderr)
    #[arg(long)]
    report: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

impl CliArgs {
    /// Command-line values take precedence over the config file.
    fn apply_overrides(&self, config: &mut SimulationConfig) {
        let sim = &mut config.simulation;
        if let Some(days) = self.days {
            sim.days = days;
        }
        if let Some(wells) = self.wells {
            sim.well_count = wells;
        }
        if let Some(fields) = self.fields {
            sim.field_count = fields;
        }
        if let Some(seed) = self.seed {
            sim.seed = Some(seed);
        }
        if let Some(start) = self.start_date {
            sim.start_date = start;
        }
        if let Some(k) = self.outlier_threshold {
            config.analysis.outlier_sigma = k;
        }
    }
}

// ============================================================================
// Main
// ============================================================================

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    let mut config = match &args.config {
        Some(path) => SimulationConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => SimulationConfig::load(),
    };
    args.apply_overrides(&mut config);

    if args.print_config {
        config.validate().context("Invalid configuration")?;
        print!("{}", config.to_toml().context("Failed to serialize config")?);
        return Ok(());
    }

    let simulator = FieldSimulator::new(&config).context("Invalid configuration")?;
    let table = simulator.run().context("Simulation failed")?;

    let dest = args
        .output
        .clone()
        .map_or(OutputDest::Stdout, OutputDest::File);
    output::write_table(&table, args.format, &dest).context("Failed to write production table")?;

    if args.report {
        let report = analysis::analyze(&table, config.analysis.outlier_sigma);
        let report_dest = args
            .output
            .as_deref()
            .map_or(OutputDest::Stderr, |p| OutputDest::File(output::report_path(p)));
        output::write_report(&report, &report_dest).context("Failed to write statistics report")?;
        info!(dest = ?report_dest, "Statistics report written");
    }

    info!(
        rows = table.len(),
        wells = config.effective_well_count(),
        days = simulator.days(),
        "Done"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_overrides_config_values() {
        let args = CliArgs::parse_from([
            "prodsynth",
            "--days",
            "30",
            "--wells",
            "4",
            "--seed",
            "9",
            "--start-date",
            "2020-02-01",
            "--outlier-threshold",
            "2.5",
            "--format",
            "json",
        ]);
        let mut config = SimulationConfig::default();
        args.apply_overrides(&mut config);

        assert_eq!(config.simulation.days, 30);
        assert_eq!(config.simulation.well_count, 4);
        assert_eq!(config.simulation.seed, Some(9));
        assert_eq!(config.simulation.start_date, NaiveDate::from_ymd_opt(2020, 2, 1).unwrap());
        assert_eq!(config.analysis.outlier_sigma, 2.5);
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn seed_limited_to_what_toml_can_hold() {
        assert!(CliArgs::try_parse_from(["prodsynth", "--seed", "18446744073709551615"]).is_err());

        let args = CliArgs::try_parse_from(["prodsynth", "--seed", "9223372036854775807"]).unwrap();
        let mut config = SimulationConfig::default();
        args.apply_overrides(&mut config);
        let text = config.to_toml().unwrap();
        assert_eq!(SimulationConfig::from_toml_str(&text).unwrap().simulation.seed, Some(MAX_SEED));
    }

    #[test]
    fn absent_flags_keep_config() {
        let args = CliArgs::parse_from(["prodsynth"]);
        let mut config = SimulationConfig::default();
        config.simulation.days = 12;
        args.apply_overrides(&mut config);
        assert_eq!(config.simulation.days, 12);
        assert_eq!(args.format, OutputFormat::Csv);
        assert!(!args.report);
    }
}
