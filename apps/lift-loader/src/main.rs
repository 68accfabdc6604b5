//! lift-loader — generate a synthetic elevator call dataset.
//!
//! Reads the business rules from a JSON file, draws per-floor demographics,
//! derives the demand model, and writes `dataset_length` calls to the chosen
//! sink under `--output`:
//!
//! | `--sink`  | File            |
//! |-----------|-----------------|
//! | `sqlite`  | `calls.db`      |
//! | `csv`     | `calls.csv`     |
//! | `parquet` | `calls.parquet` |
//!
//! Log level follows `RUST_LOG` (default `info`).

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use lift_core::{BusinessRules, CallRecord, FloorLayout, SimRng};
use lift_gen::{GenConfig, GenObserver, GeneratorBuilder, NoopObserver, RunSummary};
use lift_model::{DemographicRanges, FloorDemographics, WeightModel};
use lift_output::{CsvSink, ParquetSink, RecordSink, SqliteStore};

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum SinkKind {
    Sqlite,
    Csv,
    Parquet,
}

#[derive(Debug, Parser)]
#[command(author, version, about = "Synthetic elevator call dataset generator")]
struct Cli {
    /// Number of regular floors (ground and garage excluded)
    #[arg(short = 't', long, alias = "total_floor", default_value_t = 10)]
    total_floor: u32,

    /// Number of calls to generate
    #[arg(short = 'd', long, aliases = ["data_lenght", "dataset_length"], default_value_t = 20)]
    dataset_length: usize,

    /// Minimum people per floor (inclusive)
    #[arg(short = 'n', long, alias = "min_num_people", default_value_t = 1)]
    min_num_people: u32,

    /// Maximum people per floor (exclusive)
    #[arg(short = 'o', long, alias = "max_num_people", default_value_t = 10)]
    max_num_people: u32,

    /// Minimum average age per floor (inclusive)
    #[arg(short = 'p', long, alias = "min_avg_age", default_value_t = 18)]
    min_avg_age: u32,

    /// Maximum average age per floor (exclusive)
    #[arg(short = 'q', long, alias = "max_avg_age", default_value_t = 90)]
    max_avg_age: u32,

    /// Business rules JSON file
    #[arg(long, default_value = "business_rules.json")]
    rules: PathBuf,

    /// Output backend
    #[arg(long, value_enum, default_value_t = SinkKind::Sqlite)]
    sink: SinkKind,

    /// Output directory (created if missing)
    #[arg(long, default_value = "output")]
    output: PathBuf,

    /// Seed for a reproducible dataset (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Seconds between consecutive calls
    #[arg(long, default_value_t = 60)]
    interval_secs: u32,

    /// Print demographics, distributions and every call to stdout
    #[arg(short, long)]
    verbose: bool,
}

// ── Verbose observer ──────────────────────────────────────────────────────────

/// Prints the model inputs and outputs as they become available.
struct PrintingObserver;

impl GenObserver for PrintingObserver {
    fn on_demographics(&mut self, demographics: &FloorDemographics) {
        println!("People per floor:   {:?}", demographics.populations());
        println!("Average age:        {:?}", demographics.ages());
    }

    fn on_model(&mut self, model: &WeightModel) {
        println!("Floor rank weights: {}", model.rank);
        println!("Population weights: {}", model.population);
        println!("Age weights:        {}", model.age);
        println!("Demand weights:     {}", model.demand);
        println!();
        println!("{:>6} {:>12} {:>12}  {}", "call", "next_floor", "demand_floor", "call_datetime");
    }

    fn on_record(&mut self, index: usize, record: &CallRecord) {
        println!(
            "{:>6} {:>12} {:>12}  {}",
            index,
            record.next_floor,
            record.demand_floor,
            record.call_time.to_rfc3339(),
        );
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 1. Business rules and building.
    let rules = BusinessRules::from_json_path(&cli.rules)
        .with_context(|| format!("loading business rules from {}", cli.rules.display()))?;
    let layout = FloorLayout::from_rules(cli.total_floor, &rules)?;

    // 2. Generator.
    let config = GenConfig {
        dataset_length: cli.dataset_length,
        interval_secs:  cli.interval_secs,
        ..GenConfig::default()
    };
    let ranges = DemographicRanges {
        population: cli.min_num_people..cli.max_num_people,
        avg_age:    cli.min_avg_age..cli.max_avg_age,
    };
    let rng = cli.seed.map_or_else(SimRng::from_entropy, SimRng::new);
    let mut generator = GeneratorBuilder::new(rules, layout, config)
        .ranges(ranges)
        .rng(rng)
        .build()
        .context("building generator")?;

    // 3. Sink.
    std::fs::create_dir_all(&cli.output)
        .with_context(|| format!("creating output directory {}", cli.output.display()))?;
    let mut sink = open_sink(cli.sink, &cli.output)?;

    // 4. Run.
    let t0 = Instant::now();
    let outcome = if cli.verbose {
        generator.run(&mut sink, &mut PrintingObserver)
    } else {
        generator.run(&mut sink, &mut NoopObserver)
    };
    let summary = outcome.context("generating calls")?;
    let elapsed = t0.elapsed();
    info!(
        records = summary.records,
        sink    = ?cli.sink,
        output  = %cli.output.display(),
        secs    = elapsed.as_secs_f64(),
        "dataset written",
    );

    print_summary(&summary, cli.sink, &cli.output, elapsed.as_secs_f64());
    Ok(())
}

fn open_sink(kind: SinkKind, dir: &Path) -> Result<Box<dyn RecordSink>> {
    let sink: Box<dyn RecordSink> = match kind {
        SinkKind::Sqlite => Box::new(SqliteStore::new(dir)?),
        SinkKind::Csv => Box::new(CsvSink::new(dir)?),
        SinkKind::Parquet => Box::new(ParquetSink::new(dir)?),
    };
    Ok(sink)
}

fn print_summary(summary: &RunSummary, kind: SinkKind, dir: &Path, secs: f64) {
    println!("Generated {} calls in {secs:.3} s ({kind:?} → {})", summary.records, dir.display());
    if let (Some(first), Some(last)) = (summary.first_call, summary.last_call) {
        println!("  first call : {}", first.to_rfc3339());
        println!("  last call  : {}", last.to_rfc3339());
    }
    println!("  resampled demand floors: {}", summary.demand_resamples);
}
