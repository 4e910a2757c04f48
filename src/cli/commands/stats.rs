use crate::cli::formatter::{self, format_count, print_metrics_table, print_warning};
use crate::core::memory_estimator::MemoryEstimator;
use crate::core::mode::{select_strategy, StoreMode, StoreStrategy, DEFAULT_THRESHOLD};
use crate::core::source::InputSource;
use crate::core::stats::InputStats;
use clap::Args;
use humansize::{format_size, BINARY};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args)]
pub struct StatsArgs {
    /// Sparse input file (.gz accepted)
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Mode to evaluate
    #[arg(short, long, default_value = "auto")]
    pub mode: StoreMode,

    /// Label count above which auto mode streams from disk
    #[arg(short, long, default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: usize,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    pub format: String,
}

#[derive(Debug, Serialize)]
struct StatsReport {
    input: PathBuf,
    #[serde(flatten)]
    stats: InputStats,
    density: f64,
    strategy: StoreStrategy,
    estimated_store_bytes: u64,
    matrix_cells: u64,
}

pub fn run(args: StatsArgs) -> anyhow::Result<()> {
    formatter::init();

    let source = InputSource::new(&args.input);
    let stats = InputStats::collect(&source)?;

    let strategy = select_strategy(stats.unique_labels, args.threshold, args.mode);
    let estimator = MemoryEstimator::new();
    let estimated_store_bytes =
        estimator.estimate_store_memory(stats.valid_edges as u64, stats.unique_labels);
    let labels = stats.unique_labels as u64;

    let report = StatsReport {
        input: args.input.clone(),
        density: stats.density(),
        stats,
        strategy,
        estimated_store_bytes,
        matrix_cells: labels * labels,
    };

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "text" => print_text_report(&report, &estimator),
        other => anyhow::bail!("Unknown format: '{}'. Options: text, json", other),
    }

    Ok(())
}

fn print_text_report(report: &StatsReport, estimator: &MemoryEstimator) {
    let stats = &report.stats;
    let distance_range = match (stats.min_distance, stats.max_distance) {
        (Some(min), Some(max)) => format!("{} .. {}", min, max),
        _ => "-".to_string(),
    };

    print_metrics_table(
        &format!("Input: {}", report.input.display()),
        &[
            ("Lines", format_count(stats.total_lines)),
            ("Valid edges", format_count(stats.valid_edges)),
            ("Unique labels", format_count(stats.unique_labels)),
            ("Blank lines", format_count(stats.blank_lines)),
            ("Label-only lines", format_count(stats.label_only_lines)),
            ("Malformed lines", format_count(stats.malformed_lines)),
            ("Invalid distances", format_count(stats.invalid_distances)),
            ("Self pairs", format_count(stats.self_pairs)),
            ("Distance range", distance_range),
            ("Density", format!("{:.4}%", report.density * 100.0)),
            ("Store", report.strategy.to_string()),
            ("Est. in-memory store", format_size(report.estimated_store_bytes, BINARY)),
            ("Usable memory", format_size(estimator.usable_memory(), BINARY)),
        ],
    );

    if let Some(line) = stats.first_strict_error {
        print_warning(&format!(
            "line {} is not `label label distance`; an in-memory conversion would fail",
            line
        ));
    }
    if report.strategy == StoreStrategy::InMemory
        && !estimator.fits_in_memory(report.estimated_store_bytes)
    {
        print_warning("the in-memory store may not fit; consider --mode disk");
    }
}

