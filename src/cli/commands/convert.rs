use crate::cli::formatter::{self, format_count, print_success, print_summary};
use crate::core::config::{default_config, load_config, ConvertSettings};
use crate::core::converter::Converter;
use crate::core::mode::StoreMode;
use clap::Args;
use humansize::{format_size, BINARY};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Sparse input: one `label1 label2 distance` per line (.gz accepted)
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Output matrix file (gzip-compressed TSV)
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Gzip compression level (1-9) [default: 4]
    #[arg(short = 'l', long, alias = "compresslevel", value_name = "LEVEL")]
    pub compress_level: Option<u32>,

    /// Distance store: auto, mem or disk [default: auto]
    #[arg(short, long, value_name = "MODE")]
    pub mode: Option<StoreMode>,

    /// Label count above which auto mode streams from disk [default: 10000]
    #[arg(short, long, value_name = "LABELS")]
    pub threshold: Option<usize>,

    /// Configuration file (TOML)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// No progress bar or summary
    #[arg(short, long)]
    pub quiet: bool,
}

impl ConvertArgs {
    /// Merge flags over the config file (or defaults)
    pub fn settings(&self) -> crate::Result<ConvertSettings> {
        let config = match &self.config {
            Some(path) => load_config(path)?,
            None => default_config(),
        };

        ConvertSettings::resolve(
            self.input.clone(),
            self.output.clone(),
            &config,
            self.compress_level,
            self.mode,
            self.threshold,
        )
    }
}

pub fn run(args: ConvertArgs) -> anyhow::Result<()> {
    formatter::init();

    let settings = args.settings()?;
    tracing::debug!("Resolved settings: {:?}", settings);

    let report = Converter::new(settings).with_silent(args.quiet).run()?;

    if !args.quiet {
        print_success(&format!(
            "Wrote {} x {} matrix to {}",
            format_count(report.labels),
            format_count(report.labels),
            args.output.display()
        ));
        print_summary(
            "Conversion summary",
            &[
                ("Store", report.strategy.to_string()),
                ("Stored values", format_count(report.emitted.stored_values)),
                ("Default-filled", format_count(report.emitted.filled_values)),
                ("Compressed size", format_size(report.output_bytes, BINARY)),
                ("Elapsed", format!("{:.2?}", report.elapsed)),
            ],
        );
    }

    Ok(())
}
