pub mod commands;
pub mod formatter;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "distwiz",
    version,
    about = "Convert sparse pairwise distances into a dense gzip-compressed matrix",
    long_about = "distwiz reads `label1 label2 distance` lines and writes a labeled, tab-separated \
                  square matrix (gzip-compressed). Missing pairs default to 1.0 and the diagonal \
                  is 0.0. Small inputs are converted in memory; large ones are streamed by \
                  re-reading the input once per row."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a sparse distance list into a dense compressed matrix
    Convert(commands::convert::ConvertArgs),

    /// Profile a sparse distance list without writing a matrix
    Stats(commands::stats::StatsArgs),
}
