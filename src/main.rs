use clap::Parser;
use distwiz::cli::{formatter::print_error, Cli, Commands};
use distwiz::DistwizError;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // DISTWIZ_LOG wins over -v
    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let log_level = std::env::var("DISTWIZ_LOG").unwrap_or_else(|_| default_level.to_string());

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        print_error(&e.to_string());

        let exit_code = match e.downcast_ref::<DistwizError>() {
            Some(DistwizError::Config(_)) => 2,
            Some(DistwizError::Io(_)) | Some(DistwizError::Open { .. }) => 3,
            Some(DistwizError::Format(_)) => 4,
            _ => 1,
        };
        process::exit(exit_code);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Convert(args) => distwiz::cli::commands::convert::run(args),
        Commands::Stats(args) => distwiz::cli::commands::stats::run(args),
    }
}
