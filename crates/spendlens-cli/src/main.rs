//! SpendLens CLI - Spending analyzer for CSV ledgers
//!
//! Usage:
//!   spendlens summary --file ledger.csv                  Quick ledger summary
//!   spendlens analyze --file ledger.csv --format json    Full analysis
//!   spendlens categories --file ledger.csv               Category totals
//!   spendlens simulate --file ledger.csv -c dining -r 25 Savings simulation
//!   spendlens sample --output sample.csv --records 200   Generate a sample ledger

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Logs go to stderr so JSON on stdout can be piped
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .compact()
                .with_writer(std::io::stderr),
        )
        .init();

    let config = cli.config.as_deref();

    match cli.command {
        Commands::Summary { file } => commands::cmd_summary(&file, config),
        Commands::Analyze { file, format } => commands::cmd_analyze(&file, config, format),
        Commands::Categories { file } => commands::cmd_categories(&file, config),
        Commands::Simulate {
            file,
            category,
            reduction,
        } => commands::cmd_simulate(&file, config, &category, reduction),
        Commands::Sample {
            output,
            records,
            seed,
        } => commands::cmd_sample(&output, records, seed),
    }
}
