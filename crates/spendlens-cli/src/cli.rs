//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use spendlens_core::DEFAULT_SAMPLE_RECORDS;

/// SpendLens - Understand where your money goes
#[derive(Parser)]
#[command(name = "spendlens")]
#[command(about = "Spending analyzer for CSV expense ledgers", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Analysis threshold config (TOML)
    ///
    /// Defaults to ~/.config/spendlens/config.toml when present,
    /// otherwise the built-in thresholds are used.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show a short summary of a ledger
    Summary {
        /// CSV file with date, category and amount columns
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Run the full spending analysis
    Analyze {
        /// CSV file with date, category and amount columns
        #[arg(short, long)]
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List categories with their totals
    Categories {
        /// CSV file with date, category and amount columns
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Simulate cutting spending in one category
    Simulate {
        /// CSV file with date, category and amount columns
        #[arg(short, long)]
        file: PathBuf,

        /// Category to reduce (case-insensitive)
        #[arg(short, long)]
        category: String,

        /// Reduction in percent (values outside 0-100 are applied as given)
        #[arg(short, long, default_value = "20", allow_negative_numbers = true)]
        reduction: f64,
    },

    /// Write a randomly generated sample ledger
    Sample {
        /// Output CSV file
        #[arg(short, long, default_value = "sample_spending.csv")]
        output: PathBuf,

        /// Number of transactions to generate
        #[arg(short = 'n', long, default_value_t = DEFAULT_SAMPLE_RECORDS)]
        records: usize,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables
    Text,
    /// Pretty-printed JSON
    Json,
}
