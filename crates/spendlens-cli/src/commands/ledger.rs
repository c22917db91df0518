//! Ledger loading and the lightweight ledger commands
//!
//! This module contains:
//! - `load_analyzer` - Shared utility to load a CSV and build an analyzer
//! - `cmd_summary` - Quick ledger summary
//! - `cmd_categories` - Category totals

use std::fmt::Write;
use std::path::Path;

use anyhow::{Context, Result};
use spendlens_core::analysis::CategoryTotal;
use spendlens_core::{load_csv, AnalysisConfig, SpendingAnalyzer};
use tracing::debug;

use super::truncate;

/// Load a ledger and build an analyzer with the resolved threshold config
pub fn load_analyzer(file: &Path, config_path: Option<&Path>) -> Result<SpendingAnalyzer> {
    let config = AnalysisConfig::load(config_path).context("Failed to load analysis config")?;
    let outcome = load_csv(file)
        .with_context(|| format!("Failed to load ledger: {}", file.display()))?;

    if outcome.rows_dropped > 0 {
        debug!(
            dropped = outcome.rows_dropped,
            read = outcome.rows_read,
            "Some rows were skipped during import"
        );
    }

    Ok(SpendingAnalyzer::with_config(&outcome.table, config))
}

pub fn cmd_summary(file: &Path, config_path: Option<&Path>) -> Result<()> {
    let analyzer = load_analyzer(file, config_path)?;
    print!("{}", render_summary(file, &analyzer)?);
    Ok(())
}

pub fn render_summary(file: &Path, analyzer: &SpendingAnalyzer) -> Result<String> {
    let overview = analyzer.overview();
    let mut out = String::new();

    writeln!(out)?;
    writeln!(out, "📒 Ledger Summary")?;
    writeln!(out, "   File: {}", file.display())?;
    writeln!(out, "   ─────────────────────────────────────────────")?;
    writeln!(out, "   Transactions:    {}", overview.num_transactions)?;
    writeln!(
        out,
        "   Period:          {} to {} ({} days)",
        overview.date_range.start, overview.date_range.end, overview.date_range.days
    )?;
    writeln!(out, "   Total spent:     ${:.2}", overview.total_spending)?;
    writeln!(out, "   Categories:      {}", analyzer.table().categories().len())?;
    writeln!(out, "   Avg transaction: ${:.2}", overview.avg_transaction_amount)?;

    Ok(out)
}

pub fn cmd_categories(file: &Path, config_path: Option<&Path>) -> Result<()> {
    let analyzer = load_analyzer(file, config_path)?;
    print!("{}", render_categories(&analyzer.categories())?);
    Ok(())
}

pub fn render_categories(categories: &[CategoryTotal]) -> Result<String> {
    let mut out = String::new();

    writeln!(out)?;
    writeln!(out, "🏷️  Categories ({})", categories.len())?;
    writeln!(out, "   {:25} │ {:>10}", "Category", "Total")?;
    writeln!(out, "   ──────────────────────────┼────────────")?;
    for cat in categories {
        writeln!(out, "   {:25} │ {:>10.2}", truncate(&cat.category, 25), cat.total)?;
    }

    Ok(out)
}
