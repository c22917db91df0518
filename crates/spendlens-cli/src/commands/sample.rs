//! Sample ledger command

use std::path::Path;

use anyhow::{Context, Result};
use spendlens_core::create_sample_ledger;

pub fn cmd_sample(output: &Path, records: usize, seed: Option<u64>) -> Result<()> {
    let written = create_sample_ledger(output, records, seed)
        .with_context(|| format!("Failed to write sample ledger: {}", output.display()))?;

    println!("✅ Wrote {} sample transactions to {}", written, output.display());
    println!();
    println!("Next steps:");
    println!("  1. Quick look: spendlens summary --file {}", output.display());
    println!("  2. Full report: spendlens analyze --file {}", output.display());

    Ok(())
}
