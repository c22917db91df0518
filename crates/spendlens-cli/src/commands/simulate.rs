//! Savings simulation command

use std::fmt::Write;
use std::path::Path;

use anyhow::Result;
use spendlens_core::models::normalize_category;
use spendlens_core::{Error, SavingsSimulation};

use super::load_analyzer;

pub fn cmd_simulate(
    file: &Path,
    config_path: Option<&Path>,
    category: &str,
    reduction: f64,
) -> Result<()> {
    let analyzer = load_analyzer(file, config_path)?;

    // Ledger labels are normalized on import, so normalize the input the same way
    let category = normalize_category(category);
    let sim = match analyzer.simulate_savings(&category, reduction) {
        Ok(sim) => sim,
        Err(Error::CategoryNotFound(name)) => {
            let known: Vec<_> = analyzer
                .categories()
                .into_iter()
                .map(|c| c.category)
                .collect();
            anyhow::bail!(
                "Category '{}' not found in data. Available: {}",
                name,
                known.join(", ")
            );
        }
        Err(e) => return Err(e.into()),
    };

    print!("{}", render_simulation(&sim)?);
    Ok(())
}

pub fn render_simulation(sim: &SavingsSimulation) -> Result<String> {
    let mut out = String::new();

    writeln!(out)?;
    writeln!(out, "💰 Savings Simulation: {}", sim.category)?;
    writeln!(out, "   ─────────────────────────────────────────────")?;
    writeln!(out, "   Current spending:   ${:.2}", sim.current_spending)?;
    writeln!(out, "   Reduction:          {:.1}%", sim.reduction_percentage)?;
    writeln!(out, "   Potential savings:  ${:.2}", sim.potential_savings)?;
    writeln!(out, "   New category total: ${:.2}", sim.new_category_total)?;
    writeln!(out)?;
    writeln!(out, "   Per month (est.):   ${:.2}", sim.monthly_savings_estimate)?;
    writeln!(out, "   Per year (est.):    ${:.2}", sim.annual_savings_estimate)?;

    Ok(out)
}
