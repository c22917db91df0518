//! Savings simulation
//!
//! Projects what cutting one category by a percentage would save, scaling
//! the saving over the observed period to 30- and 365-day estimates.

use tracing::debug;

use crate::error::{Error, Result};
use crate::stats::round_to;

use super::engine::SpendingAnalyzer;
use super::types::{CategoryTotal, SavingsSimulation};

impl SpendingAnalyzer {
    /// Simulate reducing spending in `category` by `reduction_percentage`
    ///
    /// `category` must match a normalized label in the table exactly. The
    /// percentage is not range-checked: values outside 0..=100 are applied
    /// arithmetically.
    pub fn simulate_savings(
        &self,
        category: &str,
        reduction_percentage: f64,
    ) -> Result<SavingsSimulation> {
        if !self.table().has_category(category) {
            return Err(Error::CategoryNotFound(category.to_string()));
        }

        let category_total: f64 = self
            .table()
            .transactions()
            .iter()
            .filter(|t| t.category == category)
            .map(|t| t.amount)
            .sum();
        let potential_savings = category_total * (reduction_percentage / 100.0);

        // Assumes the observed period is representative of any other
        let days = self.days_span() as f64;
        let monthly_savings = potential_savings * (30.0 / days);
        let annual_savings = potential_savings * (365.0 / days);

        debug!(
            category,
            reduction_percentage, potential_savings, "Savings simulation complete"
        );

        Ok(SavingsSimulation {
            category: category.to_string(),
            current_spending: round_to(category_total, 2),
            reduction_percentage,
            potential_savings: round_to(potential_savings, 2),
            monthly_savings_estimate: round_to(monthly_savings, 2),
            annual_savings_estimate: round_to(annual_savings, 2),
            new_category_total: round_to(category_total - potential_savings, 2),
        })
    }

    /// Every category with its total, alphabetically
    pub fn categories(&self) -> Vec<CategoryTotal> {
        let mut totals: Vec<CategoryTotal> = self
            .category_buckets()
            .into_iter()
            .map(|(category, acc)| CategoryTotal {
                category,
                total: round_to(acc.sum(), 2),
            })
            .collect();
        totals.sort_by(|a, b| a.category.cmp(&b.category));
        totals
    }
}
