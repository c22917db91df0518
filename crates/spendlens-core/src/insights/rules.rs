//! Built-in insight rules
//!
//! Each rule fires on an exact threshold and renders a fixed-template
//! sentence alongside the structured values it used.

use crate::analysis::types::MonthOverMonth;
use crate::stats::round_to;

use super::engine::{InsightInputs, InsightRule};
use super::types::{Insight, InsightData, InsightKind, Severity};

/// Names the largest category and its share of total spending
pub struct TopCategoryRule;

impl InsightRule for TopCategoryRule {
    fn id(&self) -> InsightKind {
        InsightKind::TopCategory
    }

    fn name(&self) -> &'static str {
        "Top Category"
    }

    fn evaluate(&self, inputs: &InsightInputs<'_>) -> Option<Insight> {
        let top = inputs.categories.summary.first()?;
        Some(Insight::new(
            InsightKind::TopCategory,
            Severity::Info,
            format!(
                "Your highest spending category is {}, accounting for {:.1}% of total expenses.",
                top.category, top.percentage
            ),
            InsightData::TopCategory {
                category: top.category.clone(),
                percentage: top.percentage,
            },
        ))
    }
}

/// Fires when the weekend mean exceeds the weekday mean by more than `ratio`
pub struct WeekendSpendingRule {
    ratio: f64,
}

impl WeekendSpendingRule {
    pub fn new(ratio: f64) -> Self {
        Self { ratio }
    }
}

impl Default for WeekendSpendingRule {
    fn default() -> Self {
        Self::new(1.2)
    }
}

impl InsightRule for WeekendSpendingRule {
    fn id(&self) -> InsightKind {
        InsightKind::WeekendSpending
    }

    fn name(&self) -> &'static str {
        "Weekend Spending"
    }

    fn evaluate(&self, inputs: &InsightInputs<'_>) -> Option<Insight> {
        let weekend_avg = inputs.weekend.weekend_avg?;
        let weekday_avg = inputs.weekend.weekday_avg?;
        if weekday_avg <= 0.0 || weekend_avg <= weekday_avg * self.ratio {
            return None;
        }

        let percent_more = round_to((weekend_avg / weekday_avg - 1.0) * 100.0, 1);
        Some(Insight::new(
            InsightKind::WeekendSpending,
            Severity::Attention,
            format!(
                "You tend to spend {:.1}% more on weekends than weekdays.",
                percent_more
            ),
            InsightData::WeekendSpending {
                percent_more,
                weekend_avg: round_to(weekend_avg, 2),
                weekday_avg: round_to(weekday_avg, 2),
            },
        ))
    }
}

/// Fires when month-over-month growth leaves the `[-threshold, threshold]` band
pub struct MonthOverMonthRule {
    threshold: f64,
}

impl MonthOverMonthRule {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl Default for MonthOverMonthRule {
    fn default() -> Self {
        Self::new(10.0)
    }
}

impl InsightRule for MonthOverMonthRule {
    fn id(&self) -> InsightKind {
        InsightKind::SpendingIncrease
    }

    fn name(&self) -> &'static str {
        "Month Over Month"
    }

    fn evaluate(&self, inputs: &InsightInputs<'_>) -> Option<Insight> {
        // Undefined growth (zero previous month) never triggers
        let growth = match inputs.trends.mom_growth? {
            MonthOverMonth::Change(g) => g,
            MonthOverMonth::Undefined => return None,
        };
        let data = InsightData::MonthOverMonth {
            growth_percent: growth,
        };

        if growth > self.threshold {
            Some(Insight::new(
                InsightKind::SpendingIncrease,
                Severity::Warning,
                format!(
                    "Your spending increased by {:.1}% compared to last month.",
                    growth
                ),
                data,
            ))
        } else if growth < -self.threshold {
            Some(Insight::new(
                InsightKind::SpendingDecrease,
                Severity::Info,
                format!(
                    "Good news! Your spending decreased by {:.1}% compared to last month.",
                    growth.abs()
                ),
                data,
            ))
        } else {
            None
        }
    }
}

/// Reports how many transactions crossed the outlier threshold
pub struct OutlierRule;

impl InsightRule for OutlierRule {
    fn id(&self) -> InsightKind {
        InsightKind::UnusualTransactions
    }

    fn name(&self) -> &'static str {
        "Unusual Transactions"
    }

    fn evaluate(&self, inputs: &InsightInputs<'_>) -> Option<Insight> {
        let outliers = inputs.outliers;
        if outliers.num_outliers == 0 {
            return None;
        }
        Some(Insight::new(
            InsightKind::UnusualTransactions,
            Severity::Attention,
            format!(
                "You had {} unusually large transactions above ${:.2}.",
                outliers.num_outliers, outliers.outlier_threshold
            ),
            InsightData::Outliers {
                count: outliers.num_outliers,
                threshold: outliers.outlier_threshold,
            },
        ))
    }
}
