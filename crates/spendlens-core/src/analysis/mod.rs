//! Spending analysis engine
//!
//! Turns a [`TransactionTable`](crate::models::TransactionTable) into:
//!
//! - **Overview** - totals, date span, per-transaction mean/median/std
//! - **Category breakdown** - per-category sum/mean/count/std and share
//! - **Time breakdown** - monthly, ISO-weekly and trailing daily totals
//! - **Trend signals** - rolling daily averages and month-over-month growth
//! - **Weekday patterns** - Monday..Sunday buckets, weekend vs weekday
//! - **Outliers** - IQR fence and the largest transactions above it
//! - **Insights** - rule-triggered statements over the sections above
//!
//! plus a per-category savings simulation.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use spendlens_core::analysis::SpendingAnalyzer;
//!
//! let analyzer = SpendingAnalyzer::new(&table);
//! let result = analyzer.run_full_analysis();
//! let sim = analyzer.simulate_savings("Dining", 20.0)?;
//! ```

pub mod engine;
pub mod savings;
pub mod types;

pub use engine::{classify_monthly_trend, iqr_threshold, month_over_month, SpendingAnalyzer};
pub use types::{
    AnalysisResult, CategoryAnalysis, CategoryStats, CategoryTotal, CategoryVariance, DailyTotal,
    MonthOverMonth, MonthlyBucket, MonthlyTrend, OutlierAnalysis, OutlierTransaction, Overview,
    OverviewDateRange, SavingsSimulation, TimeAnalysis, TrendAnalysis, WeekdayAnalysis,
    WeekdayStats, WeekendSplit, WeeklyBucket,
};
