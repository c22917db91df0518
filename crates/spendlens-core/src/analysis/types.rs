//! Result structures produced by the spending analyzer
//!
//! Everything here is plain data: currency is rounded to 2 dp and
//! percentages to 1 dp, undefined statistics are `None` (JSON `null`), and
//! signals that need more history than the table has are omitted.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::Result;
use crate::insights::Insight;

/// Snapshot of every analysis section
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub overview: Overview,
    pub category_analysis: CategoryAnalysis,
    pub time_analysis: TimeAnalysis,
    pub trend_analysis: TrendAnalysis,
    pub weekday_analysis: WeekdayAnalysis,
    pub outlier_analysis: OutlierAnalysis,
    pub insights: Vec<Insight>,
}

impl AnalysisResult {
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewDateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub total_spending: f64,
    pub num_transactions: usize,
    pub date_range: OverviewDateRange,
    pub avg_daily_spending: f64,
    pub avg_transaction_amount: f64,
    pub median_transaction_amount: f64,
    /// Sample standard deviation; undefined for a single transaction
    pub spending_std: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStats {
    pub category: String,
    pub total: f64,
    pub avg_per_transaction: f64,
    pub frequency: usize,
    /// Undefined for single-transaction categories
    pub std: Option<f64>,
    /// Share of total spending (1 dp)
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryAnalysis {
    /// All categories, largest total first
    pub summary: Vec<CategoryStats>,
    pub top_categories: Vec<CategoryStats>,
    pub category_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyBucket {
    pub year: i32,
    pub month: u32,
    /// "YYYY-MM"
    pub period: String,
    pub total_spending: f64,
    pub transaction_count: usize,
}

/// Spending per ISO week number
///
/// Buckets are keyed by week number alone, so the same week in different
/// years lands in one bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyBucket {
    pub week_number: u32,
    pub total: f64,
    pub avg: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthlyTrend {
    Increasing,
    Decreasing,
    Stable,
    InsufficientData,
}

impl MonthlyTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            MonthlyTrend::Increasing => "Increasing",
            MonthlyTrend::Decreasing => "Decreasing",
            MonthlyTrend::Stable => "Stable",
            MonthlyTrend::InsufficientData => "Insufficient data for trend analysis",
        }
    }
}

impl std::fmt::Display for MonthlyTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeAnalysis {
    pub monthly: Vec<MonthlyBucket>,
    pub weekly: Vec<WeeklyBucket>,
    pub daily_recent: Vec<DailyTotal>,
    pub monthly_trend: MonthlyTrend,
}

/// Month-over-month growth between the two most recent months
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthOverMonth {
    /// Percent change (1 dp)
    Change(f64),
    /// The previous month total was zero
    Undefined,
}

impl MonthOverMonth {
    pub fn percent(&self) -> Option<f64> {
        match self {
            MonthOverMonth::Change(p) => Some(*p),
            MonthOverMonth::Undefined => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendAnalysis {
    #[serde(rename = "7_day_avg", skip_serializing_if = "Option::is_none")]
    pub seven_day_avg: Option<f64>,
    #[serde(rename = "30_day_avg", skip_serializing_if = "Option::is_none")]
    pub thirty_day_avg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mom_growth: Option<MonthOverMonth>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekdayStats {
    pub weekday: &'static str,
    pub total: f64,
    /// Undefined for days without transactions
    pub avg: Option<f64>,
    pub frequency: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekendSplit {
    pub weekend_avg: Option<f64>,
    pub weekday_avg: Option<f64>,
    pub weekend_total: f64,
    pub weekday_total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekdayAnalysis {
    /// Always seven entries, Monday through Sunday
    pub by_weekday: Vec<WeekdayStats>,
    pub weekend_vs_weekday: WeekendSplit,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlierTransaction {
    pub date: NaiveDate,
    pub category: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryVariance {
    pub category: String,
    pub std: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlierAnalysis {
    pub high_amount_transactions: Vec<OutlierTransaction>,
    pub outlier_threshold: f64,
    pub num_outliers: usize,
    pub high_variance_categories: Vec<CategoryVariance>,
}

/// Projected effect of cutting spending in one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavingsSimulation {
    pub category: String,
    pub current_spending: f64,
    pub reduction_percentage: f64,
    pub potential_savings: f64,
    pub monthly_savings_estimate: f64,
    pub annual_savings_estimate: f64,
    pub new_category_total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}
