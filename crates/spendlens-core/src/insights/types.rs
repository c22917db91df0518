//! Core types for the insight rules

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kinds of insights the built-in rules can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    /// Largest spending category and its share
    TopCategory,
    /// Weekend transactions are notably larger than weekday ones
    WeekendSpending,
    /// Spending rose month over month
    SpendingIncrease,
    /// Spending fell month over month
    SpendingDecrease,
    /// Transactions above the IQR outlier threshold
    UnusualTransactions,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::TopCategory => "top_category",
            InsightKind::WeekendSpending => "weekend_spending",
            InsightKind::SpendingIncrease => "spending_increase",
            InsightKind::SpendingDecrease => "spending_decrease",
            InsightKind::UnusualTransactions => "unusual_transactions",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Severity level of an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational - no action needed
    Info,
    /// Worth attention but not urgent
    Attention,
    /// Should be addressed soon
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Attention => "attention",
            Severity::Warning => "warning",
        }
    }

    /// Numeric priority (higher = more urgent)
    pub fn priority(&self) -> u8 {
        match self {
            Severity::Info => 1,
            Severity::Attention => 2,
            Severity::Warning => 3,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Structured values an insight was derived from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InsightData {
    TopCategory {
        category: String,
        percentage: f64,
    },
    WeekendSpending {
        /// How much larger the weekend average is, in percent (1 dp)
        percent_more: f64,
        weekend_avg: f64,
        weekday_avg: f64,
    },
    MonthOverMonth {
        /// Signed month-over-month change in percent (1 dp)
        growth_percent: f64,
    },
    Outliers {
        count: usize,
        threshold: f64,
    },
}

/// A rule-triggered observation, ready to render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub severity: Severity,
    /// Fixed-template sentence
    pub message: String,
    pub data: InsightData,
}

impl Insight {
    pub fn new(
        kind: InsightKind,
        severity: Severity,
        message: impl Into<String>,
        data: InsightData,
    ) -> Self {
        Self {
            kind,
            severity,
            message: message.into(),
            data,
        }
    }
}
