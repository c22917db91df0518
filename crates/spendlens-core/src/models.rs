//! Domain models for SpendLens

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

use crate::error::{Error, Result};

/// Weekdays in reporting order (Monday first)
pub const WEEKDAY_ORDER: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// English day name for a weekday
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// English month name for a 1-based month number
pub fn month_name(month: u32) -> &'static str {
    const NAMES: [&str; 12] = [
        "January", "February", "March", "April", "May", "June", "July", "August", "September",
        "October", "November", "December",
    ];
    month
        .checked_sub(1)
        .and_then(|i| NAMES.get(i as usize))
        .copied()
        .unwrap_or("")
}

/// Normalize a category label: trim, then title-case every alphabetic run
///
/// "  fast food" becomes "Fast Food", "e-BOOKS" becomes "E-Books".
pub fn normalize_category(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_alpha = false;
    for c in raw.trim().chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// A single spending record with its calendar features
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub category: String,
    pub amount: f64,
    /// Free-text notes carried over from the ledger
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub year: i32,
    pub month: u32,
    pub month_name: &'static str,
    /// Day of the month (1-31)
    pub day: u32,
    #[serde(skip)]
    pub weekday: Weekday,
    pub weekday_name: &'static str,
    /// ISO week number (1-53)
    pub week_number: u32,
    pub is_weekend: bool,
}

impl Transaction {
    /// Build a transaction, normalizing the category and deriving calendar fields
    pub fn new(date: NaiveDate, category: &str, amount: f64) -> Self {
        let weekday = date.weekday();
        Self {
            date,
            category: normalize_category(category),
            amount,
            notes: None,
            year: date.year(),
            month: date.month(),
            month_name: month_name(date.month()),
            day: date.day(),
            weekday,
            weekday_name: weekday_name(weekday),
            week_number: date.iso_week().week(),
            is_weekend: matches!(weekday, Weekday::Sat | Weekday::Sun),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Inclusive span of calendar dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Number of calendar days covered, counting both ends
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Validated, non-empty collection of transactions
///
/// The table never changes after construction.
#[derive(Debug, Clone)]
pub struct TransactionTable {
    transactions: Vec<Transaction>,
    date_range: DateRange,
}

impl TransactionTable {
    pub fn new(transactions: Vec<Transaction>) -> Result<Self> {
        let first = transactions
            .first()
            .ok_or_else(|| Error::InvalidData("transaction table is empty".into()))?;
        let mut start = first.date;
        let mut end = first.date;

        for (idx, tx) in transactions.iter().enumerate() {
            if !(tx.amount.is_finite() && tx.amount > 0.0) {
                return Err(Error::InvalidData(format!(
                    "row {}: amount must be positive, got {}",
                    idx, tx.amount
                )));
            }
            if tx.category.trim().is_empty() {
                return Err(Error::InvalidData(format!("row {}: empty category", idx)));
            }
            start = start.min(tx.date);
            end = end.max(tx.date);
        }

        Ok(Self {
            transactions,
            date_range: DateRange { start, end },
        })
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Always false for a constructed table
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn date_range(&self) -> DateRange {
        self.date_range
    }

    pub fn total(&self) -> f64 {
        self.transactions.iter().map(|t| t.amount).sum()
    }

    /// Distinct categories in first-appearance order
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for tx in &self.transactions {
            if !seen.contains(&tx.category.as_str()) {
                seen.push(&tx.category);
            }
        }
        seen
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.transactions.iter().any(|t| t.category == category)
    }
}
