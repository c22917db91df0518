//! Insight rules - structured observations derived from analysis results
//!
//! The rule set runs after every other analysis section and turns their
//! numbers into short, templated statements for presentation layers.
//!
//! ## Built-in rules (in emission order)
//!
//! - **Top Category** - always emitted: largest category and its share
//! - **Weekend Spending** - weekend mean above 1.2x the weekday mean
//! - **Month Over Month** - growth above +10% or below -10%
//! - **Unusual Transactions** - at least one IQR outlier
//!
//! ## Usage
//!
//! ```rust,ignore
//! use spendlens_core::insights::{InsightEngine, InsightInputs};
//!
//! let engine = InsightEngine::new();
//! let insights = engine.derive(&inputs);
//! ```

pub mod engine;
pub mod rules;
pub mod types;

pub use engine::{InsightEngine, InsightInputs, InsightRule, WeekendAverages};
pub use rules::{MonthOverMonthRule, OutlierRule, TopCategoryRule, WeekendSpendingRule};
pub use types::{Insight, InsightData, InsightKind, Severity};
