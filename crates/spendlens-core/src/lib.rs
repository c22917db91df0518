//! SpendLens Core Library
//!
//! Shared functionality for the SpendLens spending analyzer:
//! - Transaction model and validated transaction tables
//! - CSV ledger import with format normalization
//! - Aggregation primitives (bucketed statistics, percentiles, rolling means)
//! - Analysis engine (overview, categories, time, trends, weekdays, outliers)
//! - Rule-based insight derivation
//! - Savings simulation
//! - Sample ledger generation
//! - Threshold configuration with TOML overrides

pub mod analysis;
pub mod config;
pub mod error;
pub mod import;
pub mod insights;
pub mod models;
pub mod sample;
pub mod stats;

pub use analysis::{AnalysisResult, SavingsSimulation, SpendingAnalyzer};
pub use config::AnalysisConfig;
pub use error::{Error, Result};
pub use import::{load_csv, parse_csv, ImportOutcome};
pub use insights::{Insight, InsightEngine, InsightKind, InsightRule, Severity};
pub use models::{Transaction, TransactionTable};
pub use sample::{create_sample_ledger, generate_sample_ledger, DEFAULT_SAMPLE_RECORDS};
