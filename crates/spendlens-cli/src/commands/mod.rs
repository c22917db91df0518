//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `analyze` - Full analysis report (text tables or JSON)
//! - `ledger` - Ledger loading shared by every command, plus `summary` and `categories`
//! - `sample` - Sample ledger generation
//! - `simulate` - Savings simulation for one category

pub mod analyze;
pub mod ledger;
pub mod sample;
pub mod simulate;

// Re-export command functions for main.rs
pub use analyze::*;
pub use ledger::*;
pub use sample::*;
pub use simulate::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Format an optional statistic, showing "n/a" when undefined
pub fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "n/a".to_string(),
    }
}
