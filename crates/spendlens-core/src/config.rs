//! Analysis thresholds
//!
//! Config is loaded with a two-layer resolution:
//! 1. An explicit path, or the user override (~/.config/spendlens/config.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! The embedded defaults reproduce the standard analysis exactly; overrides
//! only need to name the keys they change.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/analysis.toml");

/// Tunable thresholds for the spending analyzer
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Categories reported as top categories
    pub top_categories: usize,
    /// Trailing window for recent daily totals, in days
    pub recent_window_days: i64,
    /// Short rolling-average window (distinct days)
    pub short_window_days: usize,
    /// Long rolling-average window (distinct days)
    pub long_window_days: usize,
    /// Trailing months compared for the monthly trend label
    pub monthly_trend_months: usize,
    /// Multiplier applied to the IQR above Q3
    pub iqr_multiplier: f64,
    /// Largest outliers listed
    pub top_outliers: usize,
    /// Categories listed by highest standard deviation
    pub high_variance_categories: usize,
    /// Weekend/weekday average ratio that triggers the weekend insight
    pub weekend_ratio: f64,
    /// Month-over-month change (percent) that triggers a trend insight
    pub mom_change_percent: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_categories: 5,
            recent_window_days: 30,
            short_window_days: 7,
            long_window_days: 30,
            monthly_trend_months: 3,
            iqr_multiplier: 1.5,
            top_outliers: 5,
            high_variance_categories: 3,
            weekend_ratio: 1.2,
            mom_change_percent: 10.0,
        }
    }
}

impl AnalysisConfig {
    /// Load config, preferring `path`, then the user override, then defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let content = match path {
            Some(path) => fs::read_to_string(path).map_err(|e| {
                Error::Config(format!("Failed to read {}: {}", path.display(), e))
            })?,
            None => match default_config_path() {
                Some(default_path) if default_path.exists() => {
                    debug!(path = %default_path.display(), "Using user config override");
                    fs::read_to_string(&default_path).map_err(|e| {
                        Error::Config(format!("Failed to read {}: {}", default_path.display(), e))
                    })?
                }
                _ => DEFAULT_CONFIG.to_string(),
            },
        };

        parse_config(&content)
    }
}

/// Location of the user override file
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("spendlens").join("config.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    categories: Option<RawCategories>,
    time: Option<RawTime>,
    trends: Option<RawTrends>,
    outliers: Option<RawOutliers>,
    insights: Option<RawInsights>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCategories {
    top_n: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTime {
    recent_window_days: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTrends {
    short_window_days: Option<usize>,
    long_window_days: Option<usize>,
    monthly_trend_months: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawOutliers {
    iqr_multiplier: Option<f64>,
    top_n: Option<usize>,
    high_variance_categories: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawInsights {
    weekend_ratio: Option<f64>,
    mom_change_percent: Option<f64>,
}

/// Parse config from TOML content, layering it over the defaults
pub fn parse_config(content: &str) -> Result<AnalysisConfig> {
    let raw: RawConfig = toml::from_str(content)?;
    let mut config = AnalysisConfig::default();

    if let Some(categories) = raw.categories {
        if let Some(n) = categories.top_n {
            config.top_categories = n;
        }
    }

    if let Some(time) = raw.time {
        if let Some(days) = time.recent_window_days {
            config.recent_window_days = days;
        }
    }

    if let Some(trends) = raw.trends {
        if let Some(w) = trends.short_window_days {
            config.short_window_days = w;
        }
        if let Some(w) = trends.long_window_days {
            config.long_window_days = w;
        }
        if let Some(m) = trends.monthly_trend_months {
            config.monthly_trend_months = m;
        }
    }

    if let Some(outliers) = raw.outliers {
        if let Some(k) = outliers.iqr_multiplier {
            config.iqr_multiplier = k;
        }
        if let Some(n) = outliers.top_n {
            config.top_outliers = n;
        }
        if let Some(n) = outliers.high_variance_categories {
            config.high_variance_categories = n;
        }
    }

    if let Some(insights) = raw.insights {
        if let Some(r) = insights.weekend_ratio {
            config.weekend_ratio = r;
        }
        if let Some(p) = insights.mom_change_percent {
            config.mom_change_percent = p;
        }
    }

    validate(&config)?;
    Ok(config)
}

/// Roughly a century of days
const MAX_RECENT_WINDOW_DAYS: i64 = 36_500;

fn validate(config: &AnalysisConfig) -> Result<()> {
    if !(1..=MAX_RECENT_WINDOW_DAYS).contains(&config.recent_window_days) {
        return Err(Error::Config(format!(
            "time.recent_window_days must be between 1 and {}",
            MAX_RECENT_WINDOW_DAYS
        )));
    }
    if config.top_categories == 0 {
        return Err(Error::Config("categories.top_n must be at least 1".into()));
    }
    if config.short_window_days == 0 || config.long_window_days == 0 {
        return Err(Error::Config("trend windows must be at least 1 day".into()));
    }
    if config.monthly_trend_months < 2 {
        return Err(Error::Config("trends.monthly_trend_months must be at least 2".into()));
    }
    if !config.iqr_multiplier.is_finite() || config.iqr_multiplier < 0.0 {
        return Err(Error::Config("outliers.iqr_multiplier must be non-negative".into()));
    }
    if !config.weekend_ratio.is_finite() || !config.mom_change_percent.is_finite() {
        return Err(Error::Config("insight thresholds must be finite".into()));
    }
    Ok(())
}
