//! Insight engine - evaluates registered rules over analysis sections

use crate::analysis::types::{CategoryAnalysis, OutlierAnalysis, TrendAnalysis};
use crate::config::AnalysisConfig;

use super::rules::{MonthOverMonthRule, OutlierRule, TopCategoryRule, WeekendSpendingRule};
use super::types::{Insight, InsightKind};

/// Unrounded weekend/weekday transaction means
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WeekendAverages {
    pub weekend_avg: Option<f64>,
    pub weekday_avg: Option<f64>,
}

/// Analysis sections the rules read from
pub struct InsightInputs<'a> {
    pub categories: &'a CategoryAnalysis,
    pub trends: &'a TrendAnalysis,
    pub weekend: WeekendAverages,
    pub outliers: &'a OutlierAnalysis,
}

/// A single insight rule
///
/// Rules are pure: the same inputs always produce the same insight.
pub trait InsightRule: Send + Sync {
    /// Kind of insight this rule produces (the primary one for multi-kind rules)
    fn id(&self) -> InsightKind;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Evaluate the rule, returning an insight when it triggers
    fn evaluate(&self, inputs: &InsightInputs<'_>) -> Option<Insight>;
}

/// Ordered collection of insight rules
pub struct InsightEngine {
    rules: Vec<Box<dyn InsightRule>>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Create an engine with the built-in rules at default thresholds
    pub fn new() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }

    /// Create an engine with the built-in rules at configured thresholds
    pub fn from_config(config: &AnalysisConfig) -> Self {
        let mut engine = Self { rules: vec![] };

        // Built-in rules, in emission order
        engine.register(Box::new(TopCategoryRule));
        engine.register(Box::new(WeekendSpendingRule::new(config.weekend_ratio)));
        engine.register(Box::new(MonthOverMonthRule::new(config.mom_change_percent)));
        engine.register(Box::new(OutlierRule));

        engine
    }

    /// Register an additional rule; it runs after every earlier rule
    pub fn register(&mut self, rule: Box<dyn InsightRule>) {
        self.rules.push(rule);
    }

    /// Evaluate every rule in registration order
    pub fn derive(&self, inputs: &InsightInputs<'_>) -> Vec<Insight> {
        let mut insights = Vec::new();

        for rule in &self.rules {
            match rule.evaluate(inputs) {
                Some(insight) => {
                    tracing::debug!(rule = rule.name(), kind = insight.kind.as_str(), "Insight triggered");
                    insights.push(insight);
                }
                None => {
                    tracing::debug!(rule = rule.name(), kind = rule.id().as_str(), "Insight not triggered");
                }
            }
        }

        insights
    }
}
