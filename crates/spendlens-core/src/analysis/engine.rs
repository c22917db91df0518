//! Spending analyzer - aggregate statistics, trends, outliers and insights

use chrono::{Days, NaiveDate};
use tracing::{debug, info};

use crate::config::AnalysisConfig;
use crate::insights::{Insight, InsightEngine, InsightInputs, InsightRule, WeekendAverages};
use crate::models::{weekday_name, DateRange, TransactionTable, WEEKDAY_ORDER};
use crate::stats::{self, group_by, round_to, Accumulator};

use super::types::{
    AnalysisResult, CategoryAnalysis, CategoryStats, CategoryVariance, DailyTotal, MonthOverMonth,
    MonthlyBucket, MonthlyTrend, OutlierAnalysis, OutlierTransaction, Overview, OverviewDateRange,
    TimeAnalysis, TrendAnalysis, WeekdayAnalysis, WeekdayStats, WeekendSplit, WeeklyBucket,
};

/// Read-only analyzer over a private copy of a transaction table
///
/// Total spending and the date range are fixed at construction. Every
/// section is recomputed on request; nothing is cached, so repeated calls
/// return identical results.
pub struct SpendingAnalyzer {
    table: TransactionTable,
    config: AnalysisConfig,
    insights: InsightEngine,
    total_spending: f64,
    date_range: DateRange,
}

impl SpendingAnalyzer {
    pub fn new(table: &TransactionTable) -> Self {
        Self::with_config(table, AnalysisConfig::default())
    }

    pub fn with_config(table: &TransactionTable, config: AnalysisConfig) -> Self {
        let table = table.clone();
        let total_spending = table.total();
        let date_range = table.date_range();
        let insights = InsightEngine::from_config(&config);

        debug!(
            transactions = table.len(),
            total = total_spending,
            start = %date_range.start,
            end = %date_range.end,
            "Spending analyzer ready"
        );

        Self {
            table,
            config,
            insights,
            total_spending,
            date_range,
        }
    }

    /// Add a rule that runs after the built-in insight rules
    pub fn register_insight(&mut self, rule: Box<dyn InsightRule>) {
        self.insights.register(rule);
    }

    pub fn table(&self) -> &TransactionTable {
        &self.table
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn total_spending(&self) -> f64 {
        self.total_spending
    }

    pub fn date_range(&self) -> DateRange {
        self.date_range
    }

    /// Inclusive day span of the table (always >= 1)
    pub fn days_span(&self) -> i64 {
        self.date_range.days()
    }

    /// Compute every section
    pub fn run_full_analysis(&self) -> AnalysisResult {
        let overview = self.overview();
        let category_analysis = self.category_analysis();
        let time_analysis = self.time_analysis();
        let trend_analysis = self.trend_analysis();
        let weekday_analysis = self.weekday_analysis();
        let outlier_analysis = self.outlier_analysis();
        let insights = self.derive_insights(&category_analysis, &trend_analysis, &outlier_analysis);

        info!(
            transactions = overview.num_transactions,
            categories = category_analysis.category_count,
            outliers = outlier_analysis.num_outliers,
            insights = insights.len(),
            "Completed full spending analysis"
        );

        AnalysisResult {
            overview,
            category_analysis,
            time_analysis,
            trend_analysis,
            weekday_analysis,
            outlier_analysis,
            insights,
        }
    }

    pub fn overview(&self) -> Overview {
        let amounts = self.amounts();
        let sorted = stats::sorted(&amounts);
        let acc: Accumulator = amounts.iter().copied().collect();
        let days = self.days_span();

        Overview {
            total_spending: round_to(self.total_spending, 2),
            num_transactions: self.table.len(),
            date_range: OverviewDateRange {
                start: self.date_range.start,
                end: self.date_range.end,
                days,
            },
            avg_daily_spending: round_to(self.total_spending / days as f64, 2),
            avg_transaction_amount: round_to(acc.mean().unwrap_or_default(), 2),
            // The table is never empty, so the median always exists
            median_transaction_amount: round_to(stats::median(&sorted).unwrap_or_default(), 2),
            spending_std: acc.sample_std().map(|s| round_to(s, 2)),
        }
    }

    pub fn category_analysis(&self) -> CategoryAnalysis {
        let mut buckets = self.category_buckets();
        // Stable: equal totals keep first-appearance order
        buckets.sort_by(|a, b| b.1.sum().total_cmp(&a.1.sum()));

        let summary: Vec<CategoryStats> = buckets
            .iter()
            .map(|(category, acc)| CategoryStats {
                category: category.clone(),
                total: round_to(acc.sum(), 2),
                avg_per_transaction: round_to(acc.sum() / acc.count() as f64, 2),
                frequency: acc.count(),
                std: acc.sample_std().map(|s| round_to(s, 2)),
                percentage: round_to(acc.sum() / self.total_spending * 100.0, 1),
            })
            .collect();

        let top_categories = summary
            .iter()
            .take(self.config.top_categories)
            .cloned()
            .collect();

        CategoryAnalysis {
            category_count: summary.len(),
            top_categories,
            summary,
        }
    }

    pub fn time_analysis(&self) -> TimeAnalysis {
        let monthly_buckets = self.monthly_buckets();
        let monthly_totals: Vec<f64> = monthly_buckets.iter().map(|(_, acc)| acc.sum()).collect();

        let monthly = monthly_buckets
            .iter()
            .map(|((year, month), acc)| MonthlyBucket {
                year: *year,
                month: *month,
                period: format!("{:04}-{:02}", year, month),
                total_spending: round_to(acc.sum(), 2),
                transaction_count: acc.count(),
            })
            .collect();

        let mut weekly_buckets = group_by(self.table.transactions(), |t| t.week_number, |t| t.amount);
        weekly_buckets.sort_by_key(|(week, _)| *week);
        let weekly = weekly_buckets
            .iter()
            .map(|(week, acc)| WeeklyBucket {
                week_number: *week,
                total: round_to(acc.sum(), 2),
                avg: round_to(acc.sum() / acc.count() as f64, 2),
                count: acc.count(),
            })
            .collect();

        // Windows reaching past the calendar's first day keep every date
        let back = (self.config.recent_window_days - 1).max(0) as u64;
        let cutoff = self
            .date_range
            .end
            .checked_sub_days(Days::new(back))
            .unwrap_or(NaiveDate::MIN);
        let daily_recent = self
            .daily_totals()
            .into_iter()
            .filter(|(date, _)| *date >= cutoff)
            .map(|(date, total)| DailyTotal {
                date,
                total: round_to(total, 2),
            })
            .collect();

        TimeAnalysis {
            monthly,
            weekly,
            daily_recent,
            monthly_trend: classify_monthly_trend(&monthly_totals, self.config.monthly_trend_months),
        }
    }

    pub fn trend_analysis(&self) -> TrendAnalysis {
        let daily: Vec<f64> = self.daily_totals().into_iter().map(|(_, t)| t).collect();

        // Windows count distinct days with spending; a window of N needs more than N days
        let rolling = |window: usize| {
            if daily.len() > window {
                stats::trailing_mean(&daily, window).map(|v| round_to(v, 2))
            } else {
                None
            }
        };

        let monthly: Vec<f64> = self.monthly_buckets().iter().map(|(_, acc)| acc.sum()).collect();
        let mom_growth = match monthly.as_slice() {
            [.., previous, current] => Some(month_over_month(*previous, *current)),
            _ => None,
        };

        TrendAnalysis {
            seven_day_avg: rolling(self.config.short_window_days),
            thirty_day_avg: rolling(self.config.long_window_days),
            mom_growth,
        }
    }

    pub fn weekday_analysis(&self) -> WeekdayAnalysis {
        let buckets = group_by(self.table.transactions(), |t| t.weekday, |t| t.amount);

        let by_weekday = WEEKDAY_ORDER
            .iter()
            .map(|day| {
                let acc = buckets
                    .iter()
                    .find(|(d, _)| d == day)
                    .map(|(_, acc)| *acc)
                    .unwrap_or_default();
                WeekdayStats {
                    weekday: weekday_name(*day),
                    total: round_to(acc.sum(), 2),
                    avg: acc.mean().map(|m| round_to(m, 2)),
                    frequency: acc.count(),
                }
            })
            .collect();

        let (weekend, weekday) = self.weekend_accumulators();

        WeekdayAnalysis {
            by_weekday,
            weekend_vs_weekday: WeekendSplit {
                weekend_avg: weekend.mean().map(|m| round_to(m, 2)),
                weekday_avg: weekday.mean().map(|m| round_to(m, 2)),
                weekend_total: round_to(weekend.sum(), 2),
                weekday_total: round_to(weekday.sum(), 2),
            },
        }
    }

    pub fn outlier_analysis(&self) -> OutlierAnalysis {
        let sorted = stats::sorted(&self.amounts());
        let q1 = stats::percentile(&sorted, 0.25).unwrap_or_default();
        let q3 = stats::percentile(&sorted, 0.75).unwrap_or_default();
        let threshold = iqr_threshold(q1, q3, self.config.iqr_multiplier);

        let mut outliers: Vec<_> = self
            .table
            .transactions()
            .iter()
            .filter(|t| t.amount > threshold)
            .collect();
        let num_outliers = outliers.len();
        // Stable: equal amounts keep table order
        outliers.sort_by(|a, b| b.amount.total_cmp(&a.amount));

        let high_amount_transactions = outliers
            .into_iter()
            .take(self.config.top_outliers)
            .map(|t| OutlierTransaction {
                date: t.date,
                category: t.category.clone(),
                amount: round_to(t.amount, 2),
            })
            .collect();

        let mut variance = self.category_buckets();
        // Defined deviations first (largest first), undefined ones after
        variance.sort_by(|a, b| match (a.1.sample_std(), b.1.sample_std()) {
            (Some(x), Some(y)) => y.total_cmp(&x),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        let high_variance_categories = variance
            .into_iter()
            .take(self.config.high_variance_categories)
            .map(|(category, acc)| CategoryVariance {
                category,
                std: acc.sample_std().map(|s| round_to(s, 2)),
            })
            .collect();

        debug!(q1, q3, threshold, num_outliers, "Outlier detection complete");

        OutlierAnalysis {
            high_amount_transactions,
            outlier_threshold: round_to(threshold, 2),
            num_outliers,
            high_variance_categories,
        }
    }

    /// Insights over freshly computed sections
    pub fn insights(&self) -> Vec<Insight> {
        let categories = self.category_analysis();
        let trends = self.trend_analysis();
        let outliers = self.outlier_analysis();
        self.derive_insights(&categories, &trends, &outliers)
    }

    fn derive_insights(
        &self,
        categories: &CategoryAnalysis,
        trends: &TrendAnalysis,
        outliers: &OutlierAnalysis,
    ) -> Vec<Insight> {
        let (weekend, weekday) = self.weekend_accumulators();
        let inputs = InsightInputs {
            categories,
            trends,
            weekend: WeekendAverages {
                weekend_avg: weekend.mean(),
                weekday_avg: weekday.mean(),
            },
            outliers,
        };
        self.insights.derive(&inputs)
    }

    fn amounts(&self) -> Vec<f64> {
        self.table.transactions().iter().map(|t| t.amount).collect()
    }

    /// Category buckets in first-appearance order
    pub(crate) fn category_buckets(&self) -> Vec<(String, Accumulator)> {
        group_by(
            self.table.transactions(),
            |t| t.category.clone(),
            |t| t.amount,
        )
    }

    /// (year, month) buckets in chronological order
    fn monthly_buckets(&self) -> Vec<((i32, u32), Accumulator)> {
        let mut buckets = group_by(self.table.transactions(), |t| (t.year, t.month), |t| t.amount);
        buckets.sort_by_key(|(key, _)| *key);
        buckets
    }

    /// Unrounded per-day totals for days with spending, chronological
    fn daily_totals(&self) -> Vec<(NaiveDate, f64)> {
        let mut buckets = group_by(self.table.transactions(), |t| t.date, |t| t.amount);
        buckets.sort_by_key(|(date, _)| *date);
        buckets.into_iter().map(|(d, acc)| (d, acc.sum())).collect()
    }

    /// (weekend, weekday) partitions
    fn weekend_accumulators(&self) -> (Accumulator, Accumulator) {
        let mut weekend = Accumulator::new();
        let mut weekday = Accumulator::new();
        for tx in self.table.transactions() {
            if tx.is_weekend {
                weekend.push(tx.amount);
            } else {
                weekday.push(tx.amount);
            }
        }
        (weekend, weekday)
    }
}

/// Growth from `previous` to `current` in percent (1 dp)
///
/// A zero previous total has no meaningful growth and yields `Undefined`.
pub fn month_over_month(previous: f64, current: f64) -> MonthOverMonth {
    if previous == 0.0 {
        return MonthOverMonth::Undefined;
    }
    MonthOverMonth::Change(round_to((current - previous) / previous * 100.0, 1))
}

/// Compare the first and last of the trailing `months` totals
///
/// Months in between are not consulted.
pub fn classify_monthly_trend(totals: &[f64], months: usize) -> MonthlyTrend {
    if months < 2 || totals.len() < months {
        return MonthlyTrend::InsufficientData;
    }
    let window = &totals[totals.len() - months..];
    let (first, last) = (window[0], window[months - 1]);
    if last > first {
        MonthlyTrend::Increasing
    } else if last < first {
        MonthlyTrend::Decreasing
    } else {
        MonthlyTrend::Stable
    }
}

/// Upper outlier fence: `Q3 + multiplier * (Q3 - Q1)`
pub fn iqr_threshold(q1: f64, q3: f64, multiplier: f64) -> f64 {
    q3 + multiplier * (q3 - q1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::InsightKind;
    use crate::models::Transaction;
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn table(rows: &[(NaiveDate, &str, f64)]) -> TransactionTable {
        TransactionTable::new(
            rows.iter()
                .map(|(d, c, a)| Transaction::new(*d, c, *a))
                .collect(),
        )
        .unwrap()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_two_transaction_overview_and_categories() {
        let t = table(&[
            (date(2024, 1, 1), "Groceries", 10.0),
            (date(2024, 1, 2), "Dining", 20.0),
        ]);
        let analyzer = SpendingAnalyzer::new(&t);

        let overview = analyzer.overview();
        assert!(approx(overview.total_spending, 30.0));
        assert_eq!(overview.num_transactions, 2);
        assert_eq!(overview.date_range.days, 2);
        assert!(approx(overview.avg_daily_spending, 15.0));
        assert!(approx(overview.median_transaction_amount, 15.0));

        let cats = analyzer.category_analysis();
        assert_eq!(cats.category_count, 2);
        assert_eq!(cats.summary[0].category, "Dining");
        assert!(approx(cats.summary[0].percentage, 66.7));
        assert_eq!(cats.summary[1].category, "Groceries");
        assert!(approx(cats.summary[1].percentage, 33.3));
    }

    #[test]
    fn test_singleton_std_is_undefined() {
        let t = table(&[(date(2024, 5, 1), "Rent", 50.0)]);
        let analyzer = SpendingAnalyzer::new(&t);

        let cats = analyzer.category_analysis();
        assert_eq!(cats.summary[0].std, None);
        assert_eq!(analyzer.overview().spending_std, None);
        assert_eq!(analyzer.overview().date_range.days, 1);
    }

    #[test]
    fn test_category_ties_keep_first_appearance() {
        let t = table(&[
            (date(2024, 1, 1), "Zoo", 10.0),
            (date(2024, 1, 2), "Apple", 10.0),
            (date(2024, 1, 3), "Mid", 30.0),
        ]);
        let cats = SpendingAnalyzer::new(&t).category_analysis();
        let order: Vec<_> = cats.summary.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(order, vec!["Mid", "Zoo", "Apple"]);
    }

    #[test]
    fn test_top_categories_capped_at_five() {
        let rows: Vec<_> = ["A", "B", "C", "D", "E", "F", "G"]
            .iter()
            .enumerate()
            .map(|(i, c)| (date(2024, 1, 1 + i as u32), *c, 10.0 + i as f64))
            .collect();
        let cats = SpendingAnalyzer::new(&table(&rows)).category_analysis();
        assert_eq!(cats.category_count, 7);
        assert_eq!(cats.top_categories.len(), 5);
        assert_eq!(cats.top_categories[0].category, "G");
    }

    #[test]
    fn test_category_sums_match_total() {
        let t = table(&[
            (date(2024, 1, 1), "Groceries", 12.34),
            (date(2024, 1, 3), "Dining", 45.10),
            (date(2024, 1, 4), "Groceries", 7.77),
            (date(2024, 1, 9), "Transport", 3.33),
            (date(2024, 1, 9), "Dining", 19.99),
        ]);
        let analyzer = SpendingAnalyzer::new(&t);
        let cats = analyzer.category_analysis();

        let sum: f64 = cats.summary.iter().map(|c| c.total).sum();
        assert!((sum - analyzer.overview().total_spending).abs() < 0.01);

        let pct: f64 = cats.summary.iter().map(|c| c.percentage).sum();
        assert!((pct - 100.0).abs() <= 0.1 * cats.summary.len() as f64);
    }

    #[test]
    fn test_monthly_weekly_and_recent_daily() {
        let t = table(&[
            (date(2024, 1, 15), "A", 100.0),
            (date(2024, 2, 10), "A", 50.0),
            (date(2024, 2, 20), "B", 25.0),
            (date(2024, 3, 1), "A", 10.0),
            (date(2024, 3, 1), "B", 5.0),
        ]);
        let time = SpendingAnalyzer::new(&t).time_analysis();

        let periods: Vec<_> = time.monthly.iter().map(|m| m.period.as_str()).collect();
        assert_eq!(periods, vec!["2024-01", "2024-02", "2024-03"]);
        assert!(approx(time.monthly[1].total_spending, 75.0));
        assert_eq!(time.monthly[1].transaction_count, 2);
        assert_eq!(time.monthly_trend, MonthlyTrend::Decreasing);

        let weeks: Vec<_> = time.weekly.iter().map(|w| w.week_number).collect();
        let mut sorted = weeks.clone();
        sorted.sort();
        assert_eq!(weeks, sorted);

        // Window is 2024-02-01..=2024-03-01
        let days: Vec<_> = time.daily_recent.iter().map(|d| d.date).collect();
        assert_eq!(days, vec![date(2024, 2, 10), date(2024, 2, 20), date(2024, 3, 1)]);
        assert!(approx(time.daily_recent[2].total, 15.0));
    }

    #[test]
    fn test_recent_window_boundary_is_inclusive_29_days() {
        let t = table(&[
            (date(2024, 1, 1), "A", 1.0),
            (date(2024, 1, 2), "A", 2.0),
            (date(2024, 1, 31), "A", 3.0),
        ]);
        let time = SpendingAnalyzer::new(&t).time_analysis();
        // 2024-01-31 minus 29 days = 2024-01-02
        let days: Vec<_> = time.daily_recent.iter().map(|d| d.date).collect();
        assert_eq!(days, vec![date(2024, 1, 2), date(2024, 1, 31)]);
    }

    #[test]
    fn test_recent_window_longer_than_calendar() {
        let t = table(&[
            (date(2024, 1, 1), "A", 1.0),
            (date(2024, 1, 31), "A", 3.0),
        ]);
        let config = AnalysisConfig {
            recent_window_days: 200_000_000,
            ..AnalysisConfig::default()
        };
        let time = SpendingAnalyzer::with_config(&t, config).time_analysis();
        assert_eq!(time.daily_recent.len(), 2);
    }

    #[test]
    fn test_weekly_merges_same_week_across_years() {
        // Both dates fall in ISO week 10
        let t = table(&[
            (date(2023, 3, 8), "A", 10.0),
            (date(2024, 3, 6), "A", 30.0),
        ]);
        let time = SpendingAnalyzer::new(&t).time_analysis();
        assert_eq!(time.weekly.len(), 1);
        assert_eq!(time.weekly[0].week_number, 10);
        assert!(approx(time.weekly[0].total, 40.0));
        assert!(approx(time.weekly[0].avg, 20.0));
    }

    #[test]
    fn test_monthly_trend_classification() {
        assert_eq!(classify_monthly_trend(&[1.0, 2.0], 3), MonthlyTrend::InsufficientData);
        assert_eq!(classify_monthly_trend(&[1.0, 9.0, 2.0], 3), MonthlyTrend::Increasing);
        assert_eq!(classify_monthly_trend(&[5.0, 1.0, 9.0, 2.0], 3), MonthlyTrend::Increasing);
        assert_eq!(classify_monthly_trend(&[3.0, 1.0, 2.0], 3), MonthlyTrend::Decreasing);
        // Middle month is ignored
        assert_eq!(classify_monthly_trend(&[4.0, 100.0, 4.0], 3), MonthlyTrend::Stable);
    }

    #[test]
    fn test_month_over_month() {
        assert_eq!(month_over_month(100.0, 150.0), MonthOverMonth::Change(50.0));
        assert_eq!(month_over_month(200.0, 150.0), MonthOverMonth::Change(-25.0));
        assert_eq!(month_over_month(0.0, 150.0), MonthOverMonth::Undefined);
        assert_eq!(month_over_month(0.0, 0.0), MonthOverMonth::Undefined);
    }

    #[test]
    fn test_mom_growth_two_months() {
        let t = table(&[
            (date(2024, 1, 10), "A", 60.0),
            (date(2024, 1, 20), "B", 40.0),
            (date(2024, 2, 5), "A", 150.0),
        ]);
        let trends = SpendingAnalyzer::new(&t).trend_analysis();
        assert_eq!(trends.mom_growth, Some(MonthOverMonth::Change(50.0)));
    }

    #[test]
    fn test_single_month_omits_mom_growth() {
        let t = table(&[(date(2024, 1, 10), "A", 60.0)]);
        let trends = SpendingAnalyzer::new(&t).trend_analysis();
        assert_eq!(trends.mom_growth, None);
        assert_eq!(trends.seven_day_avg, None);
        assert_eq!(trends.thirty_day_avg, None);
    }

    #[test]
    fn test_rolling_averages_need_more_than_window_days() {
        // Seven distinct days: not enough for the 7-day average
        let rows: Vec<_> = (1..=7).map(|d| (date(2024, 1, d), "A", d as f64)).collect();
        let trends = SpendingAnalyzer::new(&table(&rows)).trend_analysis();
        assert_eq!(trends.seven_day_avg, None);

        // Eight distinct days with a gap: last seven present days are 2..=7 and 20
        let mut rows = rows;
        rows.push((date(2024, 1, 20), "A", 20.0));
        let trends = SpendingAnalyzer::new(&table(&rows)).trend_analysis();
        let expected = round_to((2.0 + 3.0 + 4.0 + 5.0 + 6.0 + 7.0 + 20.0) / 7.0, 2);
        assert_eq!(trends.seven_day_avg, Some(expected));
        assert_eq!(trends.thirty_day_avg, None);
    }

    #[test]
    fn test_thirty_day_average() {
        let rows: Vec<_> = (0..31)
            .map(|i| (date(2024, 1, 1) + Duration::days(i), "A", 10.0))
            .collect();
        let trends = SpendingAnalyzer::new(&table(&rows)).trend_analysis();
        assert_eq!(trends.thirty_day_avg, Some(10.0));
        assert_eq!(trends.seven_day_avg, Some(10.0));
    }

    #[test]
    fn test_weekday_breakdown_always_seven() {
        // 2024-01-03 is a Wednesday
        let t = table(&[(date(2024, 1, 3), "A", 12.0)]);
        let weekday = SpendingAnalyzer::new(&t).weekday_analysis();
        let names: Vec<_> = weekday.by_weekday.iter().map(|w| w.weekday).collect();
        assert_eq!(
            names,
            vec!["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"]
        );
        assert_eq!(weekday.by_weekday[0].frequency, 0);
        assert_eq!(weekday.by_weekday[0].avg, None);
        assert!(approx(weekday.by_weekday[0].total, 0.0));
        assert_eq!(weekday.by_weekday[2].avg, Some(12.0));

        assert_eq!(weekday.weekend_vs_weekday.weekend_avg, None);
        assert_eq!(weekday.weekend_vs_weekday.weekday_avg, Some(12.0));
        assert!(approx(weekday.weekend_vs_weekday.weekend_total, 0.0));
    }

    #[test]
    fn test_outlier_detection() {
        let mut rows: Vec<_> = (1..=8)
            .map(|d| (date(2024, 2, d), "Coffee", 10.0))
            .collect();
        rows.push((date(2024, 2, 9), "Electronics", 500.0));
        rows.push((date(2024, 2, 10), "Travel", 900.0));
        let outliers = SpendingAnalyzer::new(&table(&rows)).outlier_analysis();

        // Q1 = Q3 = 10, so anything above 10 is an outlier
        assert!(approx(outliers.outlier_threshold, 10.0));
        assert_eq!(outliers.num_outliers, 2);
        assert_eq!(outliers.high_amount_transactions[0].category, "Travel");
        assert_eq!(outliers.high_amount_transactions[1].category, "Electronics");

        // Coffee has std 0; the singletons are undefined and sort last
        assert_eq!(outliers.high_variance_categories[0].category, "Coffee");
        assert_eq!(outliers.high_variance_categories[0].std, Some(0.0));
        assert_eq!(outliers.high_variance_categories[1].std, None);
        assert_eq!(outliers.high_variance_categories.len(), 3);
    }

    #[test]
    fn test_outliers_list_five_largest_but_count_all() {
        let mut rows: Vec<_> = (1..=24)
            .map(|d| (date(2024, 1, d), "Coffee", 10.0))
            .collect();
        rows.extend([
            (date(2024, 1, 25), "Gifts", 150.0),
            (date(2024, 1, 26), "Travel", 300.0),
            (date(2024, 1, 27), "Rent", 500.0),
            (date(2024, 1, 28), "Gifts", 120.0),
            (date(2024, 1, 29), "Tech", 300.0),
            (date(2024, 1, 30), "Travel", 200.0),
            (date(2024, 1, 31), "Tech", 100.0),
        ]);
        let outliers = SpendingAnalyzer::new(&table(&rows)).outlier_analysis();

        // 31 values, Q1 and Q3 both land inside the run of 10s
        assert!(approx(outliers.outlier_threshold, 10.0));
        assert_eq!(outliers.num_outliers, 7);
        assert_eq!(outliers.high_amount_transactions.len(), 5);

        let listed: Vec<_> = outliers
            .high_amount_transactions
            .iter()
            .map(|t| (t.date, t.category.as_str(), t.amount))
            .collect();
        assert_eq!(
            listed,
            vec![
                (date(2024, 1, 27), "Rent", 500.0),
                // Equal amounts keep table order
                (date(2024, 1, 26), "Travel", 300.0),
                (date(2024, 1, 29), "Tech", 300.0),
                (date(2024, 1, 30), "Travel", 200.0),
                (date(2024, 1, 25), "Gifts", 150.0),
            ]
        );
    }

    #[test]
    fn test_outliers_are_strict() {
        let rows: Vec<_> = (1..=4).map(|d| (date(2024, 2, d), "A", 10.0)).collect();
        let outliers = SpendingAnalyzer::new(&table(&rows)).outlier_analysis();
        // Values equal to the threshold are not outliers
        assert_eq!(outliers.num_outliers, 0);
        assert!(outliers.high_amount_transactions.is_empty());
    }

    #[test]
    fn test_iqr_threshold_monotone_in_q3() {
        let iqr = 20.0;
        let mut last = f64::MIN;
        for q3 in [10.0, 25.0, 40.0, 80.0, 200.0] {
            let t = iqr_threshold(q3 - iqr, q3, 1.5);
            assert!(t >= last);
            last = t;
        }
    }

    #[test]
    fn test_full_analysis_is_idempotent() {
        let t = table(&[
            (date(2024, 1, 6), "Dining", 60.0),
            (date(2024, 1, 8), "Groceries", 20.0),
            (date(2024, 2, 3), "Dining", 90.0),
            (date(2024, 2, 5), "Groceries", 25.0),
        ]);
        let analyzer = SpendingAnalyzer::new(&t);
        let first = analyzer.run_full_analysis();
        let second = analyzer.run_full_analysis();
        assert_eq!(first, second);
        assert_eq!(first.insights[0].kind, InsightKind::TopCategory);
    }

    #[test]
    fn test_weekend_insight_uses_unrounded_means() {
        // 2024-01-06 Saturday, 2024-01-08 Monday
        let t = table(&[
            (date(2024, 1, 6), "Dining", 60.0),
            (date(2024, 1, 8), "Groceries", 20.0),
        ]);
        let insights = SpendingAnalyzer::new(&t).insights();
        let weekend = insights
            .iter()
            .find(|i| i.kind == InsightKind::WeekendSpending)
            .expect("weekend insight");
        assert_eq!(
            weekend.message,
            "You tend to spend 200.0% more on weekends than weekdays."
        );
    }

    #[test]
    fn test_top_category_insight_without_top_list() {
        let t = table(&[(date(2024, 1, 1), "Rent", 900.0)]);
        let config = AnalysisConfig {
            top_categories: 0,
            ..AnalysisConfig::default()
        };
        let result = SpendingAnalyzer::with_config(&t, config).run_full_analysis();
        assert!(result.category_analysis.top_categories.is_empty());
        assert_eq!(result.insights.len(), 1);
        assert_eq!(
            result.insights[0].message,
            "Your highest spending category is Rent, accounting for 100.0% of total expenses."
        );
    }

    #[test]
    fn test_analyzer_copies_table() {
        let t = table(&[(date(2024, 1, 1), "A", 5.0)]);
        let analyzer = SpendingAnalyzer::new(&t);
        drop(t);
        assert!(approx(analyzer.total_spending(), 5.0));
    }

    #[test]
    fn test_analyzer_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SpendingAnalyzer>();
    }
}
