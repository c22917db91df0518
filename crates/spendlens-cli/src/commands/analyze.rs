//! Full analysis report

use std::fmt::Write;
use std::path::Path;

use anyhow::{Context, Result};
use spendlens_core::analysis::{MonthOverMonth, TrendAnalysis};
use spendlens_core::{AnalysisResult, Insight, Severity};

use super::{fmt_opt, load_analyzer, truncate};
use crate::cli::OutputFormat;

pub fn cmd_analyze(file: &Path, config_path: Option<&Path>, format: OutputFormat) -> Result<()> {
    let analyzer = load_analyzer(file, config_path)?;
    let result = analyzer.run_full_analysis();
    print!("{}", render_report(&result, format)?);
    Ok(())
}

/// Render the analysis in the requested format
pub fn render_report(result: &AnalysisResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let mut json = result
                .to_json_pretty()
                .context("Failed to serialize analysis")?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Text => render_analysis(result),
    }
}

pub fn render_analysis(result: &AnalysisResult) -> Result<String> {
    let mut out = String::new();
    let overview = &result.overview;

    writeln!(out)?;
    writeln!(out, "📊 Spending Overview")?;
    writeln!(
        out,
        "   Period: {} to {} ({} days)",
        overview.date_range.start, overview.date_range.end, overview.date_range.days
    )?;
    writeln!(out, "   ─────────────────────────────────────────────────────────────")?;
    writeln!(out, "   Total:            ${:.2}", overview.total_spending)?;
    writeln!(out, "   Transactions:     {}", overview.num_transactions)?;
    writeln!(out, "   Avg per day:      ${:.2}", overview.avg_daily_spending)?;
    writeln!(out, "   Avg transaction:  ${:.2}", overview.avg_transaction_amount)?;
    writeln!(out, "   Median:           ${:.2}", overview.median_transaction_amount)?;
    writeln!(out, "   Std deviation:    {}", fmt_opt(overview.spending_std))?;

    writeln!(out)?;
    writeln!(
        out,
        "🏷️  Categories ({})",
        result.category_analysis.category_count
    )?;
    writeln!(
        out,
        "   {:20} │ {:>10} │ {:>6} │ {:>5} │ {:>8} │ {:>8}",
        "Category", "Total", "%", "Count", "Avg", "Std"
    )?;
    writeln!(out, "   ─────────────────────┼────────────┼────────┼───────┼──────────┼──────────")?;
    for cat in &result.category_analysis.summary {
        writeln!(
            out,
            "   {:20} │ {:>10.2} │ {:>5.1}% │ {:>5} │ {:>8.2} │ {:>8}",
            truncate(&cat.category, 20),
            cat.total,
            cat.percentage,
            cat.frequency,
            cat.avg_per_transaction,
            fmt_opt(cat.std)
        )?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "📅 Monthly Spending ({})",
        result.time_analysis.monthly_trend
    )?;
    writeln!(out, "   {:8} │ {:>10} │ {:>5}", "Month", "Amount", "Count")?;
    writeln!(out, "   ─────────┼────────────┼───────")?;
    for month in &result.time_analysis.monthly {
        writeln!(
            out,
            "   {:8} │ {:>10.2} │ {:>5}",
            month.period, month.total_spending, month.transaction_count
        )?;
    }

    writeln!(out)?;
    writeln!(out, "📈 Trends")?;
    render_trends(&mut out, &result.trend_analysis)?;

    let weekday = &result.weekday_analysis;
    writeln!(out)?;
    writeln!(out, "🗓️  By Weekday")?;
    writeln!(out, "   {:10} │ {:>10} │ {:>8} │ {:>5}", "Day", "Total", "Avg", "Count")?;
    writeln!(out, "   ───────────┼────────────┼──────────┼───────")?;
    for day in &weekday.by_weekday {
        writeln!(
            out,
            "   {:10} │ {:>10.2} │ {:>8} │ {:>5}",
            day.weekday,
            day.total,
            fmt_opt(day.avg),
            day.frequency
        )?;
    }
    writeln!(
        out,
        "   Weekend avg: {}  Weekday avg: {}",
        fmt_opt(weekday.weekend_vs_weekday.weekend_avg),
        fmt_opt(weekday.weekend_vs_weekday.weekday_avg)
    )?;

    let outliers = &result.outlier_analysis;
    writeln!(out)?;
    writeln!(
        out,
        "🚩 Outliers ({} above ${:.2})",
        outliers.num_outliers, outliers.outlier_threshold
    )?;
    for tx in &outliers.high_amount_transactions {
        writeln!(
            out,
            "   {} │ {:20} │ {:>10.2}",
            tx.date,
            truncate(&tx.category, 20),
            tx.amount
        )?;
    }
    if !outliers.high_variance_categories.is_empty() {
        let names: Vec<_> = outliers
            .high_variance_categories
            .iter()
            .map(|c| format!("{} ({})", c.category, fmt_opt(c.std)))
            .collect();
        writeln!(out, "   Most variable: {}", names.join(", "))?;
    }

    writeln!(out)?;
    writeln!(out, "💡 Insights")?;
    for insight in by_priority(&result.insights) {
        let icon = match insight.severity {
            Severity::Warning => "⚠️ ",
            Severity::Attention => "👀",
            Severity::Info => "•",
        };
        writeln!(out, "   {} {}", icon, insight.message)?;
    }

    Ok(out)
}

/// Most urgent first; equal severities keep rule order
fn by_priority(insights: &[Insight]) -> Vec<&Insight> {
    let mut sorted: Vec<_> = insights.iter().collect();
    sorted.sort_by_key(|i| std::cmp::Reverse(i.severity.priority()));
    sorted
}

fn render_trends(out: &mut String, trends: &TrendAnalysis) -> Result<()> {
    if let Some(avg) = trends.seven_day_avg {
        writeln!(out, "   7-day avg:   ${:.2}", avg)?;
    }
    if let Some(avg) = trends.thirty_day_avg {
        writeln!(out, "   30-day avg:  ${:.2}", avg)?;
    }
    match trends.mom_growth {
        Some(MonthOverMonth::Change(pct)) => writeln!(out, "   vs last month: {:+.1}%", pct)?,
        Some(MonthOverMonth::Undefined) => {
            writeln!(out, "   vs last month: n/a (no prior spending)")?
        }
        None => {}
    }
    if trends.seven_day_avg.is_none() && trends.mom_growth.is_none() {
        writeln!(out, "   Not enough history for trend signals.")?;
    }
    Ok(())
}
