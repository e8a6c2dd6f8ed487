//! Report formatting utilities for terminal output
//!
//! Renders statistics: totals, category breakdowns with bars, and
//! monthly series.

use chrono::Month;

use crate::reports::{CategoryTotal, MonthTotal, SummaryType, Totals};

use super::currency::format_currency;

const BAR_WIDTH: usize = 20;

/// Format income, expenses and balance for a period
pub fn format_totals(title: &str, totals: &Totals, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", title));
    output.push_str(&separator(title.chars().count().max(30)));
    output.push('\n');
    output.push_str(&format!("  Income:    {:>16}\n", format_currency(totals.income, currency)));
    output.push_str(&format!("  Expenses:  {:>16}\n", format_currency(totals.expenses, currency)));
    output.push_str(&format!("  Balance:   {:>16}\n", format_currency(totals.balance, currency)));

    output
}

/// Format a category breakdown, one bar per bucket
///
/// Without percentages (zero total) only the amounts are shown.
pub fn format_breakdown(
    summary: SummaryType,
    breakdown: &[CategoryTotal],
    shares: Option<&[f64]>,
    currency: &str,
) -> String {
    if breakdown.is_empty() {
        return format!("No {} in this period.\n", summary);
    }

    let label_width = breakdown
        .iter()
        .map(|c| c.label.chars().count())
        .max()
        .unwrap_or(8)
        .max(8);
    let max_share = shares
        .map(|s| s.iter().copied().fold(0.0_f64, f64::max))
        .unwrap_or(0.0);

    let mut output = String::new();
    for (i, bucket) in breakdown.iter().enumerate() {
        let amount = format_currency(bucket.amount, currency);
        match shares.and_then(|s| s.get(i)) {
            Some(&share) => output.push_str(&format!(
                "{:<label_width$}  {:>14}  {:>6}  {}\n",
                bucket.label,
                amount,
                format_percentage(share),
                format_bar(share, max_share, BAR_WIDTH),
                label_width = label_width,
            )),
            None => output.push_str(&format!(
                "{:<label_width$}  {:>14}\n",
                bucket.label,
                amount,
                label_width = label_width,
            )),
        }
    }

    output
}

/// Format a monthly series, one line per non-empty month
pub fn format_monthly(summary: SummaryType, series: &[MonthTotal], currency: &str) -> String {
    if series.is_empty() {
        return format!("No {} in this period.\n", summary);
    }

    let max = series
        .iter()
        .map(|m| m.amount.abs().as_f64())
        .fold(0.0_f64, f64::max);

    let mut output = String::new();
    for point in series {
        let name = u8::try_from(point.month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map(|m| m.name())
            .unwrap_or("?");

        output.push_str(&format!(
            "{:<9}  {:>14}  {}\n",
            name,
            format_currency(point.amount, currency),
            format_bar(point.amount.abs().as_f64(), max, BAR_WIDTH),
        ));
    }

    output
}

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".chars().take(max_len).collect()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}
