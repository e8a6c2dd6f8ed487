//! Period selection
//!
//! Narrows a transaction set to the month or year around a selected day.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

use crate::models::Transaction;

/// How wide the selected period is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Granularity {
    #[default]
    Month,
    Year,
}

impl Granularity {
    /// Whether `date` lies in the same period as `selected`
    pub fn contains(&self, selected: NaiveDate, date: NaiveDate) -> bool {
        match self {
            Self::Month => date.year() == selected.year() && date.month() == selected.month(),
            Self::Year => date.year() == selected.year(),
        }
    }

    /// Human label for the period containing `selected`
    pub fn label(&self, selected: NaiveDate) -> String {
        match self {
            Self::Month => selected.format("%B %Y").to_string(),
            Self::Year => selected.format("%Y").to_string(),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Month => write!(f, "month"),
            Self::Year => write!(f, "year"),
        }
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            other => Err(format!("Unknown period '{}' (expected month or year)", other)),
        }
    }
}

/// Transactions dated within the period around `selected`
pub fn transactions_for_period(
    transactions: &[Transaction],
    selected: NaiveDate,
    granularity: Granularity,
) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| granularity.contains(selected, t.date))
        .cloned()
        .collect()
}

/// Whether the set spans more than one calendar month
pub fn is_multi_month(transactions: &[Transaction]) -> bool {
    let mut months = transactions.iter().map(|t| (t.date.year(), t.date.month()));
    match months.next() {
        Some(first) => months.any(|m| m != first),
        None => false,
    }
}
