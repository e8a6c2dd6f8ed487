//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod account;
pub mod backup;
pub mod stats;
pub mod transaction;

pub use account::{handle_account_command, AccountCommands};
pub use backup::{handle_backup_command, BackupCommands};
pub use stats::{handle_stats_command, StatsCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::NaiveDate;
use clap::Args;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Money, TransactionType};
use crate::reports::Granularity;
use crate::storage::Storage;

/// Period selection shared by listing and statistics commands
#[derive(Args, Debug, Clone, Default)]
pub struct PeriodArgs {
    /// Any day inside the period (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub date: Option<String>,
    /// Use the whole year instead of the month
    #[arg(short, long)]
    pub year: bool,
}

impl PeriodArgs {
    /// The selected day and granularity
    pub fn resolve(&self, storage: &Storage) -> TrackerResult<(NaiveDate, Granularity)> {
        let selected = match &self.date {
            Some(date) => parse_date(date)?,
            None => storage.clock().today(),
        };
        let granularity = if self.year {
            Granularity::Year
        } else {
            Granularity::Month
        };
        Ok((selected, granularity))
    }
}

/// Parse "income" or "expense", case-insensitively
pub fn parse_kind(s: &str) -> TrackerResult<TransactionType> {
    s.trim()
        .to_lowercase()
        .parse()
        .map_err(|e: crate::models::transaction::UnknownTransactionType| {
            TrackerError::Validation(format!("{}. Use 'income' or 'expense'", e))
        })
}

/// Parse a non-negative decimal amount
pub fn parse_amount(s: &str) -> TrackerResult<Money> {
    let amount = Money::parse(s).map_err(|e| TrackerError::Validation(e.to_string()))?;
    if amount.is_negative() {
        return Err(TrackerError::Validation(format!(
            "Amount must not be negative: {}",
            s.trim()
        )));
    }
    Ok(amount)
}

/// Parse a YYYY-MM-DD date
pub fn parse_date(s: &str) -> TrackerResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        TrackerError::Validation(format!("Invalid date format: '{}'. Use YYYY-MM-DD", s))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::FixedClock;
    use chrono::{Datelike, TimeZone, Utc};

    #[test]
    fn test_parse_kind() {
        assert_eq!(parse_kind("Income").unwrap(), TransactionType::Income);
        assert_eq!(parse_kind(" expense ").unwrap(), TransactionType::Expense);
        assert!(parse_kind("transfer").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("12.50").unwrap().cents(), 1250);
        assert_eq!(parse_amount("0").unwrap().cents(), 0);
        assert!(parse_amount("-3").unwrap_err().is_validation());
        assert!(parse_amount("abc").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        let err = parse_date("02/29/2024").unwrap_err();
        assert!(err.to_string().contains("Use YYYY-MM-DD"));
    }

    #[test]
    fn test_period_defaults_to_today() {
        let storage = Storage::in_memory()
            .with_clock(FixedClock(Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()));

        let (selected, granularity) = PeriodArgs::default().resolve(&storage).unwrap();
        assert_eq!(selected, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(granularity, Granularity::Month);

        let args = PeriodArgs {
            date: Some("2023-07-04".into()),
            year: true,
        };
        let (selected, granularity) = args.resolve(&storage).unwrap();
        assert_eq!(selected.year(), 2023);
        assert_eq!(granularity, Granularity::Year);
    }
}
