//! Statistics CLI commands
//!
//! Totals, category breakdowns, monthly series and daily totals for the
//! current account.

use clap::Subcommand;

use crate::display::format_currency;
use crate::display::report::{format_breakdown, format_monthly, format_totals};
use crate::error::{TrackerError, TrackerResult};
use crate::reports::{
    category_breakdown, daily_groups, is_multi_month, monthly_series, percentages, totals,
    transactions_for_period, SummaryType,
};
use crate::services::{AccountRegistry, TransactionRepository};
use crate::storage::Storage;

use super::PeriodArgs;

/// Statistics subcommands
#[derive(Subcommand)]
pub enum StatsCommands {
    /// Income, expenses and balance for the period
    Totals {
        #[command(flatten)]
        period: PeriodArgs,
    },
    /// Per-category breakdown for the period
    Categories {
        #[command(flatten)]
        period: PeriodArgs,
        /// income, expenses or balance
        #[arg(short = 't', long = "type", default_value = "expenses")]
        summary: String,
    },
    /// Month-by-month series for the year around --date
    Monthly {
        /// Any day inside the year (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
        /// income, expenses or balance
        #[arg(short = 't', long = "type", default_value = "balance")]
        summary: String,
    },
    /// Income and expenses per day for the period
    Daily {
        #[command(flatten)]
        period: PeriodArgs,
    },
}

/// Handle a statistics command
pub fn handle_stats_command(storage: &Storage, cmd: StatsCommands) -> TrackerResult<()> {
    let registry = AccountRegistry::initialize(storage)?;
    let repository = TransactionRepository::new(storage);
    let current = registry.current();
    let all = repository.query_current(&registry)?;

    match cmd {
        StatsCommands::Totals { period } => {
            let (selected, granularity) = period.resolve(storage)?;
            let in_period = transactions_for_period(&all, selected, granularity);
            let title = format!("{} - {}", current.name, granularity.label(selected));

            print!("{}", format_totals(&title, &totals(&in_period), &current.currency));
        }

        StatsCommands::Categories { period, summary } => {
            let summary = parse_summary(&summary)?;
            let (selected, granularity) = period.resolve(storage)?;
            let in_period = transactions_for_period(&all, selected, granularity);

            let breakdown = category_breakdown(&in_period, summary);
            let shares = percentages(&breakdown);

            println!(
                "{} - {} by category, {}",
                current.name,
                summary,
                granularity.label(selected)
            );
            print!(
                "{}",
                format_breakdown(summary, &breakdown, shares.as_deref(), &current.currency)
            );
        }

        StatsCommands::Monthly { date, summary } => {
            let summary = parse_summary(&summary)?;
            let period = PeriodArgs { date, year: true };
            let (selected, granularity) = period.resolve(storage)?;
            let in_year = transactions_for_period(&all, selected, granularity);

            println!("{} - monthly {}, {}", current.name, summary, granularity.label(selected));
            if !is_multi_month(&in_year) {
                println!("(single month of data)");
            }
            print!(
                "{}",
                format_monthly(summary, &monthly_series(&in_year, summary), &current.currency)
            );
        }

        StatsCommands::Daily { period } => {
            let (selected, granularity) = period.resolve(storage)?;
            let in_period = transactions_for_period(&all, selected, granularity);
            let groups = daily_groups(&in_period);

            println!("{} - daily totals, {}", current.name, granularity.label(selected));
            if groups.is_empty() {
                println!("No transactions in this period.");
            }
            for group in &groups {
                println!(
                    "{}  {:>14}  {:>14}",
                    group.date.format(storage.date_format()),
                    format!("+{}", format_currency(group.income, &current.currency)),
                    format!("-{}", format_currency(group.expenses, &current.currency)),
                );
            }
        }
    }

    Ok(())
}

fn parse_summary(s: &str) -> TrackerResult<SummaryType> {
    s.parse().map_err(TrackerError::Validation)
}
