//! Transaction CLI commands
//!
//! Every command works on the current account; switch accounts with
//! `account switch`.

use clap::Subcommand;

use crate::display::transaction::{format_transaction_details, format_transaction_list};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{category, Transaction};
use crate::reports::{daily_groups, search, transactions_for_period, SearchFilter};
use crate::services::{AccountRegistry, CreateTransactionInput, TransactionRepository};
use crate::storage::Storage;

use super::{parse_amount, parse_date, parse_kind, PeriodArgs};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a new transaction on the current account
    Add {
        /// income or expense
        kind: String,
        /// Amount (e.g., "12.50")
        amount: String,
        /// Category (e.g., Food, Salary)
        category: String,
        /// Note
        #[arg(short, long)]
        note: Option<String>,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List transactions of the current account by day
    List {
        #[command(flatten)]
        period: PeriodArgs,
        /// Ignore the period and list everything
        #[arg(short, long)]
        all: bool,
    },
    /// Show transaction details
    Show {
        /// Transaction ID
        id: String,
    },
    /// Edit a transaction
    Edit {
        /// Transaction ID
        id: String,
        /// New type (income or expense)
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New note
        #[arg(short, long)]
        note: Option<String>,
        /// New date
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
    /// Search the current account by text, date range and type
    Search {
        /// Text to find in category or note
        text: Option<String>,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// income or expense
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
    },
    /// List the categories available for each type
    Categories,
}

/// Handle a transaction command
pub fn handle_transaction_command(storage: &Storage, cmd: TransactionCommands) -> TrackerResult<()> {
    let registry = AccountRegistry::initialize(storage)?;
    let repository = TransactionRepository::new(storage);
    let current = registry.current().clone();
    let date_format = storage.date_format();

    match cmd {
        TransactionCommands::Add {
            kind,
            amount,
            category,
            note,
            date,
        } => {
            let input = CreateTransactionInput {
                kind: parse_kind(&kind)?,
                category,
                amount: parse_amount(&amount)?,
                note,
                date: date.as_deref().map(parse_date).transpose()?,
            };

            let txn = repository.create(&registry, input)?;
            println!("Added {} to {}: {} {}", txn.kind, current.name, txn.category, txn.amount);
            println!("  ID: {}", txn.id);
        }

        TransactionCommands::List { period, all } => {
            let mut transactions = repository.query_current(&registry)?;
            if !all {
                let (selected, granularity) = period.resolve(storage)?;
                transactions = transactions_for_period(&transactions, selected, granularity);
                println!("{} - {}", current.name, granularity.label(selected));
            } else {
                println!("{} - all transactions", current.name);
            }
            print!(
                "{}",
                format_transaction_list(&daily_groups(&transactions), &current.currency, date_format)
            );
        }

        TransactionCommands::Show { id } => {
            let txn = find_in_current(&repository, &registry, &id)?;
            print!(
                "{}",
                format_transaction_details(&txn, &current.name, &current.currency, date_format)
            );
        }

        TransactionCommands::Edit {
            id,
            kind,
            amount,
            category,
            note,
            date,
        } => {
            let mut txn = find_in_current(&repository, &registry, &id)?;

            if kind.is_none()
                && amount.is_none()
                && category.is_none()
                && note.is_none()
                && date.is_none()
            {
                println!("No changes specified.");
                return Ok(());
            }

            if let Some(kind) = kind {
                txn.kind = parse_kind(&kind)?;
            }
            if let Some(amount) = amount {
                txn.amount = parse_amount(&amount)?;
            }
            if let Some(category) = category {
                txn.category = category;
            }
            if let Some(note) = note {
                txn.note = note.trim().to_string();
            }
            if let Some(date) = date {
                txn.date = parse_date(&date)?;
            }

            if !category::is_valid(txn.kind, &txn.category) {
                return Err(TrackerError::Validation(format!(
                    "'{}' is not a valid {} category",
                    txn.category, txn.kind
                )));
            }

            repository.update(&txn)?;
            println!("Updated transaction: {}", txn.id);
        }

        TransactionCommands::Delete { id, force } => {
            let txn = find_in_current(&repository, &registry, &id)?;

            if !force {
                println!("About to delete transaction:");
                println!("  Date:     {}", txn.date.format(date_format));
                println!("  Type:     {}", txn.kind);
                println!("  Category: {}", txn.category);
                println!("  Amount:   {}", txn.amount);
                println!();
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            repository.delete(&txn)?;
            println!(
                "Deleted transaction: {} ({} {})",
                txn.id,
                txn.date.format(date_format),
                txn.category
            );
        }

        TransactionCommands::Search {
            text,
            from,
            to,
            kind,
        } => {
            let filter = SearchFilter {
                text,
                from: from.as_deref().map(parse_date).transpose()?,
                to: to.as_deref().map(parse_date).transpose()?,
                kind: kind.as_deref().map(parse_kind).transpose()?,
            };

            let found = search(&repository.query_current(&registry)?, &filter);
            println!("{} matching transactions in {}", found.len(), current.name);
            print!(
                "{}",
                format_transaction_list(&daily_groups(&found), &current.currency, date_format)
            );
        }

        TransactionCommands::Categories => {
            println!("Income:   {}", category::INCOME_CATEGORIES.join(", "));
            println!("Expenses: {}", category::EXPENSE_CATEGORIES.join(", "));
        }
    }

    Ok(())
}

/// Resolve an id among the current account's transactions
fn find_in_current(
    repository: &TransactionRepository<'_>,
    registry: &AccountRegistry<'_>,
    id: &str,
) -> TrackerResult<Transaction> {
    repository
        .find(id)?
        .filter(|t| t.account_id == registry.current().id)
        .ok_or_else(|| TrackerError::transaction_not_found(id))
}
