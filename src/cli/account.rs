//! Account CLI commands
//!
//! Implements CLI commands for account management.

use clap::Subcommand;

use crate::display::account::{format_account_details, format_account_list};
use crate::error::{TrackerError, TrackerResult};
use crate::reports::totals;
use crate::services::{AccountRegistry, TransactionRepository};
use crate::storage::Storage;

/// Account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// Create a new account
    Add {
        /// Account name
        name: String,
        /// Currency code (defaults to the base currency)
        #[arg(short, long)]
        currency: Option<String>,
    },
    /// List all accounts (current marked with *)
    List,
    /// Show account details (defaults to the current account)
    Show {
        /// Account name or ID
        account: Option<String>,
    },
    /// Edit an account's name or currency
    Edit {
        /// Account name or ID
        account: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New currency code
        #[arg(short, long)]
        currency: Option<String>,
    },
    /// Delete an account and all of its transactions
    Delete {
        /// Account name or ID
        account: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
    /// Make an account current
    Switch {
        /// Account name or ID
        account: String,
    },
    /// Remove every transaction from the default account
    Restore {
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle an account command
pub fn handle_account_command(storage: &Storage, cmd: AccountCommands) -> TrackerResult<()> {
    let mut registry = AccountRegistry::initialize(storage)?;
    let repository = TransactionRepository::new(storage);

    match cmd {
        AccountCommands::Add { name, currency } => {
            let currency = currency.unwrap_or_else(|| registry.base_currency().to_string());
            let account = registry.create(&name, &currency)?;

            println!("Created account: {}", account.name);
            println!("  Currency: {}", account.currency);
            println!("  ID: {}", account.id);
        }

        AccountCommands::List => {
            print!("{}", format_account_list(registry.accounts(), registry.current().id));
        }

        AccountCommands::Show { account } => {
            let found = match account {
                Some(identifier) => registry
                    .find(&identifier)
                    .cloned()
                    .ok_or_else(|| TrackerError::account_not_found(&identifier))?,
                None => registry.current().clone(),
            };

            let transactions = repository.query(found.id)?;
            print!(
                "{}",
                format_account_details(&found, &totals(&transactions), transactions.len())
            );
        }

        AccountCommands::Edit {
            account,
            name,
            currency,
        } => {
            let mut found = registry
                .find(&account)
                .cloned()
                .ok_or_else(|| TrackerError::account_not_found(&account))?;

            if name.is_none() && currency.is_none() {
                println!("No changes specified. Use --name or --currency.");
                return Ok(());
            }

            if let Some(name) = name {
                found.name = name.trim().to_string();
            }
            if let Some(currency) = currency {
                found.currency = currency.trim().to_uppercase();
            }
            found
                .validate()
                .map_err(|e| TrackerError::Validation(e.to_string()))?;

            registry.update(&found)?;
            println!("Updated account: {} ({})", found.name, found.currency);
        }

        AccountCommands::Delete { account, force } => {
            let found = registry
                .find(&account)
                .cloned()
                .ok_or_else(|| TrackerError::account_not_found(&account))?;

            if found.is_default {
                return Err(TrackerError::Validation(format!(
                    "'{}' is the default account and cannot be deleted",
                    found.name
                )));
            }

            let count = repository.query(found.id)?.len();
            if !force {
                println!("About to delete account '{}' and its {} transactions.", found.name, count);
                println!();
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            registry.delete(&found)?;
            println!("Deleted account: {} ({} transactions removed)", found.name, count);
            println!("Current account: {}", registry.current().name);
        }

        AccountCommands::Switch { account } => {
            let found = registry
                .find(&account)
                .cloned()
                .ok_or_else(|| TrackerError::account_not_found(&account))?;

            registry.switch_current(&found)?;
            println!("Current account: {}", registry.current().name);
        }

        AccountCommands::Restore { force } => {
            let default = registry
                .default_account()
                .cloned()
                .ok_or_else(|| TrackerError::account_not_found("default account"))?;

            let count = repository.query(default.id)?.len();
            if !force {
                println!(
                    "About to remove all {} transactions from '{}'.",
                    count, default.name
                );
                println!();
                println!("Use --force to confirm");
                return Ok(());
            }

            registry.restore_default(&default)?;
            println!("Restored '{}': {} transactions removed", default.name, count);
        }
    }

    Ok(())
}
