//! Backup CLI commands
//!
//! CSV export of every account and import of a previously exported file.

use clap::Subcommand;
use std::path::PathBuf;

use crate::backup::{export_csv, export_to_path, import_from_path};
use crate::error::TrackerResult;
use crate::services::{AccountRegistry, TransactionRepository};
use crate::storage::Storage;

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Export all transactions of all accounts to CSV
    Export {
        /// Output file (prints to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import transactions from a CSV backup
    Import {
        /// Path to the CSV file
        file: PathBuf,
    },
}

/// Handle a backup command
pub fn handle_backup_command(storage: &Storage, cmd: BackupCommands) -> TrackerResult<()> {
    let mut registry = AccountRegistry::initialize(storage)?;
    let repository = TransactionRepository::new(storage);

    match cmd {
        BackupCommands::Export { output } => {
            let transactions = repository.all()?;

            match output {
                Some(path) => {
                    let count = export_to_path(
                        &path,
                        &transactions,
                        registry.accounts(),
                        registry.base_currency(),
                    )?;
                    println!("Exported {} transactions to {}", count, path.display());
                }
                None => {
                    let text =
                        export_csv(&transactions, registry.accounts(), registry.base_currency())?;
                    print!("{}", text);
                }
            }
        }

        BackupCommands::Import { file } => {
            let summary = import_from_path(&file, &mut registry, &repository)?;

            println!("Import complete");
            println!("  Imported:         {}", summary.imported);
            println!("  Skipped:          {}", summary.skipped);
            println!("  Accounts created: {}", summary.accounts_created);
        }
    }

    Ok(())
}
